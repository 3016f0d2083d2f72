use std::collections::BTreeMap;
use std::fmt;

use super::rules::{Mode, Outcome, RuleSet};

/// A set of form fields that can be edited by partial patches.
pub trait FormValue: Clone + PartialEq {
    type Field: Copy + Ord + fmt::Debug;
    type Patch;

    /// Merge a partial update into the current value.
    fn apply(&mut self, patch: Self::Patch);
}

/// Slot an error message is reported in: one field, or the whole form (`*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey<F> {
    Field(F),
    Form,
}

/// Absent key = that slot is currently valid.
pub type ErrorMap<F> = BTreeMap<ErrorKey<F>, String>;

/// Current field values, last validation messages and the "submitted" flag.
#[derive(Debug, Clone)]
pub struct FormState<T: FormValue> {
    value: T,
    error: ErrorMap<T::Field>,
    validated: bool,
}

impl<T: FormValue> FormState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            error: BTreeMap::new(),
            validated: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn errors(&self) -> &ErrorMap<T::Field> {
        &self.error
    }

    /// True once a full pass came back clean and submission was triggered.
    pub fn validated(&self) -> bool {
        self.validated
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_empty()
    }

    pub fn field_error(&self, field: T::Field) -> Option<&str> {
        self.error.get(&ErrorKey::Field(field)).map(String::as_str)
    }

    pub fn form_error(&self) -> Option<&str> {
        self.error.get(&ErrorKey::Form).map(String::as_str)
    }

    /// Merge fields into the value. Errors and the submitted flag are untouched.
    pub fn set(&mut self, patch: T::Patch) {
        self.value.apply(patch);
    }

    /// Re-run the live rules for `fields`, replacing only their entries.
    pub fn check(&mut self, rules: &RuleSet<T>, fields: &[T::Field]) {
        for &field in fields {
            match rules.evaluate(&self.value, field, Mode::Live) {
                Outcome::Ok => {
                    self.error.remove(&ErrorKey::Field(field));
                }
                Outcome::Failed(message) => {
                    self.error.insert(ErrorKey::Field(field), message.to_string());
                }
            }
        }
    }

    /// Full-form pass. Replaces every error; returns whether the form is now submitted.
    pub fn validate(&mut self, rules: &RuleSet<T>) -> bool {
        self.error = rules.validate_all(&self.value);
        self.validated = self.error.is_empty();
        self.validated
    }

    /// Merge externally supplied messages (e.g. a rejected remote call).
    pub fn error(&mut self, partial: ErrorMap<T::Field>) {
        self.error.extend(partial);
    }

    /// Make the form editable again after a failed submission.
    pub fn reopen(&mut self) {
        self.validated = false;
    }

    pub fn is_modified(&self, initial: &T) -> bool {
        self.value != *initial
    }
}
