use std::collections::BTreeMap;

use super::state::{ErrorKey, ErrorMap, FormValue};

/// Result of running one field's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Failed(&'static str),
}

/// `Live` runs only the checks meant for feedback while typing.
/// `Full` runs every check, as done right before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Full,
}

struct Check<T> {
    test: fn(&T) -> bool,
    message: &'static str,
    live: bool,
}

/// Ordered predicates for a single field. The first failing one is reported.
pub struct Chain<T: FormValue> {
    field: T::Field,
    checks: Vec<Check<T>>,
}

impl<T: FormValue> Chain<T> {
    pub fn new(field: T::Field) -> Self {
        Self { field, checks: Vec::new() }
    }

    /// Checked on the full pass only.
    pub fn require(mut self, test: fn(&T) -> bool, message: &'static str) -> Self {
        self.checks.push(Check { test, message, live: false });
        self
    }

    /// Checked on the full pass and on every live check.
    pub fn require_live(mut self, test: fn(&T) -> bool, message: &'static str) -> Self {
        self.checks.push(Check { test, message, live: true });
        self
    }

    pub fn field(&self) -> T::Field {
        self.field
    }

    fn evaluate(&self, value: &T, mode: Mode) -> Outcome {
        self.checks
            .iter()
            .filter(|c| mode == Mode::Full || c.live)
            .find(|c| !(c.test)(value))
            .map_or(Outcome::Ok, |c| Outcome::Failed(c.message))
    }
}

/// The single source of validation for a form. Live feedback and the
/// full-form pass are both derived from these chains.
pub struct RuleSet<T: FormValue> {
    chains: Vec<Chain<T>>,
}

impl<T: FormValue> RuleSet<T> {
    pub fn new(chains: Vec<Chain<T>>) -> Self {
        Self { chains }
    }

    /// Fields without a chain are always `Ok`.
    pub fn evaluate(&self, value: &T, field: T::Field, mode: Mode) -> Outcome {
        self.chains
            .iter()
            .filter(|c| c.field == field)
            .map(|c| c.evaluate(value, mode))
            .find(|o| *o != Outcome::Ok)
            .unwrap_or(Outcome::Ok)
    }

    pub fn validate_all(&self, value: &T) -> ErrorMap<T::Field> {
        let mut errors = BTreeMap::new();
        for chain in &self.chains {
            if errors.contains_key(&ErrorKey::Field(chain.field)) {
                continue;
            }
            if let Outcome::Failed(message) = chain.evaluate(value, Mode::Full) {
                errors.insert(ErrorKey::Field(chain.field), message.to_string());
            }
        }
        errors
    }

    pub fn fields(&self) -> impl Iterator<Item = T::Field> + '_ {
        self.chains.iter().map(Chain::field)
    }
}
