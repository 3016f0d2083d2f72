//! Form state and validation rules shared by the submission pages.

pub mod rules;
pub mod state;

pub use rules::{Chain, Mode, Outcome, RuleSet};
pub use state::{ErrorKey, ErrorMap, FormState, FormValue};
