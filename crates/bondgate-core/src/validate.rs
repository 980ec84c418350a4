//! Field-level checks shared by policies and pipeline inputs.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// One rejected field and the rule it broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `smart.weights`.
    pub field: String,
    /// The broken rule.
    pub message: String,
}

impl ValidationError {
    /// Pairs a field with the rule it broke.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Implemented by anything that can be checked before it is used.
pub trait Validate {
    /// Every broken rule, in field order. Empty means usable.
    fn validate(&self) -> Vec<ValidationError>;

    /// Shorthand for an empty [`Validate::validate`].
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Folds all broken rules into one [`CoreError::PolicyError`].
    fn validate_or_error(&self) -> CoreResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
            Err(CoreError::policy_error(reasons.join("; ")))
        }
    }
}
