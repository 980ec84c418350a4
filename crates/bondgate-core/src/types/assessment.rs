//! Outcome building blocks shared by the decision pipelines.
//!
//! - [`Checkpoint`]: binary gate with the measured value
//! - [`Status`]: tri-state pass / caution / fail
//! - [`RiskCheck`]: named qualitative risk with a status
//! - [`ScoredStep`]: weighted-score step with a status and a 0..=2 score

use serde::{Deserialize, Serialize};

/// Tri-state outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Rule satisfied.
    Pass,
    /// Acceptable with reservations.
    Caution,
    /// Rule violated.
    Fail,
}

impl Status {
    /// Returns true for [`Status::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true for [`Status::Fail`].
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Maps a boolean gate to pass / fail.
    #[must_use]
    pub fn pass_or_fail(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Maps a boolean gate to pass / caution.
    #[must_use]
    pub fn pass_or_caution(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Caution
        }
    }
}

/// A binary gate produced by a pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Whether the gate passed.
    pub passed: bool,
    /// The measured value the gate was evaluated on.
    pub value: f64,
    /// Human-readable explanation.
    pub detail: String,
}

impl Checkpoint {
    /// Creates a checkpoint.
    #[must_use]
    pub fn new(passed: bool, value: f64, detail: impl Into<String>) -> Self {
        Self {
            passed,
            value,
            detail: detail.into(),
        }
    }
}

/// A named qualitative risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCheck {
    /// Risk name, e.g. "Credit Risk".
    pub name: String,
    /// Outcome.
    pub status: Status,
    /// Explanation.
    pub detail: String,
}

impl RiskCheck {
    /// Creates a risk check.
    #[must_use]
    pub fn new(name: impl Into<String>, status: Status, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
        }
    }
}

/// One step of a weighted-score evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStep {
    /// Outcome.
    pub status: Status,
    /// Raw score in 0..=2.
    pub score: f64,
    /// Headline value shown for the step.
    pub value: String,
    /// Explanation.
    pub detail: String,
    /// Formula used, when worth showing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl ScoredStep {
    /// Creates a step without a formula.
    #[must_use]
    pub fn new(status: Status, score: f64, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            score,
            value: value.into(),
            detail: detail.into(),
            formula: None,
        }
    }

    /// Attaches a formula.
    #[must_use]
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}
