//! Weighted, optionally gated transitions between tables.

use crate::error::{EngineError, EngineResult};
use crate::tag::TagSpec;

/// A weighted edge to a target table.
///
/// Outcomes with thresholds are only candidates when every threshold is met.
/// Likelihoods are relative to the sibling outcomes of the same event and do
/// not need to sum to 1.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Relative weight among siblings.
    pub likelihood: f64,
    /// Table rolled on when this outcome is chosen.
    pub table_name: String,
    /// Minimum tag values required, possibly computed.
    pub thresholds: Vec<TagSpec>,
}

impl Outcome {
    /// An unconditional outcome.
    pub fn new(likelihood: f64, table_name: impl Into<String>) -> Self {
        Self {
            likelihood,
            table_name: table_name.into(),
            thresholds: Vec::new(),
        }
    }

    /// Append a threshold spec.
    pub fn with_thresholds(mut self, thresholds: impl Into<TagSpec>) -> Self {
        self.thresholds.push(thresholds.into());
        self
    }

    /// Whether any threshold is attached. Empty literal specs don't count.
    pub fn has_thresholds(&self) -> bool {
        self.thresholds.iter().any(|t| !t.is_empty())
    }

    /// Check the target name and weight.
    pub fn validate(&self) -> EngineResult<()> {
        if self.table_name.is_empty() {
            return Err(EngineError::InvalidName("target table"));
        }
        if !self.likelihood.is_finite() || self.likelihood < 0.0 {
            return Err(EngineError::InvalidLikelihood {
                target: self.table_name.clone(),
                likelihood: self.likelihood,
            });
        }
        if self.thresholds.iter().any(|t| t.names().contains(&"")) {
            return Err(EngineError::InvalidName("tag"));
        }
        Ok(())
    }
}

impl From<(&str, f64)> for Outcome {
    fn from((table_name, likelihood): (&str, f64)) -> Self {
        Self::new(likelihood, table_name)
    }
}
