//! Configuration for a scenario run.

use serde::{Deserialize, Serialize};

use crate::rng::Seed;

/// Default cap on path steps appended by one run.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Configuration for a scenario.
///
/// Fields missing from serialized input take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// RNG seed for reproducible journeys. `None` draws from OS entropy.
    pub seed: Option<Seed>,
    /// Maximum path steps one run may append; 0 disables the cap.
    pub max_steps: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ScenarioConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set the step cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Remove the step cap.
    pub fn unbounded(self) -> Self {
        self.with_max_steps(0)
    }

    /// Whether `steps` appended steps are still within the cap.
    pub fn allows(&self, steps: usize) -> bool {
        self.max_steps == 0 || steps <= self.max_steps
    }
}
