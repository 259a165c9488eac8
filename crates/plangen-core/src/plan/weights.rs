//! Phase weight resolution.
//!
//! Each level starts from a fixed split across the three phases. A learner
//! who already knows the basic containers skips desensitization entirely
//! and that share moves into fortification.

use serde::{Deserialize, Serialize};

use super::types::{SelfTest, UserLevel};

/// Tolerance used when checking that weights sum to 1.0.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Fractional effort shares for the three normal-mode phases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhaseWeights {
    pub desensitization: f64,
    pub fortification: f64,
    pub sprint: f64,
}

impl PhaseWeights {
    pub const fn new(desensitization: f64, fortification: f64, sprint: f64) -> Self {
        Self {
            desensitization,
            fortification,
            sprint,
        }
    }

    pub fn sum(&self) -> f64 {
        self.desensitization + self.fortification + self.sprint
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_EPSILON
    }

    pub fn has_negative(&self) -> bool {
        self.desensitization < 0.0 || self.fortification < 0.0 || self.sprint < 0.0
    }

    /// Fold the whole desensitization share into fortification.
    fn shift_desensitization(self) -> Self {
        Self {
            desensitization: 0.0,
            fortification: self.fortification + self.desensitization,
            sprint: self.sprint,
        }
    }
}

/// Per-level base weight table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightTable {
    #[serde(default = "default_beginner_weights")]
    pub beginner: PhaseWeights,
    #[serde(default = "default_intermediate_weights")]
    pub intermediate: PhaseWeights,
    #[serde(default = "default_sprint_weights")]
    pub sprint: PhaseWeights,
}

fn default_beginner_weights() -> PhaseWeights {
    PhaseWeights::new(0.20, 0.50, 0.30)
}
fn default_intermediate_weights() -> PhaseWeights {
    PhaseWeights::new(0.05, 0.60, 0.35)
}
fn default_sprint_weights() -> PhaseWeights {
    PhaseWeights::new(0.00, 0.50, 0.50)
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            beginner: default_beginner_weights(),
            intermediate: default_intermediate_weights(),
            sprint: default_sprint_weights(),
        }
    }
}

impl WeightTable {
    pub fn for_level(&self, level: UserLevel) -> PhaseWeights {
        match level {
            UserLevel::Beginner => self.beginner,
            UserLevel::Intermediate => self.intermediate,
            UserLevel::Sprint => self.sprint,
        }
    }
}

/// Resolve the final weights for a level and self-test answers.
///
/// `shift_containers` enables the rule that moves desensitization into
/// fortification when `knows_containers` is set. The guard on a positive
/// desensitization share makes the shift a no-op for the sprint level.
pub fn resolve_weights(
    table: &WeightTable,
    level: UserLevel,
    self_test: &SelfTest,
    shift_containers: bool,
) -> PhaseWeights {
    let base = table.for_level(level);
    if shift_containers && self_test.knows_containers && base.desensitization > 0.0 {
        base.shift_desensitization()
    } else {
        base
    }
}
