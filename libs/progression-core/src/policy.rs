//! Progression policy constants.

use serde::{Deserialize, Serialize};

/// Tunable progression parameters.
///
/// The level curve and the unlock threshold are deployment policy, not
/// engine behavior, so they travel together in one injectable struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPolicy {
    /// Points per level step of the linear curve. Clamped to >= 1 when used.
    pub points_per_level: u64,
    /// Correct answers at one difficulty level needed to unlock the next.
    pub unlock_threshold: u32,
    /// Hour of day (0-23) at which a new daily period begins. With the
    /// default of 0 the period key is the plain calendar date.
    pub daily_reset_hour: u32,
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            points_per_level: 100,
            unlock_threshold: 5,
            daily_reset_hour: 0,
        }
    }
}
