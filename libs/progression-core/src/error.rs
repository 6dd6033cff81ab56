//! Error types for progression-core.

use thiserror::Error;

/// Result type alias using ProgressionError.
pub type Result<T> = std::result::Result<T, ProgressionError>;

/// Invariant violations in progression arithmetic.
///
/// These indicate a programming error or corrupted stored state, not a
/// recoverable user-facing condition. Negative deltas are unrepresentable
/// by construction; what remains is overflow of the unsigned totals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("point total overflow: {total} + {delta}")]
    PointsOverflow { total: u64, delta: u64 },

    #[error("session score overflow: {score} + {delta}")]
    ScoreOverflow { score: u32, delta: u32 },
}
