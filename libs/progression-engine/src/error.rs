//! Error handling for the progression engine

use progression_core::ProgressionError;
use thiserror::Error;
use uuid::Uuid;

/// Engine error types
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    #[error("Unknown objective: {0}")]
    ObjectiveNotFound(String),

    #[error("Objective not started this period: {0}")]
    ObjectiveNotStarted(String),

    #[error("Objective not completed: {0}")]
    ObjectiveIncomplete(String),

    #[error("Reward already claimed: {0}")]
    RewardAlreadyClaimed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invariant violation: {0}")]
    Invariant(#[from] ProgressionError),
}

/// Coarse classification used by callers to decide how to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown user, session, or objective.
    NotFound,
    /// The operation is valid but the state does not allow it.
    InvalidState,
    /// An internal rule was broken; treat as a bug.
    InvariantViolation,
    /// The backing store failed.
    Storage,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::AccountNotFound(_) | EngineError::ObjectiveNotFound(_) => {
                ErrorKind::NotFound
            }
            EngineError::ObjectiveNotStarted(_)
            | EngineError::ObjectiveIncomplete(_)
            | EngineError::RewardAlreadyClaimed(_) => ErrorKind::InvalidState,
            EngineError::Invariant(_) => ErrorKind::InvariantViolation,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let error = EngineError::AccountNotFound(Uuid::nil());
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error = EngineError::ObjectiveNotFound("daily_games".to_string());
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_claim_failures_are_invalid_state() {
        let error = EngineError::ObjectiveIncomplete("daily_score".to_string());
        assert_eq!(error.kind(), ErrorKind::InvalidState);

        let error = EngineError::RewardAlreadyClaimed("daily_score".to_string());
        assert_eq!(error.kind(), ErrorKind::InvalidState);

        let error = EngineError::ObjectiveNotStarted("daily_score".to_string());
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_invariant_kind() {
        let error = EngineError::from(ProgressionError::PointsOverflow {
            total: u64::MAX,
            delta: 1,
        });
        assert_eq!(error.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_error_display_account_not_found() {
        let error = EngineError::AccountNotFound(Uuid::nil());
        assert_eq!(
            error.to_string(),
            "Account not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_error_display_already_claimed() {
        let error = EngineError::RewardAlreadyClaimed("daily_games".to_string());
        assert_eq!(error.to_string(), "Reward already claimed: daily_games");
    }
}
