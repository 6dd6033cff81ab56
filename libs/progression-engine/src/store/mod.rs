//! Storage traits the engine runs against.
//!
//! Each trait covers one narrow concern so the transition logic can be
//! exercised against small fakes; a real deployment implements them all
//! on a single backing store.

pub mod memory;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AnswerRecord, GameKind, GameSession, ObjectiveDefinition, ObjectiveProgress, QuestionRef,
    TrophyAward, TrophyDefinition, UserAccount,
};
use chrono::NaiveDate;

pub use memory::MemoryStore;

/// Repository for user account records.
pub trait AccountRepository: Send + Sync {
    fn get_account(&self, user_id: Uuid) -> Result<Option<UserAccount>>;
    fn save_account(&self, account: &UserAccount) -> Result<()>;
    fn all_accounts(&self) -> Result<Vec<UserAccount>>;
}

/// Repository for game session records.
pub trait SessionRepository: Send + Sync {
    fn get_session(&self, user_id: Uuid, session_key: &str) -> Result<Option<GameSession>>;
    fn save_session(&self, session: &GameSession) -> Result<()>;
    fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<GameSession>>;
}

/// Repository for trophy definitions and awards.
pub trait TrophyRepository: Send + Sync {
    fn trophy_definitions(&self) -> Result<Vec<TrophyDefinition>>;
    fn awards_for_user(&self, user_id: Uuid) -> Result<Vec<TrophyAward>>;
    /// Insert an award unless one already exists for the same
    /// (user, trophy) pair. Returns whether the award was created.
    fn insert_award(&self, award: &TrophyAward) -> Result<bool>;
}

/// Repository for objective definitions and per-period progress.
pub trait ObjectiveRepository: Send + Sync {
    fn objective_definitions(&self) -> Result<Vec<ObjectiveDefinition>>;
    fn get_progress(
        &self,
        user_id: Uuid,
        objective_id: &str,
        period: NaiveDate,
    ) -> Result<Option<ObjectiveProgress>>;
    fn save_progress(&self, progress: &ObjectiveProgress) -> Result<()>;
}

/// Read access to the external question catalog.
pub trait QuestionCatalog: Send + Sync {
    fn questions_for_game(&self, kind: GameKind) -> Result<Vec<QuestionRef>>;
}

/// Append-only log of credited answers, feeding the activity rollups.
pub trait AnswerLog: Send + Sync {
    fn append_answer(&self, record: &AnswerRecord) -> Result<()>;
    fn answers_for_user(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>>;
}

/// The full storage surface the engine needs.
pub trait ProgressionStore:
    AccountRepository
    + SessionRepository
    + TrophyRepository
    + ObjectiveRepository
    + QuestionCatalog
    + AnswerLog
{
}

impl<T> ProgressionStore for T where
    T: AccountRepository
        + SessionRepository
        + TrophyRepository
        + ObjectiveRepository
        + QuestionCatalog
        + AnswerLog
{
}
