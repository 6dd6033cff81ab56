//! Progression and gamification engine for the mini-game platform.
//!
//! Provides:
//! - Answer crediting with points, levels, and daily streaks
//! - Trophy cascade awarding with at-most-once semantics
//! - Daily and weekly objectives with one-time reward claims
//! - Question suggestions and progress/leaderboard rollups
//!
//! Storage is injected through the narrow traits in [`store`]; the
//! bundled [`MemoryStore`] backs tests and single-process deployments.
//! Every time-dependent operation takes the current instant as a
//! parameter, so behavior is reproducible in tests.

pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use engine::ProgressionEngine;
pub use error::{EngineError, ErrorKind, Result};
pub use models::{
    AnswerEvent, AnswerRecord, ClaimReceipt, CreditOutcome, DailyActivity, LeaderboardEntry,
    ObjectiveStatus, QuestionProgress, UserStats,
};
pub use store::{
    AccountRepository, AnswerLog, MemoryStore, ObjectiveRepository, ProgressionStore,
    QuestionCatalog, SessionRepository, TrophyRepository,
};
