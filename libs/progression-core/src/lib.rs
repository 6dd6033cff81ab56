//! Core progression library shared by the gamification engine.
//!
//! Provides:
//! - Level calculation from lifetime point totals
//! - Session answer-credit transitions (retry, unlock, completion rules)
//! - Objective progress rules and period keys (daily, weekly)
//! - Question suggestion policy
//! - Shared types (UserAccount, GameSession, TrophyDefinition, etc.)

pub mod catalog;
pub mod error;
pub mod level;
pub mod objective;
pub mod period;
pub mod policy;
pub mod session;
pub mod suggest;
pub mod types;

pub use catalog::{default_objectives, default_trophies};
pub use error::{ProgressionError, Result};
pub use level::{grant_points, level_for_points, points_for_level, points_to_next_level, GrantOutcome};
pub use objective::{period_score, period_variety};
pub use period::{daily_period, period_for, weekly_period};
pub use policy::ProgressionPolicy;
pub use session::AnswerOutcome;
pub use suggest::suggest_questions;
pub use types::{
    GameKind, GameSession, ObjectiveCadence, ObjectiveCategory, ObjectiveDefinition,
    ObjectiveProgress, QuestionRef, TrophyAward, TrophyDefinition, TrophyRarity, UserAccount,
};
