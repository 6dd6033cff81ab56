//! Engine operation inputs, outcomes, and read models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// Re-export shared types from progression-core
pub use progression_core::types::{
    GameKind, GameSession, ObjectiveCadence, ObjectiveCategory, ObjectiveDefinition,
    ObjectiveProgress, QuestionRef, TrophyAward, TrophyDefinition, TrophyRarity, UserAccount,
};

// === Inbound Events ===

/// One answer submitted by a learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub user_id: Uuid,
    pub session_key: String,
    pub kind: GameKind,
    pub question_id: i64,
    pub correct: bool,
    /// Question difficulty from the catalog; absent or 0 means unknown.
    pub difficulty: Option<u32>,
}

// === Operation Results ===

/// Result of crediting one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditOutcome {
    /// Session snapshot after the credit.
    pub session: GameSession,
    /// Points granted to the account by this answer (0 on repeats and
    /// wrong answers; trophy points are reported separately).
    pub points_awarded: u32,
    pub leveled_up: bool,
    /// Trophies unlocked by this answer's level changes.
    pub new_trophies: Vec<TrophyDefinition>,
}

/// Result of claiming an objective reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub points_earned: u32,
    /// Lifetime total after the reward and any trophy cascade it set off.
    pub new_total: u64,
}

// === Read Models ===

/// Composite progress view for one game type, used by the UI to render
/// progress bars and the suggestion sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionProgress {
    pub answered: Vec<QuestionRef>,
    pub unanswered: Vec<QuestionRef>,
    pub suggestions: Vec<QuestionRef>,
    pub max_unlocked_level: u32,
    pub correct_per_level: BTreeMap<u32, u32>,
}

/// Current-period standing of one objective for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveStatus {
    pub id: String,
    pub title: String,
    pub category: ObjectiveCategory,
    pub cadence: ObjectiveCadence,
    pub target: u32,
    pub reward: u32,
    pub period: NaiveDate,
    pub progress: u32,
    pub completed: bool,
    pub reward_claimed: bool,
}

/// Aggregate stats for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: Uuid,
    pub display_name: String,
    pub total_points: u64,
    pub level: u32,
    pub points_to_next_level: u64,
    pub daily_streak: u32,
    pub sessions_played: u32,
    pub sessions_completed: u32,
    pub sessions_by_kind: BTreeMap<GameKind, u32>,
    pub total_score: u64,
    pub answers: u32,
    pub correct_answers: u32,
    /// Correct answers over total answers, 0.0 before the first answer.
    pub accuracy: f64,
    pub trophies: u32,
}

/// One row of the points leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub display_name: String,
    pub total_points: u64,
    pub level: u32,
}

/// Answer volume for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub answers: u32,
    pub correct: u32,
    pub points: u64,
}

// === History ===

/// Append-only record of one credited answer event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_key: String,
    pub kind: GameKind,
    pub question_id: i64,
    pub correct: bool,
    /// Points the answer earned at credit time.
    pub points: u32,
    pub recorded_at: DateTime<Utc>,
}
