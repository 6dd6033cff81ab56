//! Core types for the progression engine.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mini-game type a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Quiz,
    Memory,
    Matching,
    Sorting,
}

impl GameKind {
    /// All kinds, in display order.
    pub const ALL: [GameKind; 4] = [Self::Quiz, Self::Memory, Self::Matching, Self::Sorting];

    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Memory => "memory",
            Self::Matching => "matching",
            Self::Sorting => "sorting",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "quiz" => Some(Self::Quiz),
            "memory" => Some(Self::Memory),
            "matching" => Some(Self::Matching),
            "sorting" => Some(Self::Sorting),
            _ => None,
        }
    }

    /// Whether one correct answer finishes a session of this kind.
    /// Memory, matching, and sorting sessions model a single trial;
    /// quiz sessions are finished by any answered question instead.
    pub fn is_single_trial(&self) -> bool {
        !matches!(self, Self::Quiz)
    }
}

/// A learner account with progression totals.
///
/// Owned by the account subsystem; the engine reads and mutates it but
/// never creates or deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub display_name: String,
    /// Cumulative points, never decreasing.
    pub total_points: u64,
    /// Derived from `total_points`, never set independently of it.
    pub level: u32,
    /// Points still missing for the next level. Informational.
    pub points_to_next_level: u64,
    pub daily_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<NaiveDate>,
}

impl UserAccount {
    /// Fresh account at the floor level with no points.
    pub fn new(id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            total_points: 0,
            level: 1,
            points_to_next_level: 0,
            daily_streak: 0,
            last_played: None,
        }
    }

    /// Update the daily streak for activity on `today`.
    ///
    /// Same day: unchanged. Consecutive day: incremented. Anything else
    /// (first play, or a gap): reset to 1.
    pub fn record_played(&mut self, today: NaiveDate) {
        match self.last_played {
            Some(last) if last == today => {}
            Some(last) if last.succ_opt() == Some(today) => {
                self.daily_streak += 1;
            }
            _ => {
                self.daily_streak = 1;
            }
        }
        self.last_played = Some(today);
    }
}

/// One play attempt for one user and game kind, identified by a session key.
///
/// Created lazily on the first credited answer; never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub user_id: Uuid,
    /// Opaque caller-supplied session identifier.
    pub key: String,
    pub kind: GameKind,
    /// Question ids answered correctly. Disjoint from `wrong_answers`.
    pub answered: BTreeSet<i64>,
    /// Question ids whose most recent answer was incorrect.
    pub wrong_answers: BTreeSet<i64>,
    /// Correct-answer count per difficulty level; per-level counts only grow.
    pub correct_per_level: BTreeMap<u32, u32>,
    /// Highest difficulty level available to the learner. Only grows.
    pub max_unlocked_level: u32,
    pub completed: bool,
    pub score: u32,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(user_id: Uuid, key: impl Into<String>, kind: GameKind, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            key: key.into(),
            kind,
            answered: BTreeSet::new(),
            wrong_answers: BTreeSet::new(),
            correct_per_level: BTreeMap::new(),
            max_unlocked_level: 1,
            completed: false,
            score: 0,
            started_at: now,
            updated_at: now,
        }
    }

    /// Correct answers recorded at the given difficulty level.
    pub fn correct_at_level(&self, level: u32) -> u32 {
        self.correct_per_level.get(&level).copied().unwrap_or(0)
    }
}

/// Trophy rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrophyRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Immutable trophy catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyDefinition {
    /// Unique name, also the award key.
    pub name: String,
    pub rarity: TrophyRarity,
    /// Points granted on award.
    pub points: u32,
    /// Account level at which the trophy becomes eligible.
    pub required_level: u32,
}

/// Marks a trophy as unlocked for a user. At most one per (user, trophy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyAward {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Name of the awarded [`TrophyDefinition`].
    pub trophy: String,
    pub awarded_at: DateTime<Utc>,
}

impl TrophyAward {
    pub fn new(user_id: Uuid, trophy: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            trophy: trophy.into(),
            awarded_at: now,
        }
    }
}

/// What an objective counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveCategory {
    /// Sessions completed in the period.
    Games,
    /// Session score accumulated in the period.
    Score,
    /// Distinct game kinds completed in the period.
    Variety,
}

/// How often an objective's period rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveCadence {
    Daily,
    Weekly,
}

/// Immutable objective catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDefinition {
    pub id: String,
    pub title: String,
    pub category: ObjectiveCategory,
    pub cadence: ObjectiveCadence,
    /// Progress threshold at which the objective counts as completed.
    pub target: u32,
    /// Points granted when the reward is claimed.
    pub reward: u32,
}

/// Per-user objective progress within one period.
///
/// A new period key implicitly starts a fresh record; old periods are kept
/// as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveProgress {
    pub user_id: Uuid,
    pub objective_id: String,
    /// Period key: the adjusted calendar day (daily) or ISO-week Monday (weekly).
    pub period: NaiveDate,
    pub progress: u32,
    /// Sticky within the period: once true it never reverts, even if a
    /// recomputation would lower `progress`.
    pub completed: bool,
    pub reward_claimed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

impl ObjectiveProgress {
    /// Fresh progress record for one (user, objective, period).
    pub fn new(user_id: Uuid, objective_id: impl Into<String>, period: NaiveDate) -> Self {
        Self {
            user_id,
            objective_id: objective_id.into(),
            period,
            progress: 0,
            completed: false,
            reward_claimed: false,
            completed_at: None,
            claimed_at: None,
        }
    }
}

/// External question catalog entry. The engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRef {
    pub id: i64,
    /// Difficulty tier, >= 1. Doubles as the points a correct answer earns.
    pub difficulty: u32,
    pub category: String,
    pub kind: GameKind,
}
