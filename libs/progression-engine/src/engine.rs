//! Engine facade serializing per-user mutation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use progression_core::ProgressionPolicy;

use crate::error::{EngineError, Result};
use crate::models::{
    AnswerEvent, ClaimReceipt, CreditOutcome, DailyActivity, GameKind, LeaderboardEntry,
    ObjectiveStatus, QuestionProgress, TrophyDefinition, UserStats,
};
use crate::services::{objectives, sessions, stats, trophies};
use crate::store::ProgressionStore;

/// Facade over the progression services.
///
/// Read-modify-write sequences on one user's account, awards, and claims
/// are serialized behind a per-user lock, so concurrent credits never lose
/// points and award/claim stay at-most-once. Different users proceed in
/// parallel; reads take no lock.
pub struct ProgressionEngine<S> {
    store: Arc<S>,
    policy: ProgressionPolicy,
    user_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl<S: ProgressionStore> ProgressionEngine<S> {
    pub fn new(store: Arc<S>, policy: ProgressionPolicy) -> Self {
        Self {
            store,
            policy,
            user_locks: DashMap::new(),
        }
    }

    pub fn policy(&self) -> &ProgressionPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Credit one answer event: session transition, point grant, streak
    /// upkeep, trophy cascade, and objective progress.
    pub fn credit_answer(&self, event: &AnswerEvent, now: DateTime<Utc>) -> Result<CreditOutcome> {
        let lock = self.user_lock(event.user_id);
        let _guard = lock.lock();
        sessions::credit_answer(self.store.as_ref(), &self.policy, event, now)
    }

    /// Award any trophies the user's current level qualifies for.
    /// Idempotent: a second call with no intervening point change awards
    /// nothing.
    pub fn check_and_award_trophies(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrophyDefinition>> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let mut account = self
            .store
            .get_account(user_id)?
            .ok_or(EngineError::AccountNotFound(user_id))?;
        let newly = trophies::award_eligible(self.store.as_ref(), &mut account, &self.policy, now)?;
        if !newly.is_empty() {
            self.store.save_account(&account)?;
        }
        Ok(newly)
    }

    /// Bring the current period's objective progress up to date after a
    /// game event.
    pub fn update_objective_progress(
        &self,
        user_id: Uuid,
        game_type: GameKind,
        score: u32,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<ObjectiveStatus>> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        if self.store.get_account(user_id)?.is_none() {
            return Err(EngineError::AccountNotFound(user_id));
        }
        tracing::debug!(
            user_id = %user_id,
            game_type = game_type.as_str(),
            score,
            completed,
            "objective progress update"
        );
        objectives::apply_game_event(self.store.as_ref(), user_id, completed, &self.policy, now)
    }

    /// Claim a completed objective's reward, at most once per period.
    pub fn claim_objective_reward(
        &self,
        user_id: Uuid,
        objective_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ClaimReceipt> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();
        objectives::claim_reward(self.store.as_ref(), user_id, objective_id, &self.policy, now)
    }

    /// Answered/unanswered catalog split, suggestions, and unlock state
    /// for one game kind.
    pub fn question_progress(&self, user_id: Uuid, kind: GameKind) -> Result<QuestionProgress> {
        sessions::question_progress(self.store.as_ref(), user_id, kind)
    }

    /// Current-period standing of every objective.
    pub fn objectives(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Vec<ObjectiveStatus>> {
        objectives::list_objectives(self.store.as_ref(), user_id, &self.policy, now)
    }

    /// Aggregate stats for one user.
    pub fn user_stats(&self, user_id: Uuid) -> Result<UserStats> {
        stats::user_stats(self.store.as_ref(), user_id)
    }

    /// Top accounts by lifetime points, 1-based ranks.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        stats::leaderboard(self.store.as_ref(), limit)
    }

    /// Answer volume for the trailing `days` days, oldest first.
    pub fn daily_activity(
        &self,
        user_id: Uuid,
        days: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyActivity>> {
        stats::daily_activity(
            self.store.as_ref(),
            user_id,
            days,
            now,
            self.policy.daily_reset_hour,
        )
    }
}
