//! Objective progress rules.
//!
//! Progress toward an objective only moves forward inside a period: it is
//! clamped to the target and completion latches once reached. Score and
//! variety objectives are measured from the user's sessions; game-count
//! objectives are advanced one event at a time by the engine.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::period::period_for;
use crate::types::{GameSession, ObjectiveCadence, ObjectiveDefinition, ObjectiveProgress};

impl ObjectiveProgress {
    /// Raise progress to `value`, clamped to the definition's target.
    /// Progress never decreases and completion is sticky. Returns true
    /// exactly when this call completed the objective.
    pub fn advance_to(
        &mut self,
        def: &ObjectiveDefinition,
        value: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let clamped = value.min(def.target);
        if clamped > self.progress {
            self.progress = clamped;
        }
        if !self.completed && self.progress >= def.target {
            self.completed = true;
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Advance progress by one event.
    pub fn increment(&mut self, def: &ObjectiveDefinition, now: DateTime<Utc>) -> bool {
        self.advance_to(def, self.progress.saturating_add(1), now)
    }

    /// Latch the reward as claimed. Callers validate eligibility first.
    pub fn mark_claimed(&mut self, now: DateTime<Utc>) {
        self.reward_claimed = true;
        self.claimed_at = Some(now);
    }
}

fn in_period(
    session: &GameSession,
    cadence: ObjectiveCadence,
    period: NaiveDate,
    reset_hour: u32,
) -> bool {
    period_for(cadence, session.updated_at, reset_hour) == period
}

/// Total score across sessions last updated in `period`.
pub fn period_score(
    sessions: &[GameSession],
    cadence: ObjectiveCadence,
    period: NaiveDate,
    reset_hour: u32,
) -> u64 {
    sessions
        .iter()
        .filter(|s| in_period(s, cadence, period, reset_hour))
        .map(|s| u64::from(s.score))
        .sum()
}

/// Distinct game kinds completed in `period`.
pub fn period_variety(
    sessions: &[GameSession],
    cadence: ObjectiveCadence,
    period: NaiveDate,
    reset_hour: u32,
) -> u32 {
    let kinds: BTreeSet<_> = sessions
        .iter()
        .filter(|s| s.completed && in_period(s, cadence, period, reset_hour))
        .map(|s| s.kind)
        .collect();
    kinds.len() as u32
}
