//! Objective progress upkeep and reward claims.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use progression_core::{grant_points, period_for, period_score, period_variety, ProgressionPolicy};

use crate::error::{EngineError, Result};
use crate::models::{
    ClaimReceipt, ObjectiveCategory, ObjectiveDefinition, ObjectiveProgress, ObjectiveStatus,
};
use crate::services::trophies;
use crate::store::{AccountRepository, ObjectiveRepository, SessionRepository, TrophyRepository};

fn status_of(def: &ObjectiveDefinition, progress: &ObjectiveProgress) -> ObjectiveStatus {
    ObjectiveStatus {
        id: def.id.clone(),
        title: def.title.clone(),
        category: def.category,
        cadence: def.cadence,
        target: def.target,
        reward: def.reward,
        period: progress.period,
        progress: progress.progress,
        completed: progress.completed,
        reward_claimed: progress.reward_claimed,
    }
}

/// Bring every objective's current-period progress up to date after a
/// game event. Game-count objectives advance only when the event finished
/// a session; score and variety objectives are recomputed from session
/// history, which makes them self-correcting under replay.
pub fn apply_game_event<S>(
    store: &S,
    user_id: Uuid,
    completed: bool,
    policy: &ProgressionPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<ObjectiveStatus>>
where
    S: ObjectiveRepository + SessionRepository + ?Sized,
{
    let definitions = store.objective_definitions()?;
    let sessions = store.sessions_for_user(user_id)?;

    let mut statuses = Vec::with_capacity(definitions.len());
    for def in definitions {
        let period = period_for(def.cadence, now, policy.daily_reset_hour);
        let mut progress = store
            .get_progress(user_id, &def.id, period)?
            .unwrap_or_else(|| ObjectiveProgress::new(user_id, def.id.as_str(), period));

        let newly_completed = match def.category {
            ObjectiveCategory::Games => {
                if completed {
                    progress.increment(&def, now)
                } else {
                    false
                }
            }
            ObjectiveCategory::Score => {
                let total = period_score(&sessions, def.cadence, period, policy.daily_reset_hour);
                let clamped = total.min(u64::from(def.target)) as u32;
                progress.advance_to(&def, clamped, now)
            }
            ObjectiveCategory::Variety => {
                let distinct =
                    period_variety(&sessions, def.cadence, period, policy.daily_reset_hour);
                progress.advance_to(&def, distinct, now)
            }
        };

        if newly_completed {
            tracing::info!(user_id = %user_id, objective = %def.id, "objective completed");
        }
        store.save_progress(&progress)?;
        statuses.push(status_of(&def, &progress));
    }

    Ok(statuses)
}

/// Current-period standing of every objective. Missing progress rows
/// render as zero without being created.
pub fn list_objectives<S>(
    store: &S,
    user_id: Uuid,
    policy: &ProgressionPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<ObjectiveStatus>>
where
    S: AccountRepository + ObjectiveRepository + ?Sized,
{
    if store.get_account(user_id)?.is_none() {
        return Err(EngineError::AccountNotFound(user_id));
    }

    let definitions = store.objective_definitions()?;
    let mut statuses = Vec::with_capacity(definitions.len());
    for def in definitions {
        let period = period_for(def.cadence, now, policy.daily_reset_hour);
        let progress = store
            .get_progress(user_id, &def.id, period)?
            .unwrap_or_else(|| ObjectiveProgress::new(user_id, def.id.as_str(), period));
        statuses.push(status_of(&def, &progress));
    }

    Ok(statuses)
}

/// Grant the reward for a completed objective, at most once per period.
///
/// The claim is latched before the account is saved, so a failure between
/// the two can lose a reward but never double-grant one.
pub fn claim_reward<S>(
    store: &S,
    user_id: Uuid,
    objective_id: &str,
    policy: &ProgressionPolicy,
    now: DateTime<Utc>,
) -> Result<ClaimReceipt>
where
    S: AccountRepository + ObjectiveRepository + TrophyRepository + ?Sized,
{
    let mut account = store
        .get_account(user_id)?
        .ok_or(EngineError::AccountNotFound(user_id))?;

    let def = store
        .objective_definitions()?
        .into_iter()
        .find(|d| d.id == objective_id)
        .ok_or_else(|| EngineError::ObjectiveNotFound(objective_id.to_string()))?;

    let period = period_for(def.cadence, now, policy.daily_reset_hour);
    let mut progress = store
        .get_progress(user_id, objective_id, period)?
        .ok_or_else(|| EngineError::ObjectiveNotStarted(objective_id.to_string()))?;

    if !progress.completed {
        return Err(EngineError::ObjectiveIncomplete(objective_id.to_string()));
    }
    if progress.reward_claimed {
        return Err(EngineError::RewardAlreadyClaimed(objective_id.to_string()));
    }

    grant_points(&mut account, u64::from(def.reward), policy)?;
    progress.mark_claimed(now);
    store.save_progress(&progress)?;

    // Reward points may cross a trophy threshold.
    let new_trophies = trophies::award_eligible(store, &mut account, policy, now)?;
    store.save_account(&account)?;

    tracing::info!(
        user_id = %user_id,
        objective = %objective_id,
        reward = def.reward,
        trophies = new_trophies.len(),
        "objective reward claimed"
    );

    Ok(ClaimReceipt {
        points_earned: def.reward,
        new_total: account.total_points,
    })
}
