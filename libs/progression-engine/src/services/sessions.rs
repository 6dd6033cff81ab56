//! Answer crediting and per-game progress reads.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use progression_core::{daily_period, grant_points, suggest_questions, ProgressionPolicy};

use crate::error::{EngineError, Result};
use crate::models::{
    AnswerEvent, AnswerRecord, CreditOutcome, GameKind, GameSession, QuestionProgress,
};
use crate::services::{objectives, trophies};
use crate::store::{
    AccountRepository, AnswerLog, ObjectiveRepository, QuestionCatalog, SessionRepository,
    TrophyRepository,
};

/// Credit one answer event end to end: session transition, point grant,
/// streak upkeep, trophy cascade, and objective progress.
///
/// An unknown user aborts the whole operation before anything is written.
pub fn credit_answer<S>(
    store: &S,
    policy: &ProgressionPolicy,
    event: &AnswerEvent,
    now: DateTime<Utc>,
) -> Result<CreditOutcome>
where
    S: AccountRepository
        + SessionRepository
        + TrophyRepository
        + ObjectiveRepository
        + AnswerLog
        + ?Sized,
{
    let mut account = store
        .get_account(event.user_id)?
        .ok_or(EngineError::AccountNotFound(event.user_id))?;

    let mut session = match store.get_session(event.user_id, &event.session_key)? {
        Some(existing) => {
            if existing.kind != event.kind {
                tracing::warn!(
                    session_key = %event.session_key,
                    stored = existing.kind.as_str(),
                    event = event.kind.as_str(),
                    "game kind mismatch on existing session, keeping stored kind"
                );
            }
            existing
        }
        None => GameSession::new(event.user_id, event.session_key.as_str(), event.kind, now),
    };

    let outcome = session.record_answer(
        event.question_id,
        event.correct,
        event.difficulty,
        policy,
        now,
    )?;

    let mut leveled_up = false;
    if outcome.points > 0 {
        let grant = grant_points(&mut account, u64::from(outcome.points), policy)?;
        leveled_up = grant.leveled_up();
    }
    account.record_played(daily_period(now, policy.daily_reset_hour));

    store.save_session(&session)?;
    store.append_answer(&AnswerRecord {
        id: Uuid::new_v4(),
        user_id: event.user_id,
        session_key: event.session_key.clone(),
        kind: session.kind,
        question_id: event.question_id,
        correct: event.correct,
        points: outcome.points,
        recorded_at: now,
    })?;

    let new_trophies = if leveled_up {
        trophies::award_eligible(store, &mut account, policy, now)?
    } else {
        Vec::new()
    };
    store.save_account(&account)?;

    objectives::apply_game_event(store, event.user_id, outcome.newly_completed, policy, now)?;

    tracing::debug!(
        user_id = %event.user_id,
        session_key = %event.session_key,
        question_id = event.question_id,
        correct = event.correct,
        points = outcome.points,
        leveled_up,
        "answer credited"
    );

    Ok(CreditOutcome {
        session,
        points_awarded: outcome.points,
        leveled_up,
        new_trophies,
    })
}

/// Composite read for one game kind: answered and unanswered catalog
/// questions, suggestions, and the aggregated unlock state across all of
/// the user's sessions of that kind.
pub fn question_progress<S>(store: &S, user_id: Uuid, kind: GameKind) -> Result<QuestionProgress>
where
    S: AccountRepository + SessionRepository + QuestionCatalog + ?Sized,
{
    if store.get_account(user_id)?.is_none() {
        return Err(EngineError::AccountNotFound(user_id));
    }

    let catalog = store.questions_for_game(kind)?;

    let mut answered_ids: BTreeSet<i64> = BTreeSet::new();
    let mut correct_per_level: BTreeMap<u32, u32> = BTreeMap::new();
    let mut max_unlocked_level = 1;
    for session in store.sessions_for_user(user_id)? {
        if session.kind != kind {
            continue;
        }
        answered_ids.extend(session.answered.iter().copied());
        for (level, count) in &session.correct_per_level {
            let slot = correct_per_level.entry(*level).or_insert(0);
            *slot = slot.saturating_add(*count);
        }
        max_unlocked_level = max_unlocked_level.max(session.max_unlocked_level);
    }

    let suggestions = suggest_questions(&catalog, &answered_ids, max_unlocked_level);
    let (answered, unanswered): (Vec<_>, Vec<_>) = catalog
        .into_iter()
        .partition(|q| answered_ids.contains(&q.id));

    Ok(QuestionProgress {
        answered,
        unanswered,
        suggestions,
        max_unlocked_level,
        correct_per_level,
    })
}
