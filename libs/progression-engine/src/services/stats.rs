//! Read-only rollups over accounts, sessions, and the answer log.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use progression_core::daily_period;

use crate::error::{EngineError, Result};
use crate::models::{DailyActivity, GameKind, LeaderboardEntry, UserStats};
use crate::store::{AccountRepository, AnswerLog, SessionRepository, TrophyRepository};

/// Aggregate stats for one user across all game kinds.
pub fn user_stats<S>(store: &S, user_id: Uuid) -> Result<UserStats>
where
    S: AccountRepository + SessionRepository + TrophyRepository + AnswerLog + ?Sized,
{
    let account = store
        .get_account(user_id)?
        .ok_or(EngineError::AccountNotFound(user_id))?;
    let sessions = store.sessions_for_user(user_id)?;
    let awards = store.awards_for_user(user_id)?;
    let log = store.answers_for_user(user_id)?;

    let mut sessions_by_kind: BTreeMap<GameKind, u32> = BTreeMap::new();
    for session in &sessions {
        *sessions_by_kind.entry(session.kind).or_insert(0) += 1;
    }

    let correct_answers = log.iter().filter(|r| r.correct).count() as u32;
    let accuracy = if log.is_empty() {
        0.0
    } else {
        f64::from(correct_answers) / log.len() as f64
    };

    Ok(UserStats {
        user_id: account.id,
        display_name: account.display_name,
        total_points: account.total_points,
        level: account.level,
        points_to_next_level: account.points_to_next_level,
        daily_streak: account.daily_streak,
        sessions_played: sessions.len() as u32,
        sessions_completed: sessions.iter().filter(|s| s.completed).count() as u32,
        sessions_by_kind,
        total_score: sessions.iter().map(|s| u64::from(s.score)).sum(),
        answers: log.len() as u32,
        correct_answers,
        accuracy,
        trophies: awards.len() as u32,
    })
}

/// Top accounts by lifetime points. Ties rank by display name, then id,
/// so the ordering is stable across calls. Ranks are 1-based.
pub fn leaderboard<S>(store: &S, limit: usize) -> Result<Vec<LeaderboardEntry>>
where
    S: AccountRepository + ?Sized,
{
    let mut accounts = store.all_accounts()?;
    accounts.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(accounts
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, account)| LeaderboardEntry {
            rank: i as u32 + 1,
            user_id: account.id,
            display_name: account.display_name,
            total_points: account.total_points,
            level: account.level,
        })
        .collect())
}

/// Answer volume for the trailing `days` days, one entry per day with
/// zeroes for inactive days, oldest first. Days are bounded by the daily
/// reset hour, matching the objective periods.
pub fn daily_activity<S>(
    store: &S,
    user_id: Uuid,
    days: usize,
    now: DateTime<Utc>,
    reset_hour: u32,
) -> Result<Vec<DailyActivity>>
where
    S: AccountRepository + AnswerLog + ?Sized,
{
    if store.get_account(user_id)?.is_none() {
        return Err(EngineError::AccountNotFound(user_id));
    }

    let mut by_day: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();
    for record in store.answers_for_user(user_id)? {
        let day = daily_period(record.recorded_at, reset_hour);
        let entry = by_day.entry(day).or_insert(DailyActivity {
            date: day,
            answers: 0,
            correct: 0,
            points: 0,
        });
        entry.answers += 1;
        if record.correct {
            entry.correct += 1;
        }
        entry.points += u64::from(record.points);
    }

    let today = daily_period(now, reset_hour);
    let mut data = Vec::with_capacity(days);
    for i in 0..days {
        let date = today - Days::new(i as u64);
        data.push(by_day.remove(&date).unwrap_or(DailyActivity {
            date,
            answers: 0,
            correct: 0,
            points: 0,
        }));
    }
    data.reverse();
    Ok(data)
}
