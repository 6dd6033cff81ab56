//! Answer-credit transitions on a game session.
//!
//! These are the pure rules; account lookup, point grants, and the trophy
//! and objective follow-ups live in the engine crate.

use chrono::{DateTime, Utc};

use crate::error::{ProgressionError, Result};
use crate::policy::ProgressionPolicy;
use crate::types::GameSession;

/// Outcome of recording one answer on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// A correct answer was credited for the first time.
    pub newly_correct: bool,
    /// Points this answer earned (the question difficulty, or 0).
    pub points: u32,
    /// The difficulty level this answer unlocked, if any.
    pub unlocked_level: Option<u32>,
    /// This answer flipped the session to completed.
    pub newly_completed: bool,
}

impl AnswerOutcome {
    fn none() -> Self {
        Self {
            newly_correct: false,
            points: 0,
            unlocked_level: None,
            newly_completed: false,
        }
    }
}

impl GameSession {
    /// Record one answer event.
    ///
    /// Correct answers are credited once per question id: re-answering a
    /// question already in `answered` earns nothing. An incorrect answer
    /// moves the question id to `wrong_answers` so it can be retried.
    ///
    /// A missing difficulty (or a 0, which no catalog question carries)
    /// still records the answer but skips points, the per-level counter,
    /// and the unlock check.
    pub fn record_answer(
        &mut self,
        question_id: i64,
        correct: bool,
        difficulty: Option<u32>,
        policy: &ProgressionPolicy,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome> {
        let difficulty = difficulty.filter(|d| *d >= 1);
        let mut outcome = AnswerOutcome::none();

        if correct {
            let newly_correct = self.answered.insert(question_id);
            self.wrong_answers.remove(&question_id);

            if newly_correct {
                outcome.newly_correct = true;
                if let Some(level) = difficulty {
                    self.score = self.score.checked_add(level).ok_or(
                        ProgressionError::ScoreOverflow {
                            score: self.score,
                            delta: level,
                        },
                    )?;
                    outcome.points = level;
                    outcome.unlocked_level = self.bump_level_counter(level, policy);
                }
            }
        } else {
            self.wrong_answers.insert(question_id);
            self.answered.remove(&question_id);
        }

        // Memory, matching, and sorting are single trials finished by a
        // correct answer; a quiz round is finished by any answer.
        let finishes = if self.kind.is_single_trial() { correct } else { true };
        if finishes && !self.completed {
            self.completed = true;
            outcome.newly_completed = true;
        }

        self.updated_at = now;
        Ok(outcome)
    }

    /// Increment the correct-answer counter for `level` and apply the
    /// unlock rule: reaching the threshold while `max_unlocked_level` is
    /// still <= `level` opens `level + 1`. Monotone and idempotent; counts
    /// past the threshold never re-unlock.
    fn bump_level_counter(&mut self, level: u32, policy: &ProgressionPolicy) -> Option<u32> {
        let count = self.correct_per_level.entry(level).or_insert(0);
        *count = count.saturating_add(1);

        if *count >= policy.unlock_threshold.max(1) && self.max_unlocked_level <= level {
            self.max_unlocked_level = level + 1;
            return Some(level + 1);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameKind;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn policy(threshold: u32) -> ProgressionPolicy {
        ProgressionPolicy {
            unlock_threshold: threshold,
            ..ProgressionPolicy::default()
        }
    }

    fn session(kind: GameKind) -> GameSession {
        GameSession::new(Uuid::new_v4(), "s-1", kind, Utc::now())
    }

    #[test]
    fn correct_answer_credits_once() {
        let p = policy(5);
        let mut s = session(GameKind::Quiz);

        let first = s.record_answer(7, true, Some(3), &p, Utc::now()).unwrap();
        assert!(first.newly_correct);
        assert_eq!(first.points, 3);
        assert_eq!(s.score, 3);

        let second = s.record_answer(7, true, Some(3), &p, Utc::now()).unwrap();
        assert!(!second.newly_correct);
        assert_eq!(second.points, 0);
        assert_eq!(s.score, 3);
        assert_eq!(s.answered.len(), 1);
    }

    #[test]
    fn wrong_then_correct_supports_retry() {
        let p = policy(5);
        let mut s = session(GameKind::Quiz);

        s.record_answer(7, false, Some(2), &p, Utc::now()).unwrap();
        assert!(s.wrong_answers.contains(&7));
        assert!(!s.answered.contains(&7));

        let retry = s.record_answer(7, true, Some(2), &p, Utc::now()).unwrap();
        assert!(retry.newly_correct);
        assert!(s.answered.contains(&7));
        assert!(!s.wrong_answers.contains(&7));
    }

    #[test]
    fn correct_then_wrong_reopens_question() {
        let p = policy(5);
        let mut s = session(GameKind::Quiz);

        s.record_answer(7, true, Some(2), &p, Utc::now()).unwrap();
        s.record_answer(7, false, Some(2), &p, Utc::now()).unwrap();
        assert!(!s.answered.contains(&7));
        assert!(s.wrong_answers.contains(&7));
    }

    #[test]
    fn wrong_answers_do_not_duplicate() {
        let p = policy(5);
        let mut s = session(GameKind::Quiz);

        s.record_answer(7, false, None, &p, Utc::now()).unwrap();
        s.record_answer(7, false, None, &p, Utc::now()).unwrap();
        assert_eq!(s.wrong_answers.len(), 1);
    }

    #[test]
    fn threshold_walk_unlocks_exactly_once() {
        let p = policy(3);
        let mut s = session(GameKind::Quiz);

        for id in [1, 2] {
            let out = s.record_answer(id, true, Some(1), &p, Utc::now()).unwrap();
            assert_eq!(out.unlocked_level, None);
            assert_eq!(s.max_unlocked_level, 1);
        }

        let third = s.record_answer(3, true, Some(1), &p, Utc::now()).unwrap();
        assert_eq!(third.unlocked_level, Some(2));
        assert_eq!(s.max_unlocked_level, 2);

        let fourth = s.record_answer(4, true, Some(1), &p, Utc::now()).unwrap();
        assert_eq!(fourth.unlocked_level, None);
        assert_eq!(s.max_unlocked_level, 2);
    }

    #[test]
    fn unlock_ceiling_never_regresses() {
        let p = policy(2);
        let mut s = session(GameKind::Quiz);

        for id in [1, 2] {
            s.record_answer(id, true, Some(3), &p, Utc::now()).unwrap();
        }
        assert_eq!(s.max_unlocked_level, 4);

        // Reaching the threshold at a lower level must not pull it back.
        for id in [10, 11] {
            s.record_answer(id, true, Some(1), &p, Utc::now()).unwrap();
        }
        assert_eq!(s.max_unlocked_level, 4);
    }

    #[test]
    fn missing_difficulty_still_records_the_answer() {
        let p = policy(1);
        let mut s = session(GameKind::Quiz);

        let out = s.record_answer(9, true, None, &p, Utc::now()).unwrap();
        assert!(out.newly_correct);
        assert_eq!(out.points, 0);
        assert_eq!(out.unlocked_level, None);
        assert!(s.answered.contains(&9));
        assert!(s.correct_per_level.is_empty());
        assert_eq!(s.score, 0);

        // A difficulty of 0 is treated the same way.
        let out = s.record_answer(10, true, Some(0), &p, Utc::now()).unwrap();
        assert_eq!(out.points, 0);
        assert!(s.correct_per_level.is_empty());
    }

    #[test]
    fn quiz_completes_on_any_answer() {
        let p = policy(5);
        let mut s = session(GameKind::Quiz);

        let out = s.record_answer(1, false, Some(1), &p, Utc::now()).unwrap();
        assert!(out.newly_completed);
        assert!(s.completed);

        let again = s.record_answer(2, true, Some(1), &p, Utc::now()).unwrap();
        assert!(!again.newly_completed);
    }

    #[test]
    fn single_trial_completes_only_on_correct() {
        let p = policy(5);
        for kind in [GameKind::Memory, GameKind::Matching, GameKind::Sorting] {
            let mut s = session(kind);

            let wrong = s.record_answer(1, false, Some(1), &p, Utc::now()).unwrap();
            assert!(!wrong.newly_completed);
            assert!(!s.completed);

            let right = s.record_answer(1, true, Some(1), &p, Utc::now()).unwrap();
            assert!(right.newly_completed);
            assert!(s.completed);
        }
    }

    #[test]
    fn per_level_counts_only_grow() {
        let p = policy(10);
        let mut s = session(GameKind::Quiz);

        s.record_answer(1, true, Some(2), &p, Utc::now()).unwrap();
        s.record_answer(1, false, Some(2), &p, Utc::now()).unwrap();
        s.record_answer(1, true, Some(2), &p, Utc::now()).unwrap();

        // The retry credits the counter again; it never decrements.
        assert_eq!(s.correct_at_level(2), 2);
    }
}
