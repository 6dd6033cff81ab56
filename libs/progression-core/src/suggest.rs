//! Question suggestion for the progress sidebar.
//!
//! Pure and deterministic: the same catalog, answered set, and ceiling
//! always produce the same ordered suggestions.

use std::collections::BTreeSet;

use crate::types::QuestionRef;

/// Pick the questions a learner should try next.
///
/// Priority order:
/// 1. nothing unanswered: empty result
/// 2. nothing answered yet: all unanswered questions at the lowest
///    difficulty present among them
/// 3. unanswered questions at or above `max_difficulty_reached`
/// 4. if rule 3 matches nothing, unanswered questions at the single
///    highest difficulty present among them
///
/// The result is sorted ascending by difficulty, stable with respect to
/// catalog order for ties.
pub fn suggest_questions(
    all_questions: &[QuestionRef],
    answered: &BTreeSet<i64>,
    max_difficulty_reached: u32,
) -> Vec<QuestionRef> {
    let unanswered: Vec<&QuestionRef> = all_questions
        .iter()
        .filter(|q| !answered.contains(&q.id))
        .collect();
    if unanswered.is_empty() {
        return Vec::new();
    }

    let picked: Vec<&QuestionRef> = if answered.is_empty() {
        let floor = unanswered.iter().map(|q| q.difficulty).min().unwrap_or(1);
        unanswered
            .iter()
            .copied()
            .filter(|q| q.difficulty == floor)
            .collect()
    } else {
        let at_or_above: Vec<&QuestionRef> = unanswered
            .iter()
            .copied()
            .filter(|q| q.difficulty >= max_difficulty_reached)
            .collect();
        if at_or_above.is_empty() {
            let top = unanswered.iter().map(|q| q.difficulty).max().unwrap_or(1);
            unanswered
                .iter()
                .copied()
                .filter(|q| q.difficulty == top)
                .collect()
        } else {
            at_or_above
        }
    };

    let mut suggestions: Vec<QuestionRef> = picked.into_iter().cloned().collect();
    suggestions.sort_by_key(|q| q.difficulty);
    suggestions
}
