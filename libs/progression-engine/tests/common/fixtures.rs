//! Factory functions for engine test data.

use uuid::Uuid;

use progression_core::{
    GameKind, ObjectiveCadence, ObjectiveCategory, ObjectiveDefinition, QuestionRef,
    TrophyDefinition, TrophyRarity,
};
use progression_engine::AnswerEvent;

/// Catalog question of the given difficulty.
pub fn question(id: i64, difficulty: u32, kind: GameKind) -> QuestionRef {
    QuestionRef {
        id,
        difficulty,
        category: "arithmetic".to_string(),
        kind,
    }
}

/// Quiz catalog with `per_level` questions at each difficulty from 1 to
/// `levels`, ids assigned sequentially from 1.
pub fn quiz_catalog(levels: u32, per_level: u32) -> Vec<QuestionRef> {
    let mut questions = Vec::new();
    let mut id = 1;
    for difficulty in 1..=levels {
        for _ in 0..per_level {
            questions.push(question(id, difficulty, GameKind::Quiz));
            id += 1;
        }
    }
    questions
}

/// Correct-answer event.
pub fn correct(
    user_id: Uuid,
    session_key: &str,
    kind: GameKind,
    question_id: i64,
    difficulty: u32,
) -> AnswerEvent {
    AnswerEvent {
        user_id,
        session_key: session_key.to_string(),
        kind,
        question_id,
        correct: true,
        difficulty: Some(difficulty),
    }
}

/// Incorrect-answer event.
pub fn wrong(user_id: Uuid, session_key: &str, kind: GameKind, question_id: i64) -> AnswerEvent {
    AnswerEvent {
        user_id,
        session_key: session_key.to_string(),
        kind,
        question_id,
        correct: false,
        difficulty: None,
    }
}

/// Common-rarity trophy with the given level requirement.
pub fn trophy(name: &str, required_level: u32, points: u32) -> TrophyDefinition {
    TrophyDefinition {
        name: name.to_string(),
        rarity: TrophyRarity::Common,
        points,
        required_level,
    }
}

/// Objective definition; the id doubles as the title.
pub fn objective(
    id: &str,
    category: ObjectiveCategory,
    cadence: ObjectiveCadence,
    target: u32,
    reward: u32,
) -> ObjectiveDefinition {
    ObjectiveDefinition {
        id: id.to_string(),
        title: id.to_string(),
        category,
        cadence,
        target,
        reward,
    }
}
