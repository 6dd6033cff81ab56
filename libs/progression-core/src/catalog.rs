//! Built-in trophy and objective catalogs.
//!
//! Deployments can supply their own definitions through the stores; these
//! defaults give a fresh install a sensible ladder.

use crate::types::{
    ObjectiveCadence, ObjectiveCategory, ObjectiveDefinition, TrophyDefinition, TrophyRarity,
};

fn trophy(name: &str, rarity: TrophyRarity, points: u32, required_level: u32) -> TrophyDefinition {
    TrophyDefinition {
        name: name.to_string(),
        rarity,
        points,
        required_level,
    }
}

/// The default trophy ladder, ascending by required level.
pub fn default_trophies() -> Vec<TrophyDefinition> {
    use TrophyRarity::*;
    vec![
        trophy("First Steps", Common, 10, 1),
        trophy("Quick Learner", Common, 15, 2),
        trophy("Dedicated Student", Common, 20, 3),
        trophy("Rising Star", Rare, 30, 5),
        trophy("Knowledge Seeker", Rare, 40, 8),
        trophy("Honor Roll", Rare, 50, 10),
        trophy("Scholar", Epic, 75, 15),
        trophy("Brainiac", Epic, 100, 20),
        trophy("Sage", Legendary, 150, 30),
        trophy("Grandmaster", Legendary, 250, 50),
    ]
}

fn objective(
    id: &str,
    title: &str,
    category: ObjectiveCategory,
    cadence: ObjectiveCadence,
    target: u32,
    reward: u32,
) -> ObjectiveDefinition {
    ObjectiveDefinition {
        id: id.to_string(),
        title: title.to_string(),
        category,
        cadence,
        target,
        reward,
    }
}

/// The default objective catalog: one of each category per cadence.
pub fn default_objectives() -> Vec<ObjectiveDefinition> {
    use ObjectiveCadence::*;
    use ObjectiveCategory::*;
    vec![
        objective("daily_games", "Finish 3 games", Games, Daily, 3, 20),
        objective("daily_score", "Score 50 points", Score, Daily, 50, 25),
        objective(
            "daily_variety",
            "Finish 2 different game types",
            Variety,
            Daily,
            2,
            30,
        ),
        objective("weekly_games", "Finish 15 games", Games, Weekly, 15, 75),
        objective("weekly_score", "Score 300 points", Score, Weekly, 300, 100),
        objective(
            "weekly_variety",
            "Finish every game type",
            Variety,
            Weekly,
            4,
            60,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn trophies_ascend_by_required_level_with_unique_names() {
        let trophies = default_trophies();
        let names: BTreeSet<_> = trophies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), trophies.len());

        for pair in trophies.windows(2) {
            assert!(pair[0].required_level <= pair[1].required_level);
        }
        assert_eq!(trophies[0].required_level, 1);
    }

    #[test]
    fn objective_ids_are_unique_and_targets_positive() {
        let objectives = default_objectives();
        let ids: BTreeSet<_> = objectives.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), objectives.len());

        for o in &objectives {
            assert!(o.target > 0);
        }
    }
}
