//! Trophy cascade awarder.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use progression_core::{grant_points, ProgressionPolicy};

use crate::error::Result;
use crate::models::{TrophyAward, TrophyDefinition, UserAccount};
use crate::store::TrophyRepository;

/// Award every unearned trophy whose level requirement the account meets.
///
/// Definitions are scanned in ascending requirement order, so points
/// granted by one award can raise the level far enough to satisfy later
/// definitions within the same pass. Mutates the account in memory; the
/// caller persists it. Returns the newly awarded definitions.
pub fn award_eligible<S>(
    store: &S,
    account: &mut UserAccount,
    policy: &ProgressionPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<TrophyDefinition>>
where
    S: TrophyRepository + ?Sized,
{
    let mut definitions = store.trophy_definitions()?;
    definitions.sort_by(|a, b| {
        a.required_level
            .cmp(&b.required_level)
            .then_with(|| a.name.cmp(&b.name))
    });

    let earned: BTreeSet<String> = store
        .awards_for_user(account.id)?
        .into_iter()
        .map(|a| a.trophy)
        .collect();

    let mut newly_awarded = Vec::new();
    for def in definitions {
        if def.required_level > account.level || earned.contains(&def.name) {
            continue;
        }

        let award = TrophyAward::new(account.id, def.name.as_str(), now);
        if !store.insert_award(&award)? {
            // Another writer created the award between our scan and now;
            // the store's uniqueness check is the source of truth.
            continue;
        }

        grant_points(account, u64::from(def.points), policy)?;
        tracing::info!(
            user_id = %account.id,
            trophy = %def.name,
            points = def.points,
            level = account.level,
            "trophy awarded"
        );
        newly_awarded.push(def);
    }

    Ok(newly_awarded)
}
