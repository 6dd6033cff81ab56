//! Points-to-level calculation.
//!
//! Linear curve: one level per `points_per_level` points, floor level 1.
//! The curve shape is policy, not engine behavior; everything here is
//! driven by [`ProgressionPolicy`].

use crate::error::{ProgressionError, Result};
use crate::policy::ProgressionPolicy;
use crate::types::UserAccount;

/// Level for a cumulative point total. Total, deterministic, and monotone
/// non-decreasing in `total_points`; `level_for_points(0, _) == 1`.
pub fn level_for_points(total_points: u64, policy: &ProgressionPolicy) -> u32 {
    let per = policy.points_per_level.max(1);
    u32::try_from(total_points / per + 1).unwrap_or(u32::MAX)
}

/// Minimum cumulative total at which `level` is held.
pub fn points_for_level(level: u32, policy: &ProgressionPolicy) -> u64 {
    let per = policy.points_per_level.max(1);
    u64::from(level.saturating_sub(1)).saturating_mul(per)
}

/// Points still missing to reach the next level from `total_points`.
pub fn points_to_next_level(total_points: u64, policy: &ProgressionPolicy) -> u64 {
    let level = level_for_points(total_points, policy);
    points_for_level(level.saturating_add(1), policy).saturating_sub(total_points)
}

/// Result of applying a point grant to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantOutcome {
    pub previous_level: u32,
    pub new_level: u32,
}

impl GrantOutcome {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Add `delta` points to the account and re-derive `level` and
/// `points_to_next_level` from the updated total.
///
/// The caller decides whether a level change triggers a trophy re-check;
/// this function only reports it.
pub fn grant_points(
    account: &mut UserAccount,
    delta: u64,
    policy: &ProgressionPolicy,
) -> Result<GrantOutcome> {
    let total = account
        .total_points
        .checked_add(delta)
        .ok_or(ProgressionError::PointsOverflow {
            total: account.total_points,
            delta,
        })?;

    let previous_level = account.level;
    account.total_points = total;
    account.level = level_for_points(total, policy);
    account.points_to_next_level = points_to_next_level(total, policy);

    Ok(GrantOutcome {
        previous_level,
        new_level: account.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn policy() -> ProgressionPolicy {
        ProgressionPolicy::default()
    }

    #[test]
    fn zero_points_is_floor_level() {
        assert_eq!(level_for_points(0, &policy()), 1);
    }

    #[test]
    fn level_boundaries() {
        let p = policy();
        assert_eq!(level_for_points(99, &p), 1);
        assert_eq!(level_for_points(100, &p), 2);
        assert_eq!(level_for_points(199, &p), 2);
        assert_eq!(level_for_points(200, &p), 3);
    }

    #[test]
    fn level_is_monotone_in_points() {
        let p = policy();
        let mut previous = 0;
        for total in (0..2_000).step_by(7) {
            let level = level_for_points(total, &p);
            assert!(level >= previous, "level dropped at total={total}");
            previous = level;
        }
    }

    #[test]
    fn points_to_next_counts_down() {
        let p = policy();
        assert_eq!(points_to_next_level(0, &p), 100);
        assert_eq!(points_to_next_level(30, &p), 70);
        assert_eq!(points_to_next_level(100, &p), 100);
    }

    #[test]
    fn zero_step_policy_is_clamped() {
        let p = ProgressionPolicy {
            points_per_level: 0,
            ..ProgressionPolicy::default()
        };
        assert_eq!(level_for_points(5, &p), 6);
    }

    #[test]
    fn grant_reports_level_change() {
        let p = policy();
        let mut account = UserAccount::new(Uuid::new_v4(), "kim");

        let outcome = grant_points(&mut account, 30, &p).unwrap();
        assert!(!outcome.leveled_up());
        assert_eq!(account.level, 1);
        assert_eq!(account.points_to_next_level, 70);

        let outcome = grant_points(&mut account, 90, &p).unwrap();
        assert!(outcome.leveled_up());
        assert_eq!(outcome.previous_level, 1);
        assert_eq!(outcome.new_level, 2);
        assert_eq!(account.total_points, 120);
        assert_eq!(account.points_to_next_level, 80);
    }

    #[test]
    fn grant_overflow_is_an_error() {
        let p = policy();
        let mut account = UserAccount::new(Uuid::new_v4(), "kim");
        account.total_points = u64::MAX - 1;

        let err = grant_points(&mut account, 2, &p).unwrap_err();
        assert!(matches!(err, ProgressionError::PointsOverflow { .. }));
        // Failed grants leave the account untouched.
        assert_eq!(account.total_points, u64::MAX - 1);
    }

    #[test]
    fn stored_level_always_matches_recalculation() {
        let p = policy();
        let mut account = UserAccount::new(Uuid::new_v4(), "kim");
        for delta in [0, 1, 49, 50, 99, 100, 250, 1] {
            grant_points(&mut account, delta, &p).unwrap();
            assert_eq!(account.level, level_for_points(account.total_points, &p));
        }
    }
}
