//! Period keys for objective tracking.
//!
//! A period key is the calendar date identifying one objective window: the
//! adjusted day for daily objectives, the ISO-week Monday for weekly ones.
//! Callers pass `now` explicitly so period math stays deterministic.

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Utc};

use crate::types::ObjectiveCadence;

/// Adjusted "today" for a daily reset hour.
///
/// Before the reset hour the day still counts as yesterday, so late-night
/// play lands in the previous period. A reset hour of 0 yields the plain
/// calendar date.
pub fn daily_period(now: DateTime<Utc>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Days::new(1)).date_naive()
    } else {
        now.date_naive()
    }
}

/// Monday of the ISO week containing the adjusted day.
pub fn weekly_period(now: DateTime<Utc>, daily_reset_hour: u32) -> NaiveDate {
    let day = daily_period(now, daily_reset_hour);
    day - Days::new(u64::from(day.weekday().num_days_from_monday()))
}

/// Period key for an objective cadence.
pub fn period_for(cadence: ObjectiveCadence, now: DateTime<Utc>, daily_reset_hour: u32) -> NaiveDate {
    match cadence {
        ObjectiveCadence::Daily => daily_period(now, daily_reset_hour),
        ObjectiveCadence::Weekly => weekly_period(now, daily_reset_hour),
    }
}
