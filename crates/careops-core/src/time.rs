//! Pure duration arithmetic over immutable instants.
//!
//! Every helper returns a new value and never mutates its input, so due-date
//! computation stays independently testable and free of aliasing bugs. Rule
//! code threads an explicit `now` through these helpers; [`now_utc`] is the
//! single place the wall clock is read.

use time::macros::time;
use time::{Date, Duration, OffsetDateTime};

/// Current instant in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// `t` plus a number of hours.
pub fn hours_from(t: OffsetDateTime, hours: i64) -> OffsetDateTime {
    t + Duration::hours(hours)
}

/// `t` plus a number of days.
pub fn days_from(t: OffsetDateTime, days: i64) -> OffsetDateTime {
    t + Duration::days(days)
}

/// Fractional hours from `now` until `target`. Negative when `target` is in
/// the past.
pub fn hours_until(now: OffsetDateTime, target: OffsetDateTime) -> f64 {
    (target - now).whole_seconds() as f64 / 3600.0
}

/// Whole calendar days from `today` until `target`. Negative when `target`
/// is in the past, zero when it is today.
pub fn days_until_date(today: Date, target: Date) -> i64 {
    (target - today).whole_days()
}

/// The last second of `date`, as a UTC instant.
pub fn end_of_day_utc(date: Date) -> OffsetDateTime {
    date.with_time(time!(23:59:59)).assume_utc()
}

/// Age in completed years on `today` for someone born on `dob`.
pub fn age_in_years(dob: Date, today: Date) -> i64 {
    let mut years = i64::from(today.year() - dob.year());
    if (u8::from(today.month()), today.day()) < (u8::from(dob.month()), dob.day()) {
        years -= 1;
    }
    years
}

/// Completed calendar months from `from` to `to`.
pub fn months_between(from: Date, to: Date) -> i64 {
    let mut months = i64::from(to.year() - from.year()) * 12
        + i64::from(u8::from(to.month())) - i64::from(u8::from(from.month()));
    if to.day() < from.day() {
        months -= 1;
    }
    months
}
