//! Next occurrence of a weekly class in a given zone.

use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::start_time::StartTime;

/// ## Summary
/// Computes the soonest instant at or after `now` whose local wall clock in
/// `zone` falls on `weekday` at `start`.
///
/// The candidate is taken from the ISO week (Monday first) containing `now`
/// in `zone`; if it is already before `now` it moves forward seven calendar
/// days, keeping the local time across DST changes. An occurrence whose start
/// equals `now` to the second is still returned.
#[must_use]
pub fn next_occurrence(
    weekday: Weekday,
    start: StartTime,
    zone: Tz,
    now: DateTime<Utc>,
) -> DateTime<Tz> {
    let local_today = now.with_timezone(&zone).date_naive();
    let offset = i64::from(weekday.number_from_monday())
        - i64::from(local_today.weekday().number_from_monday());
    let date = local_today + TimeDelta::days(offset);

    let candidate = local_to_zoned(zone, date.and_time(start_time_of_day(start)));
    if candidate < now {
        let next_week = date + TimeDelta::days(7);
        local_to_zoned(zone, next_week.and_time(start_time_of_day(start)))
    } else {
        candidate
    }
}

fn start_time_of_day(start: StartTime) -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(start.hour(), start.minute(), 0).unwrap_or_default()
}

/// ## Summary
/// Resolves a local wall-clock time in `zone` to a single instant.
///
/// Ambiguous times (DST fold) take the earlier instant. Non-existent times
/// (DST gap) are shifted forward by one hour.
#[must_use]
pub fn local_to_zoned(zone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let shifted = local + TimeDelta::hours(1);
            tracing::trace!(%local, %shifted, %zone, "Local time falls in DST gap, shifting forward");
            zone.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| zone.from_utc_datetime(&local))
        }
    }
}
