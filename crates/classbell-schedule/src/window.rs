//! Decides whether a lead-time reminder is due on the current tick.
//!
//! No delivery history is consulted: two ticks landing inside the same
//! window both report the reminder as due.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Tolerance around a reminder's target instant, in whole minutes.
///
/// A reminder is due while `target - now`, truncated to whole minutes, lies
/// in `[-grace_minutes, early_minutes]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    /// How late a tick may run and still send.
    pub grace_minutes: i64,
    /// How early a tick may run and already send.
    pub early_minutes: i64,
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self {
            grace_minutes: 10,
            early_minutes: 1,
        }
    }
}

impl ReminderWindow {
    #[must_use]
    pub const fn new(grace_minutes: i64, early_minutes: i64) -> Self {
        Self {
            grace_minutes,
            early_minutes,
        }
    }

    /// ## Summary
    /// Returns true when the reminder `minutes_before` the occurrence should
    /// be sent at `now`.
    #[must_use]
    pub fn is_due<Tz: TimeZone>(
        &self,
        occurrence: &DateTime<Tz>,
        minutes_before: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let target = occurrence.clone() - TimeDelta::minutes(i64::from(minutes_before));
        let diff_minutes = target.signed_duration_since(now).num_minutes();
        (-self.grace_minutes..=self.early_minutes).contains(&diff_minutes)
    }

    /// ## Summary
    /// Yields every lead time from `lead_times` that is due at `now`.
    pub fn due_lead_times<'a, Tz: TimeZone + 'a>(
        &'a self,
        occurrence: &'a DateTime<Tz>,
        lead_times: &'a [u32],
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = u32> + 'a {
        lead_times
            .iter()
            .copied()
            .filter(move |minutes_before| self.is_due(occurrence, *minutes_before, now))
    }
}

/// ## Summary
/// [`ReminderWindow::is_due`] with the default `[-10, +1]` minute window.
#[must_use]
pub fn is_due<Tz: TimeZone>(occurrence: &DateTime<Tz>, minutes_before: u32, now: DateTime<Utc>) -> bool {
    ReminderWindow::default().is_due(occurrence, minutes_before, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 13, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn minutes(m: i64) -> TimeDelta {
        TimeDelta::minutes(m)
    }

    #[test]
    fn test_window_boundaries() {
        let occ = occurrence();
        for lead in [10_u32, 5] {
            let target = occ - minutes(i64::from(lead));

            assert!(is_due(&occ, lead, target), "exactly on target");
            assert!(is_due(&occ, lead, target + minutes(10)), "10 minutes late");
            assert!(is_due(&occ, lead, target - minutes(1)), "1 minute early");
            assert!(!is_due(&occ, lead, target + minutes(11)), "11 minutes late");
            assert!(!is_due(&occ, lead, target - minutes(2)), "2 minutes early");
        }
    }

    #[test]
    fn test_partial_minutes_truncate_toward_zero() {
        let occ = occurrence();
        let target = occ - minutes(10);

        // 10m59s late truncates to -10: still due.
        assert!(is_due(&occ, 10, target + minutes(10) + TimeDelta::seconds(59)));
        // 1m59s early truncates to +1: still due.
        assert!(is_due(&occ, 10, target - minutes(1) - TimeDelta::seconds(59)));
        assert!(!is_due(&occ, 10, target - minutes(2)));
    }

    #[test]
    fn test_due_lead_times_independent() {
        let occ = occurrence();
        let lead_times = [10, 5];
        let window = ReminderWindow::default();

        let at_t10: Vec<u32> = window
            .due_lead_times(&occ, &lead_times, occ - minutes(10))
            .collect();
        assert_eq!(at_t10, vec![10]);

        // Five minutes before start both targets are within tolerance.
        let at_t5: Vec<u32> = window
            .due_lead_times(&occ, &lead_times, occ - minutes(5))
            .collect();
        assert_eq!(at_t5, vec![10, 5]);

        let long_before: Vec<u32> = window
            .due_lead_times(&occ, &lead_times, occ - minutes(30))
            .collect();
        assert!(long_before.is_empty());
    }

    #[test]
    fn test_custom_window() {
        let occ = occurrence();
        let strict = ReminderWindow::new(0, 0);

        assert!(strict.is_due(&occ, 10, occ - minutes(10)));
        assert!(!strict.is_due(&occ, 10, occ - minutes(9)));
        assert!(!strict.is_due(&occ, 10, occ - minutes(11)));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let occ = occurrence();
        let now = occ - minutes(7);
        assert_eq!(is_due(&occ, 5, now), is_due(&occ, 5, now));
    }
}
