use chrono::NaiveDate;

use crate::config::LeaseTerms;

/// Expected odometer reading on `today` if the allowance is driven evenly.
///
/// `floor(days_elapsed * total_allowed / duration_days)`. Days before the
/// lease start are not clamped and give a negative reading, rounded toward
/// negative infinity rather than toward zero.
pub fn estimate(lease_start: NaiveDate, total_allowed: f64, duration_days: f64, today: NaiveDate) -> i64 {
    let days_elapsed = (today - lease_start).num_days();
    let daily_rate = total_allowed / duration_days;
    (days_elapsed as f64 * daily_rate).floor() as i64
}

/// [`estimate`] for configured lease terms
pub fn estimate_for(lease: &LeaseTerms, today: NaiveDate) -> i64 {
    estimate(lease.start, lease.total_allowed, lease.duration_days, today)
}
