//! Pure expiry decisions over interview timestamps.
//!
//! Every function here is total: absent or nonsensical inputs degrade to
//! "not expired" rather than erroring. The evaluation instant is always an
//! explicit argument so callers decide where "now" comes from.

use chrono::{DateTime, TimeDelta, Utc};

/// Instant at which a started interview runs out of time.
///
/// Returns `None` when the interview has not started, has no limit, or the
/// limit is non-positive.
#[must_use]
pub fn expiry_instant(
    started_at: Option<DateTime<Utc>>,
    time_limit_minutes: Option<i32>,
) -> Option<DateTime<Utc>> {
    let started_at = started_at?;
    let minutes = time_limit_minutes.filter(|m| *m > 0)?;
    let limit = TimeDelta::try_minutes(i64::from(minutes))?;
    started_at.checked_add_signed(limit)
}

/// Whether an interview is expired at `now`.
///
/// Completion always wins over expiry, and exactly reaching the limit is not
/// yet expired.
#[must_use]
pub fn is_expired(
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    time_limit_minutes: Option<i32>,
    now: DateTime<Utc>,
) -> bool {
    if completed_at.is_some() {
        return false;
    }
    expiry_instant(started_at, time_limit_minutes).is_some_and(|deadline| now > deadline)
}

/// Time left before expiry, clamped at zero.
///
/// `None` when there is nothing to count down (not started or unlimited).
#[must_use]
pub fn remaining(
    started_at: Option<DateTime<Utc>>,
    time_limit_minutes: Option<i32>,
    now: DateTime<Utc>,
) -> Option<TimeDelta> {
    let deadline = expiry_instant(started_at, time_limit_minutes)?;
    Some((deadline - now).max(TimeDelta::zero()))
}
