//! Time related utils.

use crate::Error;
use chrono::Utc;

/// DateTime in UTC, the only flavor used for signing.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Whole seconds since the unix epoch for the given time.
///
/// Signing timestamps are always expressed this way. Times before the epoch
/// cannot be signed with.
pub fn unix_timestamp(time: DateTime) -> crate::Result<u64> {
    u64::try_from(time.timestamp())
        .map_err(|_| Error::clock_invalid("system clock reads before the unix epoch"))
}
