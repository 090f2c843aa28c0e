//! Resolves canonical timezone names and converts instants to local time.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// Look up a timezone by its canonical IANA name, e.g. "America/Sao_Paulo".
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if the name is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}

/// The UTC offset of `timezone` at the instant `date_time`.
///
/// The offset is computed per instant, so daylight saving transitions are
/// respected for historical dates.
pub fn get_offset_at(timezone: &Tz, date_time: &OffsetDateTime) -> UtcOffset {
    timezone.get_offset_utc(date_time).to_utc()
}

/// Convert `date_time` to the wall clock time of `timezone`.
pub fn to_local(date_time: OffsetDateTime, timezone: &Tz) -> OffsetDateTime {
    date_time.to_offset(get_offset_at(timezone, &date_time))
}
