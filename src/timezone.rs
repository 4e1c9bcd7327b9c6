//! Displaying server timestamps in the configured timezone, the way pt-BR users read them.

use time::{Month, OffsetDateTime};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Look up a canonical timezone name, e.g. "America/Sao_Paulo".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// Format `timestamp` as e.g. "01 de março de 2025 às 09:34:56" in `timezone`.
///
/// The offset is taken at `timestamp`, so daylight saving changes are respected.
pub fn format_local_datetime(timestamp: OffsetDateTime, timezone: &Tz) -> String {
    let offset = timezone.get_offset_utc(&timestamp).to_utc();
    let local = timestamp.to_offset(offset);

    format!(
        "{:02} de {} de {} às {:02}:{:02}:{:02}",
        local.day(),
        month_name(local.month()),
        local.year(),
        local.hour(),
        local.minute(),
        local.second()
    )
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janeiro",
        Month::February => "fevereiro",
        Month::March => "março",
        Month::April => "abril",
        Month::May => "maio",
        Month::June => "junho",
        Month::July => "julho",
        Month::August => "agosto",
        Month::September => "setembro",
        Month::October => "outubro",
        Month::November => "novembro",
        Month::December => "dezembro",
    }
}
