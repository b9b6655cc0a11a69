use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `1/5/2024, 3:04:05 PM`
const LOCAL_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

/// Printed for timestamps that cannot be represented.
pub const INVALID_DATE: &str = "Invalid Date";

/// The local UTC offset, falling back to UTC when it cannot be determined.
///
/// On Unix this only succeeds while the process is single-threaded, so call
/// it before starting a runtime.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Format `seconds` since the epoch as a human-readable time at `offset`.
pub fn format_timestamp(seconds: f64, offset: UtcOffset) -> String {
    if !seconds.is_finite() {
        return INVALID_DATE.to_string();
    }
    let nanos = (seconds * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|utc| utc.to_offset(offset).format(LOCAL_FORMAT).ok())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_utc() {
        assert_eq!(
            format_timestamp(1_700_000_000.0, UtcOffset::UTC),
            "11/14/2023, 10:13:20 PM"
        );
    }

    #[test]
    fn applies_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(format_timestamp(0.0, offset), "1/1/1970, 2:00:00 AM");
    }

    #[test]
    fn midnight_is_twelve_am() {
        assert_eq!(format_timestamp(0.0, UtcOffset::UTC), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn out_of_range_is_invalid() {
        assert_eq!(format_timestamp(f64::NAN, UtcOffset::UTC), INVALID_DATE);
        assert_eq!(format_timestamp(1.0e18, UtcOffset::UTC), INVALID_DATE);
    }
}
