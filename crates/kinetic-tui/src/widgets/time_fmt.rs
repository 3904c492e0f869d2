//! Timestamp rendering in the viewer's local time zone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render an ISO-8601 timestamp in local time.
///
/// Timestamps without an offset (the BAQ date columns) are taken as local
/// already. Anything unparseable is shown as received.
pub fn fmt_local(raw: &str) -> String {
    fmt_in(raw, &Local)
}

fn fmt_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map_or_else(
            || raw.to_owned(),
            |dt| dt.format(DISPLAY_FORMAT).to_string(),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn zoned_timestamps_convert_to_the_target_zone() {
        assert_eq!(fmt_in("2024-01-01T00:00:00Z", &Utc), "2024-01-01 00:00:00");
        assert_eq!(fmt_in("2024-01-01T00:00:00.000Z", &Utc), "2024-01-01 00:00:00");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(fmt_in("2024-01-01T00:00:00Z", &plus_two), "2024-01-01 02:00:00");
    }

    #[test]
    fn naive_timestamps_are_already_local() {
        assert_eq!(fmt_in("2024-03-01T08:30:00", &Utc), "2024-03-01 08:30:00");
        assert_eq!(fmt_in("2024-03-01T08:30:00.500", &Utc), "2024-03-01 08:30:00");
    }

    #[test]
    fn unparseable_input_is_shown_as_is() {
        assert_eq!(fmt_in("next tuesday", &Utc), "next tuesday");
        assert_eq!(fmt_in("", &Utc), "");
    }
}
