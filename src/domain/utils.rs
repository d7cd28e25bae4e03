//! Shared clock layouts and argument helpers for the tool, resource and prompt handlers

use std::fmt::Display;

use chrono::{DateTime, Offset, SecondsFormat, TimeZone};

use crate::mcp::registry::PromptArguments;

pub const TIME_ISO_LAYOUT: &str = "%H:%M:%S";
pub const TIME_HUMAN_LAYOUT: &str = "%-I:%M:%S %p %Z";
pub const DATE_ISO_LAYOUT: &str = "%Y-%m-%d";
pub const DATE_HUMAN_LAYOUT: &str = "%A, %B %-d, %Y";
pub const DATETIME_ISO_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATETIME_HUMAN_LAYOUT: &str = "%A, %B %-d, %Y at %-I:%M:%S %p %Z";
pub const STATUS_CLOCK_LAYOUT: &str = "%Y-%m-%d %H:%M:%S %Z";

pub fn format_with<Tz>(now: &DateTime<Tz>, layout: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !layout.contains("%Z") {
        return now.format(layout).to_string();
    }

    let zone = zone_label(now);
    now.format(&layout.replace("%Z", &zone)).to_string()
}

/// `UTC` for a zero offset, `+HH:MM` otherwise.
pub fn zone_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let offset = now.offset().fix();
    if offset.local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        offset.to_string()
    }
}

/// Second precision, `Z` for UTC, numeric offset otherwise.
pub fn format_rfc3339<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn format_unix_seconds<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    now.timestamp().to_string()
}

/// Empty values count as absent.
pub fn argument_or_default<'a>(
    arguments: &'a PromptArguments,
    key: &str,
    default: &'a str,
) -> &'a str {
    arguments
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;

    #[test]
    fn human_layouts_drop_leading_zeros() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 5, 7, 4, 9)
            .single()
            .expect("valid timestamp");

        assert_eq!(format_with(&now, TIME_HUMAN_LAYOUT), "7:04:09 AM UTC");
        assert_eq!(format_with(&now, DATE_HUMAN_LAYOUT), "Thursday, March 5, 2026");
        assert_eq!(format_with(&now, TIME_ISO_LAYOUT), "07:04:09");
    }

    #[test]
    fn rfc3339_uses_z_for_utc_and_offset_otherwise() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 18, 30, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_rfc3339(&now), "2026-10-19T18:30:00Z");

        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let shifted = now.with_timezone(&offset);
        assert_eq!(format_rfc3339(&shifted), "2026-10-19T20:30:00+02:00");
        assert_eq!(format_unix_seconds(&shifted), format_unix_seconds(&now));
    }

    #[test]
    fn zone_label_names_utc_for_zero_offsets() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 18, 30, 0)
            .single()
            .expect("valid timestamp");
        let zero = now.with_timezone(&FixedOffset::east_opt(0).expect("valid offset"));
        let west = now.with_timezone(&FixedOffset::west_opt(5 * 3600).expect("valid offset"));

        assert_eq!(zone_label(&now), "UTC");
        assert_eq!(format_with(&zero, TIME_HUMAN_LAYOUT), "6:30:00 PM UTC");
        assert_eq!(format_with(&zero, STATUS_CLOCK_LAYOUT), "2026-10-19 18:30:00 UTC");
        assert_eq!(format_with(&west, TIME_HUMAN_LAYOUT), "1:30:00 PM -05:00");
    }

    #[test]
    fn empty_argument_falls_back_to_default() {
        let mut arguments = PromptArguments::new();
        arguments.insert("topic".to_string(), String::new());
        arguments.insert("level".to_string(), "graduate".to_string());

        assert_eq!(argument_or_default(&arguments, "topic", "algebra"), "algebra");
        assert_eq!(argument_or_default(&arguments, "level", "intro"), "graduate");
        assert_eq!(argument_or_default(&arguments, "style", "balanced"), "balanced");
    }
}
