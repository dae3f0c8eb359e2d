//! Parsing helpers for dates, timezones, and output format.

use chrono::NaiveDate;

/// Parse a calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {}", value))
}

/// Parse an IANA timezone name. Empty or "auto" means the system zone.
pub fn parse_timezone(value: &str) -> anyhow::Result<Option<chrono_tz::Tz>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    trimmed
        .parse::<chrono_tz::Tz>()
        .map(Some)
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", trimmed))
}

/// Output format for the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("pretty") => Ok(Some(OutputFormat::Pretty)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use pretty or plain)",
            other
        )),
    }
}
