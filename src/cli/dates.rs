use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{end_of_day, start_of_day};

use super::CliError;

/// How a date-only argument is widened to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

/// Parses RFC 3339 timestamps or `YYYY-MM-DD` dates.
pub fn parse_instant(raw: &str, bound: DayBound) -> Result<DateTime<Utc>, CliError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CliError::Input(format!(
            "`{}` is neither a YYYY-MM-DD date nor an RFC 3339 timestamp",
            raw
        ))
    })?;
    Ok(match bound {
        DayBound::Start => start_of_day(date),
        DayBound::End => end_of_day(date),
    })
}

pub fn parse_optional(
    raw: Option<&str>,
    bound: DayBound,
) -> Result<Option<DateTime<Utc>>, CliError> {
    raw.map(|value| parse_instant(value, bound)).transpose()
}
