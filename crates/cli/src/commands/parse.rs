//! Argument parsers for dates, times and periods

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use jiupluck_core::ErrorContext;
use jiupluck_http::types::{PeriodTemplate, ProposedTime};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

fn naive_datetime(value: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("invalid date-time '{value}' (expected YYYY-MM-DDTHH:MM)"))
}

/// Local date-time, normalized to `YYYY-MM-DDTHH:MM:SS`
pub fn datetime(value: &str) -> Result<String, String> {
    naive_datetime(value).map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}

pub fn date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.to_string())
        .with_context(|| format!("invalid date '{value}' (expected YYYY-MM-DD)"))
}

/// `START/END` candidate time for a room event
pub fn time_range(value: &str) -> Result<ProposedTime, String> {
    let (start, end) = value
        .split_once('/')
        .ok_or_else(|| format!("invalid time range '{value}' (expected START/END)"))?;
    let (start, end) = (naive_datetime(start.trim())?, naive_datetime(end.trim())?);

    if end <= start {
        return Err(format!("time range '{value}' ends before it starts"));
    }

    Ok(ProposedTime {
        start: start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        end: end.format("%Y-%m-%dT%H:%M:%S").to_string(),
    })
}

/// `NAME=HH:MM-HH:MM` period of a timetable template
pub fn period(value: &str) -> Result<PeriodTemplate, String> {
    let (name, range) = value
        .split_once('=')
        .ok_or_else(|| format!("invalid period '{value}' (expected NAME=HH:MM-HH:MM)"))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| format!("invalid period '{value}' (expected NAME=HH:MM-HH:MM)"))?;

    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M")
        .with_context(|| format!("invalid start time in period '{value}'"))?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M")
        .with_context(|| format!("invalid end time in period '{value}'"))?;
    if end <= start {
        return Err(format!("period '{value}' ends before it starts"));
    }

    Ok(PeriodTemplate {
        name: name.trim().to_string(),
        start: start.format("%H:%M").to_string(),
        end: end.format("%H:%M").to_string(),
    })
}
