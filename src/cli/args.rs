use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use reminder_recurrence::models::recurrence::{weekday_from_code, RecurrenceRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

pub fn parse_year_month(value: &str) -> Result<YearMonth, String> {
    let (year, month) = value
        .trim()
        .split_once('-')
        .ok_or_else(|| "expected YYYY-MM".to_string())?;

    let year = year.parse::<i32>().map_err(|e| format!("invalid year: {}", e))?;
    let month = month.parse::<u32>().map_err(|e| format!("invalid month: {}", e))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {}", month));
    }

    Ok(YearMonth { year, month })
}

/// Local wall-clock time as `YYYY-MM-DD HH:MM` (or with `T`), or RFC 3339.
pub fn parse_local_datetime(value: &str) -> Result<DateTime<Local>, String> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Local));
    }

    let naive = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM, got {:?}", value))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("{} does not exist in the local time zone", naive))
}

pub fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| format!("expected RFC 3339: {}", e))
}

/// Weekly rule from a comma-separated list of two-letter weekday codes.
pub fn parse_weekly_days(value: &str) -> Result<RecurrenceRule, String> {
    let days = value
        .split(',')
        .map(|code| {
            let code = code.trim().to_uppercase();
            weekday_from_code(&code).ok_or_else(|| format!("unknown weekday code {:?}", code))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecurrenceRule::weekly_on(days))
}
