// Date utility functions
// Day-level calendar arithmetic shared by the recurrence engine and the store

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, Offset, TimeZone};

/// Calendar date of an instant, read in the instant's own zone.
pub fn truncate_to_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

pub fn same_date(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    same_date(date1.date_naive(), date2.date_naive())
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Adds calendar months, clamping the day to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = total.div_euclid(12) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Adds calendar years with the same clamping as [`add_months`]
/// (Feb 29 + 1 year = Feb 28).
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

/// Earlier candidate of a local time lookup, compared by UTC. Some zones
/// (including `Local`) report an ambiguous pair later-first, so
/// `LocalResult::earliest` is not enough.
pub fn earlier_instant<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Tz>> {
    match result {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(a, b) => Some(a.min(b)),
        LocalResult::None => None,
    }
}

/// Later candidate of a local time lookup, compared by UTC.
pub fn later_instant<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Tz>> {
    match result {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(a, b) => Some(a.max(b)),
        LocalResult::None => None,
    }
}

/// First instant of `date` in `tz`. If midnight is skipped by a DST change
/// the day starts where the gap ends.
pub fn start_of_day_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;

    earlier_instant(tz.from_local_datetime(&midnight)).or_else(|| {
        let before = tz.offset_from_utc_datetime(&(midnight - Duration::days(1)));
        let offset = before.fix().local_minus_utc();
        Some(tz.from_utc_datetime(&(midnight - Duration::seconds(offset as i64))))
    })
}

/// Last whole second of `date` in `tz`. If 23:59:59 is skipped, the second
/// before the next day starts.
pub fn end_of_day_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let last = date.and_hms_opt(23, 59, 59)?;

    later_instant(tz.from_local_datetime(&last)).or_else(|| {
        start_of_day_in(date.succ_opt()?, tz).map(|next| next - Duration::seconds(1))
    })
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    start_of_day_in(date, &Local)
}

pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    end_of_day_in(date, &Local)
}
