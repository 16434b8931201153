use crate::models::recurrence::{Frequency, RecurrenceRule, WeekdaySet};
use crate::utils::date::{add_days, add_months, add_years, earlier_instant, truncate_to_date};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Offset, TimeZone};

/// Compute the due instant that follows `current_due` under `rule`.
///
/// Time-of-day is kept. Monthly and yearly steps clamp to the end of shorter
/// months. Returns `None` for an unrecognized rule; the end boundary is not
/// checked here.
pub fn next_occurrence<Tz: TimeZone>(
    current_due: &DateTime<Tz>,
    rule: &RecurrenceRule,
) -> Option<DateTime<Tz>> {
    let date = truncate_to_date(current_due);

    let next_date = match rule.frequency {
        Frequency::Daily => add_days(date, 1),
        Frequency::Weekly => match rule.explicit_weekdays() {
            Some(days) => next_listed_weekday(date, days),
            None => add_days(date, 7),
        },
        Frequency::Monthly => add_months(date, 1),
        Frequency::Yearly => add_years(date, 1),
        Frequency::Unrecognized => return None,
    };

    Some(at_same_local_time(current_due, next_date))
}

/// First day after `date` whose weekday is in `days`, wrapping into the
/// following week.
fn next_listed_weekday(date: NaiveDate, days: WeekdaySet) -> NaiveDate {
    (1..=7)
        .map(|offset| add_days(date, offset))
        .find(|candidate| days.contains(candidate.weekday()))
        .unwrap_or_else(|| add_days(date, 7))
}

/// Place `original`'s wall-clock time on `date` in the same zone.
///
/// A time skipped by a DST gap keeps the original UTC offset; an ambiguous
/// time resolves to the earlier instant.
fn at_same_local_time<Tz: TimeZone>(original: &DateTime<Tz>, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(original.time());
    let tz = original.timezone();

    match earlier_instant(tz.from_local_datetime(&naive)) {
        Some(resolved) => resolved,
        None => {
            let offset = original.offset().fix().local_minus_utc();
            tz.from_utc_datetime(&(naive - Duration::seconds(offset as i64)))
        }
    }
}
