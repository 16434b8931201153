use crate::models::recurrence::{Frequency, RecurrenceRule};
use crate::utils::date::{same_date, truncate_to_date};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Whether a reminder anchored at `anchor_due` occurs on `target`.
///
/// The anchor date always counts. Nothing occurs before the anchor date or
/// after the calendar date of `end`. A missing or unrecognized rule only
/// matches the anchor date itself.
pub fn occurs_on<Tz: TimeZone>(
    anchor_due: &DateTime<Tz>,
    rule: Option<&RecurrenceRule>,
    target: NaiveDate,
    end: Option<&DateTime<Tz>>,
) -> bool {
    let anchor = truncate_to_date(anchor_due);

    if target < anchor {
        return false;
    }

    if let Some(end) = end {
        if target > truncate_to_date(end) {
            return false;
        }
    }

    if same_date(target, anchor) {
        return true;
    }

    let Some(rule) = rule else {
        return false;
    };

    match rule.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => match rule.explicit_weekdays() {
            Some(days) => days.contains(target.weekday()),
            None => target.weekday() == anchor.weekday(),
        },
        Frequency::Monthly => target.day() == anchor.day(),
        Frequency::Yearly => target.day() == anchor.day() && target.month() == anchor.month(),
        Frequency::Unrecognized => false,
    }
}
