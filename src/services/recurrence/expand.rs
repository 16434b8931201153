use crate::models::recurrence::RecurrenceRule;
use crate::utils::date::days_in_month;
use chrono::{DateTime, NaiveDate, TimeZone};

use super::matcher::occurs_on;

/// Every date of `year`-`month` on which the reminder occurs, ascending.
///
/// An invalid month yields an empty list.
pub fn expand_month<Tz: TimeZone>(
    anchor_due: &DateTime<Tz>,
    rule: Option<&RecurrenceRule>,
    year: i32,
    month: u32,
    end: Option<&DateTime<Tz>>,
) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| occurs_on(anchor_due, rule, *date, end))
        .collect()
}
