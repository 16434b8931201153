use super::ReminderService;
use crate::models::reminder::Reminder;
use crate::services::recurrence::{expand_month, occurs_on};
use crate::utils::date::{days_in_month, end_of_day, start_of_day};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

impl<'a> ReminderService<'a> {
    /// Reminders to show on `date`: those literally due that day plus pending
    /// recurring reminders that occur on it. Ordered by time of day.
    pub fn reminders_for_date(&self, date: NaiveDate) -> Result<Vec<Reminder>> {
        let start = start_of_day(date).context("Start of day is not representable")?;
        let end = end_of_day(date).context("End of day is not representable")?;

        let mut reminders = self.find_due_between(start, end)?;
        let mut seen: HashSet<i64> = reminders.iter().filter_map(|r| r.id).collect();

        for reminder in self.pending_recurring()? {
            if reminder.id.is_some_and(|id| seen.contains(&id)) {
                continue;
            }

            let rule = reminder.rule();
            if occurs_on(
                &reminder.due_at,
                rule.as_ref(),
                date,
                reminder.recurrence_end_at.as_ref(),
            ) {
                seen.extend(reminder.id);
                reminders.push(reminder);
            }
        }

        reminders.sort_by_key(|r| (r.due_at.time(), r.id));
        log::debug!("{} reminder(s) on {}", reminders.len(), date);
        Ok(reminders)
    }

    /// Dates in `year`-`month` that carry at least one reminder, for month
    /// grid markers.
    pub fn reminder_dates_for_month(&self, year: i32, month: u32) -> Result<BTreeSet<NaiveDate>> {
        let last_day = days_in_month(year, month);
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;
        let last = NaiveDate::from_ymd_opt(year, month, last_day)
            .ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;

        let start = start_of_day(first).context("Start of month is not representable")?;
        let end = end_of_day(last).context("End of month is not representable")?;

        let mut dates: BTreeSet<NaiveDate> = self
            .find_due_between(start, end)?
            .iter()
            .map(|r| r.due_at.date_naive())
            .collect();

        for reminder in self.pending_recurring()? {
            if reminder.due_at > end {
                continue;
            }

            let rule = reminder.rule();
            dates.extend(expand_month(
                &reminder.due_at,
                rule.as_ref(),
                year,
                month,
                reminder.recurrence_end_at.as_ref(),
            ));
        }

        Ok(dates)
    }
}
