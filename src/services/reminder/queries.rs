use super::shared::{map_reminder_row, to_db_timestamp, REMINDER_COLUMNS};
use super::{ReminderFilter, ReminderService};
use crate::models::reminder::Reminder;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Local};
use rusqlite::{self, params, Params};

impl<'a> ReminderService<'a> {
    /// List reminders matching `filter`, ordered by due date.
    pub fn list(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE (?1 IS NULL OR is_completed = ?1)
               AND (?2 IS NULL OR category = ?2)
               AND (?3 IS NULL OR due_at >= ?3)
               AND (?4 IS NULL OR due_at <= ?4)
             ORDER BY due_at ASC",
            params![
                filter.completed.map(i32::from),
                filter.category,
                filter.from.map(to_db_timestamp),
                filter.to.map(to_db_timestamp),
            ],
        )
    }

    /// Pending reminders due at or after `now`, soonest first.
    pub fn upcoming(&self, now: DateTime<Local>, limit: usize) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE is_completed = 0 AND due_at >= ?1 ORDER BY due_at ASC LIMIT ?2",
            params![to_db_timestamp(now), limit as i64],
        )
    }

    /// Pending reminders whose due instant has passed.
    pub fn overdue(&self, now: DateTime<Local>) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE is_completed = 0 AND due_at < ?1 ORDER BY due_at ASC",
            [to_db_timestamp(now)],
        )
    }

    /// Reminders whose literal due instant lies in `[start, end]`.
    pub fn find_due_between(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE due_at >= ?1 AND due_at <= ?2 ORDER BY due_at ASC",
            [to_db_timestamp(start), to_db_timestamp(end)],
        )
    }

    /// Pending reminders that carry a recurrence rule.
    pub fn pending_recurring(&self) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE is_completed = 0
               AND recurrence_rule IS NOT NULL
               AND TRIM(recurrence_rule) != ''
             ORDER BY due_at ASC",
            [],
        )
    }

    /// Pending reminders with notifications on, not yet notified, and due
    /// within `window` from `now`.
    pub fn due_for_notification(
        &self,
        now: DateTime<Local>,
        window: Duration,
    ) -> Result<Vec<Reminder>> {
        self.query(
            "WHERE notify = 1
               AND is_completed = 0
               AND notified_at IS NULL
               AND due_at >= ?1
               AND due_at <= ?2
             ORDER BY due_at ASC",
            [to_db_timestamp(now), to_db_timestamp(now + window)],
        )
    }

    /// Record that a notification for the current occurrence went out.
    pub fn mark_notified(&self, id: i64, at: DateTime<Local>) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE reminders SET notified_at = ?1, updated_at = ?1 WHERE id = ?2",
                params![to_db_timestamp(at), id],
            )
            .context("Failed to mark reminder as notified")?;

        if rows_affected == 0 {
            return Err(anyhow!("Reminder with id {} not found", id));
        }

        Ok(())
    }

    fn query<P: Params>(&self, clause: &str, params: P) -> Result<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM reminders {}", REMINDER_COLUMNS, clause))
            .context("Failed to prepare reminder query")?;

        let reminders = stmt
            .query_map(params, map_reminder_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read reminders")?;

        Ok(reminders)
    }
}
