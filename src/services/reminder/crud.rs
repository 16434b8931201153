use super::shared::{
    map_reminder_row, to_db_timestamp, to_db_timestamp_opt, truncate_timestamps, REMINDER_COLUMNS,
};
use super::ReminderService;
use crate::models::reminder::Reminder;
use anyhow::{anyhow, Context, Result};
use chrono::{Local, SubsecRound};
use rusqlite::{self, params};

impl<'a> ReminderService<'a> {
    /// Insert a new reminder and return it with its id and timestamps set.
    pub fn create(&self, mut reminder: Reminder) -> Result<Reminder> {
        reminder.validate().map_err(|e| anyhow!(e))?;
        truncate_timestamps(&mut reminder);

        let now = Local::now().trunc_subsecs(0);
        let stamp = to_db_timestamp(now);

        self.conn
            .execute(
                "INSERT INTO reminders (
                    title, description, category, due_at, recurrence_rule, recurrence_end_at,
                    is_completed, completed_at, notify, notified_at, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    reminder.title,
                    reminder.description,
                    reminder.category,
                    to_db_timestamp(reminder.due_at),
                    reminder.recurrence_rule,
                    to_db_timestamp_opt(reminder.recurrence_end_at),
                    reminder.is_completed as i32,
                    to_db_timestamp_opt(reminder.completed_at),
                    reminder.notify as i32,
                    to_db_timestamp_opt(reminder.notified_at),
                    &stamp,
                    &stamp,
                ],
            )
            .context("Failed to insert reminder")?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Created reminder {} ({})", id, reminder.title);

        reminder.id = Some(id);
        reminder.created_at = Some(now);
        reminder.updated_at = Some(now);

        Ok(reminder)
    }

    /// Retrieve a reminder by ID.
    pub fn get(&self, id: i64) -> Result<Option<Reminder>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM reminders WHERE id = ?", REMINDER_COLUMNS),
            [id],
            map_reminder_row,
        );

        match result {
            Ok(reminder) => Ok(Some(reminder)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context(format!("Failed to load reminder {}", id)),
        }
    }

    /// Update every stored field of an existing reminder.
    pub fn update(&self, reminder: &Reminder) -> Result<()> {
        let id = reminder
            .id
            .ok_or_else(|| anyhow!("Reminder ID is required for update"))?;
        reminder.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE reminders SET
                    title = ?, description = ?, category = ?, due_at = ?,
                    recurrence_rule = ?, recurrence_end_at = ?, is_completed = ?,
                    completed_at = ?, notify = ?, notified_at = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    reminder.title,
                    reminder.description,
                    reminder.category,
                    to_db_timestamp(reminder.due_at),
                    reminder.recurrence_rule,
                    to_db_timestamp_opt(reminder.recurrence_end_at),
                    reminder.is_completed as i32,
                    to_db_timestamp_opt(reminder.completed_at),
                    reminder.notify as i32,
                    to_db_timestamp_opt(reminder.notified_at),
                    to_db_timestamp(Local::now()),
                    id,
                ],
            )
            .context("Failed to update reminder")?;

        if rows_affected == 0 {
            return Err(anyhow!("Reminder with id {} not found", id));
        }

        Ok(())
    }

    /// Delete a reminder by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?", [id])
            .context("Failed to delete reminder")?;

        if rows_affected == 0 {
            return Err(anyhow!("Reminder with id {} not found", id));
        }

        log::debug!("Deleted reminder {}", id);
        Ok(())
    }
}
