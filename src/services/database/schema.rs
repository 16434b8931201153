use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_reminders_table(conn)?;
    create_reminder_indexes(conn)?;
    Ok(())
}

fn create_reminders_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            category TEXT,
            due_at TEXT NOT NULL,
            recurrence_rule TEXT,
            recurrence_end_at TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            notify INTEGER NOT NULL DEFAULT 0,
            notified_at TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create reminders table")?;

    Ok(())
}

fn create_reminder_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reminders_due_at ON reminders(due_at)",
        [],
    )
    .context("Failed to create reminders due_at index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reminders_pending
         ON reminders(is_completed, due_at)",
        [],
    )
    .context("Failed to create reminders pending index")?;

    Ok(())
}
