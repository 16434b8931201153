use crate::models::reminder::Reminder;
use chrono::{DateTime, Local, SecondsFormat, SubsecRound, Utc};
use rusqlite::{self, Result, Row};

pub(crate) const REMINDER_COLUMNS: &str = "id, title, description, category, due_at,
    recurrence_rule, recurrence_end_at, is_completed, completed_at, notify, notified_at,
    created_at, updated_at";

/// Timestamps are stored as UTC RFC 3339 so text ordering matches time ordering.
pub(crate) fn to_db_timestamp(value: DateTime<Local>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Drop sub-second parts so an in-memory reminder equals its stored row.
pub(crate) fn truncate_timestamps(reminder: &mut Reminder) {
    reminder.due_at = reminder.due_at.trunc_subsecs(0);
    for stamp in [
        &mut reminder.recurrence_end_at,
        &mut reminder.completed_at,
        &mut reminder.notified_at,
        &mut reminder.created_at,
        &mut reminder.updated_at,
    ] {
        *stamp = stamp.map(|value| value.trunc_subsecs(0));
    }
}

pub(crate) fn to_db_timestamp_opt(value: Option<DateTime<Local>>) -> Option<String> {
    value.map(to_db_timestamp)
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_local_datetime_opt(value: Option<String>) -> Result<Option<DateTime<Local>>> {
    value.map(to_local_datetime).transpose()
}

pub(crate) fn map_reminder_row(row: &Row<'_>) -> Result<Reminder> {
    Ok(Reminder {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        due_at: to_local_datetime(row.get(4)?)?,
        recurrence_rule: row.get(5)?,
        recurrence_end_at: to_local_datetime_opt(row.get(6)?)?,
        is_completed: row.get::<_, i32>(7)? != 0,
        completed_at: to_local_datetime_opt(row.get(8)?)?,
        notify: row.get::<_, i32>(9)? != 0,
        notified_at: to_local_datetime_opt(row.get(10)?)?,
        created_at: to_local_datetime_opt(row.get(11)?)?,
        updated_at: to_local_datetime_opt(row.get(12)?)?,
    })
}
