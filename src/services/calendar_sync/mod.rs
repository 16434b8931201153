//! Recurrence lines for mirroring reminders into an external calendar.
//! The external service consumes plain reminder fields; the only shaping
//! needed is turning stored rule text into an `RRULE:` line.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::reminder::Reminder;

/// Build the `recurrence` lines for an external calendar event.
///
/// Returns `None` when there is no rule. The end instant is appended as
/// `UNTIL` (UTC, basic format) unless the text already carries one.
pub fn build_recurrence<Tz: TimeZone>(
    rule: Option<&str>,
    end_at: Option<&DateTime<Tz>>,
) -> Option<Vec<String>> {
    let rule = rule.map(str::trim).filter(|rule| !rule.is_empty())?;

    let mut line = if rule.starts_with("RRULE:") {
        rule.to_string()
    } else {
        format!("RRULE:{}", rule)
    };

    if let Some(end) = end_at {
        if !line.contains("UNTIL=") {
            let until = end.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ");
            line.push_str(&format!(";UNTIL={}", until));
        }
    }

    Some(vec![line])
}

/// Recurrence lines for a stored reminder.
pub fn reminder_recurrence(reminder: &Reminder) -> Option<Vec<String>> {
    build_recurrence(
        reminder.recurrence_rule.as_deref(),
        reminder.recurrence_end_at.as_ref(),
    )
}
