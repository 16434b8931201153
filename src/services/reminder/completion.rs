use super::ReminderService;
use crate::models::reminder::Reminder;
use crate::services::recurrence::next_occurrence;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use serde::Serialize;

/// What toggling a reminder's completion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// Recurring reminder re-armed at its next occurrence.
    Advanced { due_at: DateTime<Local> },
    /// Reminder marked done.
    Completed { completed_at: DateTime<Local> },
    /// A completed reminder made pending again.
    Reopened,
}

/// Apply a completion toggle to `reminder` in memory.
///
/// Completing a recurring reminder moves `due_at` to the next occurrence and
/// keeps it pending. It is completed instead when the rule cannot advance or
/// the next occurrence would fall after `recurrence_end_at`.
pub fn apply_toggle(reminder: &mut Reminder, now: DateTime<Local>) -> CompletionOutcome {
    if reminder.is_completed {
        reminder.is_completed = false;
        reminder.completed_at = None;
        return CompletionOutcome::Reopened;
    }

    let next = reminder
        .rule()
        .and_then(|rule| next_occurrence(&reminder.due_at, &rule))
        .filter(|next| reminder.recurrence_end_at.map_or(true, |end| *next <= end));

    match next {
        Some(due_at) => {
            reminder.due_at = due_at;
            reminder.notified_at = None;
            CompletionOutcome::Advanced { due_at }
        }
        None => {
            reminder.is_completed = true;
            reminder.completed_at = Some(now);
            CompletionOutcome::Completed { completed_at: now }
        }
    }
}

impl<'a> ReminderService<'a> {
    /// Toggle completion of a stored reminder and persist the result.
    pub fn toggle_complete(&self, id: i64, now: DateTime<Local>) -> Result<CompletionOutcome> {
        let mut reminder = self
            .get(id)?
            .ok_or_else(|| anyhow!("Reminder with id {} not found", id))?;

        let outcome = apply_toggle(&mut reminder, now);
        self.update(&reminder)?;

        match outcome {
            CompletionOutcome::Advanced { due_at } => {
                log::info!("Reminder {} advanced to {}", id, due_at.to_rfc3339());
            }
            CompletionOutcome::Completed { .. } => log::info!("Reminder {} completed", id),
            CompletionOutcome::Reopened => log::info!("Reminder {} reopened", id),
        }

        Ok(outcome)
    }
}
