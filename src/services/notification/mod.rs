use anyhow::Result;
use chrono::{DateTime, Local};
use notify_rust::{Notification, Timeout};

use crate::models::reminder::Reminder;

/// Service for displaying desktop notifications for due reminders
pub struct NotificationService {
    enabled: bool,
}

impl NotificationService {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show a notification for a reminder that is about to come due.
    /// Returns whether a notification was shown.
    pub fn show_reminder(&self, reminder: &Reminder, now: DateTime<Local>) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }

        let (summary, body) = reminder_message(reminder, now);
        let timeout = if reminder.is_overdue(now) {
            Timeout::Milliseconds(10000)
        } else {
            Timeout::Milliseconds(5000)
        };

        Notification::new()
            .summary(&summary)
            .body(&body)
            .timeout(timeout)
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(true)
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary and body text for a reminder notification.
pub fn reminder_message(reminder: &Reminder, now: DateTime<Local>) -> (String, String) {
    let summary = format!("Reminder: {}", reminder.title);

    let minutes = (reminder.due_at - now).num_minutes();
    let when = if minutes <= 0 {
        format!("Due now ({})", reminder.due_at.format("%H:%M"))
    } else {
        format!(
            "Due {} at {} (in {} min)",
            reminder.due_at.format("%A, %d %B"),
            reminder.due_at.format("%H:%M"),
            minutes
        )
    };

    let body = match reminder.description.as_deref() {
        Some(description) => format!("{}\n{}", when, description),
        None => when,
    };

    (summary, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_disabled_service_shows_nothing() {
        let service = NotificationService::with_enabled(false);
        let reminder = Reminder::new("Call mom", now() + Duration::minutes(20)).unwrap();

        assert!(!service.is_enabled());
        assert!(!service.show_reminder(&reminder, now()).unwrap());
    }

    #[test]
    fn test_message_for_upcoming_reminder() {
        let mut reminder = Reminder::new("Call mom", now() + Duration::minutes(45)).unwrap();
        reminder.description = Some("Birthday plans".to_string());

        let (summary, body) = reminder_message(&reminder, now());

        assert_eq!(summary, "Reminder: Call mom");
        assert_eq!(body, "Due Monday, 04 March at 12:45 (in 45 min)\nBirthday plans");
    }

    #[test]
    fn test_message_for_due_reminder() {
        let reminder = Reminder::new("Call mom", now()).unwrap();
        let (_, body) = reminder_message(&reminder, now());
        assert_eq!(body, "Due now (12:00)");
    }
}
