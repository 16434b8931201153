// Reminder module
// Reminder row model; recurrence is carried as rule text and parsed on demand

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::models::recurrence::RecurrenceRule;
use crate::services::recurrence::parse_rule;
use crate::utils::date::end_of_day;

/// A reminder as stored in the `reminders` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub due_at: DateTime<Local>,
    pub recurrence_rule: Option<String>, // e.g. FREQ=WEEKLY;INTERVAL=1;BYDAY=MO
    pub recurrence_end_at: Option<DateTime<Local>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Local>>,
    pub notify: bool,
    pub notified_at: Option<DateTime<Local>>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Reminder {
    /// Create a one-shot reminder.
    ///
    /// # Examples
    /// ```
    /// use reminder_recurrence::models::reminder::Reminder;
    /// use chrono::Local;
    ///
    /// let reminder = Reminder::new("Water the plants", Local::now()).unwrap();
    /// assert!(!reminder.is_recurring());
    /// ```
    pub fn new(title: impl Into<String>, due_at: DateTime<Local>) -> Result<Self, String> {
        let reminder = Self {
            id: None,
            title: title.into().trim().to_string(),
            description: None,
            category: None,
            due_at,
            recurrence_rule: None,
            recurrence_end_at: None,
            is_completed: false,
            completed_at: None,
            notify: false,
            notified_at: None,
            created_at: None,
            updated_at: None,
        };

        reminder.validate()?;
        Ok(reminder)
    }

    pub fn builder() -> ReminderBuilder {
        ReminderBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Reminder title cannot be empty".to_string());
        }

        if let Some(end) = self.recurrence_end_at {
            if !self.is_recurring() {
                return Err("Recurrence end requires a recurrence rule".to_string());
            }
            if end < self.due_at {
                return Err("Recurrence end must not be before the due date".to_string());
            }
        }

        Ok(())
    }

    /// A reminder is recurring when it carries non-blank rule text.
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule
            .as_deref()
            .is_some_and(|rule| !rule.trim().is_empty())
    }

    /// Parsed rule, rebuilt from the stored text on every call.
    pub fn rule(&self) -> Option<RecurrenceRule> {
        parse_rule(self.recurrence_rule.as_deref())
    }

    pub fn recurrence_label(&self) -> Option<String> {
        self.rule().map(|rule| rule.describe())
    }

    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        !self.is_completed && self.due_at < now
    }
}

/// Builder mirroring the reminder form fields.
#[derive(Default)]
pub struct ReminderBuilder {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    due_at: Option<DateTime<Local>>,
    recurrence_rule: Option<String>,
    recurrence_end_at: Option<DateTime<Local>>,
    recurrence_end_on: Option<NaiveDate>,
    notify: bool,
}

impl ReminderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Local>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn recurrence_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence_rule = Some(rule.into());
        self
    }

    pub fn recurrence_end_at(mut self, end: DateTime<Local>) -> Self {
        self.recurrence_end_at = Some(end);
        self.recurrence_end_on = None;
        self
    }

    /// End the recurrence at the last second of `date` (local time).
    pub fn recurrence_ends_on(mut self, date: NaiveDate) -> Self {
        self.recurrence_end_on = Some(date);
        self.recurrence_end_at = None;
        self
    }

    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    pub fn build(self) -> Result<Reminder, String> {
        let title = self.title.ok_or("Reminder title is required")?;
        let due_at = self.due_at.ok_or("Reminder due date is required")?;
        let recurrence_end_at = match self.recurrence_end_on {
            Some(date) => Some(
                end_of_day(date)
                    .ok_or_else(|| format!("Recurrence end {} is out of range", date))?,
            ),
            None => self.recurrence_end_at,
        };

        let reminder = Reminder {
            id: None,
            title: title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            category: self.category.filter(|c| !c.trim().is_empty()),
            due_at,
            recurrence_rule: self.recurrence_rule.filter(|r| !r.trim().is_empty()),
            recurrence_end_at,
            is_completed: false,
            completed_at: None,
            notify: self.notify,
            notified_at: None,
            created_at: None,
            updated_at: None,
        };

        reminder.validate()?;
        Ok(reminder)
    }
}
