//! Reminder service entry point.
//! Provides the SQLite-backed reminder store and the callers of the
//! recurrence engine (completion, day view, month markers), organized
//! across focused submodules.

use chrono::{DateTime, Local};
use rusqlite::Connection;

pub mod calendar;
pub mod completion;
pub mod crud;
pub mod grouping;
pub mod queries;
mod shared;

pub use completion::{apply_toggle, CompletionOutcome};
pub use grouping::{group_by_day, DaySection};

/// Service for managing reminders stored in SQLite.
pub struct ReminderService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> ReminderService<'a> {
    /// Create a new ReminderService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

/// Optional constraints for [`ReminderService::list`].
#[derive(Debug, Clone, Default)]
pub struct ReminderFilter {
    pub completed: Option<bool>,
    pub category: Option<String>,
    pub from: Option<DateTime<Local>>,
    pub to: Option<DateTime<Local>>,
}

impl ReminderFilter {
    pub fn pending() -> Self {
        Self {
            completed: Some(false),
            ..Self::default()
        }
    }

    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reminder::Reminder;
    use crate::services::database::Database;
    use chrono::{Duration, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        Database::open(":memory:").unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_reminder() -> Reminder {
        Reminder::new("Take vitamins", local(2024, 3, 4, 8)).unwrap()
    }

    fn recurring(title: &str, due: DateTime<Local>, rule: &str) -> Reminder {
        Reminder::builder()
            .title(title)
            .due_at(due)
            .recurrence_rule(rule)
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let created = service.create(sample_reminder()).unwrap();

        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[test]
    fn test_create_rejects_invalid() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let mut reminder = sample_reminder();
        reminder.title = "  ".to_string();

        assert!(service.create(reminder).is_err());
    }

    #[test]
    fn test_created_reminder_matches_stored_row() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let due = local(2024, 3, 4, 8) + Duration::milliseconds(1_250);
        let created = service.create(Reminder::new("Stretch", due).unwrap()).unwrap();
        let loaded = service.get(created.id.unwrap()).unwrap().unwrap();

        assert_eq!(created.due_at, local(2024, 3, 4, 8) + Duration::seconds(1));
        assert_eq!(created, loaded);
    }

    #[test]
    fn test_get_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let created = service
            .create(
                Reminder::builder()
                    .title("Gym")
                    .description("Leg day")
                    .category("Health")
                    .due_at(local(2024, 3, 4, 18))
                    .recurrence_rule("FREQ=WEEKLY;BYDAY=MO,TH")
                    .recurrence_ends_on(ymd(2024, 6, 30))
                    .notify(true)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let found = service.get(created.id.unwrap()).unwrap().unwrap();

        assert_eq!(found.title, "Gym");
        assert_eq!(found.description.as_deref(), Some("Leg day"));
        assert_eq!(found.category.as_deref(), Some("Health"));
        assert_eq!(found.due_at, local(2024, 3, 4, 18));
        assert_eq!(found.recurrence_rule.as_deref(), Some("FREQ=WEEKLY;BYDAY=MO,TH"));
        assert_eq!(found.recurrence_end_at, created.recurrence_end_at);
        assert!(found.notify);
        assert!(!found.is_completed);
    }

    #[test]
    fn test_get_nonexistent_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        assert!(service.get(999).unwrap().is_none());
    }

    #[test]
    fn test_update_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let mut reminder = service.create(sample_reminder()).unwrap();
        reminder.title = "Take vitamin D".to_string();
        reminder.recurrence_rule = Some("FREQ=DAILY;INTERVAL=1".to_string());

        service.update(&reminder).unwrap();

        let updated = service.get(reminder.id.unwrap()).unwrap().unwrap();
        assert_eq!(updated.title, "Take vitamin D");
        assert!(updated.is_recurring());
    }

    #[test]
    fn test_update_nonexistent_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let mut reminder = sample_reminder();
        reminder.id = Some(999);

        assert!(service.update(&reminder).is_err());
    }

    #[test]
    fn test_delete_reminder() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let id = service.create(sample_reminder()).unwrap().id.unwrap();

        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
        assert!(service.delete(id).is_err());
    }

    #[test]
    fn test_list_with_filters() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let first = service.create(sample_reminder()).unwrap();
        let mut second = Reminder::new("Dentist", local(2024, 3, 6, 10)).unwrap();
        second.category = Some("Health".to_string());
        service.create(second).unwrap();
        service
            .create(Reminder::new("Groceries", local(2024, 3, 2, 17)).unwrap())
            .unwrap();

        service.toggle_complete(first.id.unwrap(), local(2024, 3, 4, 9)).unwrap();

        let all = service.list(&ReminderFilter::default()).unwrap();
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Groceries", "Take vitamins", "Dentist"]);

        assert_eq!(service.list(&ReminderFilter::pending()).unwrap().len(), 2);
        assert_eq!(service.list(&ReminderFilter::completed()).unwrap().len(), 1);

        let health = ReminderFilter {
            category: Some("Health".to_string()),
            ..ReminderFilter::default()
        };
        assert_eq!(service.list(&health).unwrap()[0].title, "Dentist");

        let window = ReminderFilter {
            from: Some(local(2024, 3, 3, 0)),
            to: Some(local(2024, 3, 5, 0)),
            ..ReminderFilter::default()
        };
        assert_eq!(service.list(&window).unwrap()[0].title, "Take vitamins");
    }

    #[test]
    fn test_upcoming_and_overdue() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());
        let now = local(2024, 3, 4, 12);

        service.create(Reminder::new("past", now - Duration::hours(2)).unwrap()).unwrap();
        service.create(Reminder::new("soon", now + Duration::hours(1)).unwrap()).unwrap();
        service.create(Reminder::new("later", now + Duration::days(2)).unwrap()).unwrap();

        let upcoming = service.upcoming(now, 1).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "soon");

        let overdue = service.overdue(now).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "past");
    }

    #[test]
    fn test_toggle_recurring_persists_new_due() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let created = service
            .create(recurring("Standup", local(2024, 3, 4, 9), "FREQ=WEEKLY;BYDAY=MO,WE,FR"))
            .unwrap();
        let id = created.id.unwrap();

        let outcome = service.toggle_complete(id, local(2024, 3, 4, 10)).unwrap();
        assert_eq!(
            outcome,
            CompletionOutcome::Advanced {
                due_at: local(2024, 3, 6, 9)
            }
        );

        let stored = service.get(id).unwrap().unwrap();
        assert_eq!(stored.due_at, local(2024, 3, 6, 9));
        assert!(!stored.is_completed);
    }

    #[test]
    fn test_toggle_missing_reminder_fails() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        assert!(service.toggle_complete(42, local(2024, 3, 4, 10)).is_err());
    }

    #[test]
    fn test_reminders_for_date_merges_recurring() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        service
            .create(recurring("Standup", local(2024, 3, 4, 9), "FREQ=WEEKLY;BYDAY=TU,TH"))
            .unwrap();
        service
            .create(Reminder::new("Dentist", local(2024, 3, 5, 7)).unwrap())
            .unwrap();
        service
            .create(recurring("Rent", local(2024, 2, 5, 12), "FREQ=MONTHLY"))
            .unwrap();

        let titles = |date: NaiveDate| -> Vec<String> {
            service
                .reminders_for_date(date)
                .unwrap()
                .into_iter()
                .map(|r| r.title)
                .collect()
        };

        assert_eq!(titles(ymd(2024, 3, 5)), vec!["Dentist", "Standup", "Rent"]);
        assert_eq!(titles(ymd(2024, 3, 4)), vec!["Standup"]);
        assert_eq!(titles(ymd(2024, 3, 6)), Vec::<String>::new());
    }

    #[test]
    fn test_completed_recurring_not_projected() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        let mut reminder = recurring("Water plants", local(2024, 3, 4, 9), "FREQ=DAILY");
        reminder.is_completed = true;
        reminder.completed_at = Some(local(2024, 3, 4, 10));
        service.create(reminder).unwrap();

        assert!(service.reminders_for_date(ymd(2024, 3, 6)).unwrap().is_empty());
        assert_eq!(service.reminders_for_date(ymd(2024, 3, 4)).unwrap().len(), 1);
    }

    #[test]
    fn test_month_markers() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());

        service
            .create(Reminder::new("Dentist", local(2024, 3, 5, 7)).unwrap())
            .unwrap();
        service
            .create(recurring("Rent", local(2024, 1, 20, 12), "FREQ=MONTHLY"))
            .unwrap();
        service
            .create(recurring("Future", local(2024, 4, 2, 12), "FREQ=DAILY"))
            .unwrap();

        let dates: Vec<NaiveDate> = service
            .reminder_dates_for_month(2024, 3)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(dates, vec![ymd(2024, 3, 5), ymd(2024, 3, 20)]);
        assert!(service.reminder_dates_for_month(2024, 13).is_err());
    }

    #[test]
    fn test_notification_selection() {
        let db = setup_test_db();
        let service = ReminderService::new(db.connection());
        let now = local(2024, 3, 4, 12);

        let mut soon = Reminder::new("soon", now + Duration::minutes(30)).unwrap();
        soon.notify = true;
        let soon = service.create(soon).unwrap();

        let mut far = Reminder::new("far", now + Duration::hours(3)).unwrap();
        far.notify = true;
        service.create(far).unwrap();

        service
            .create(Reminder::new("silent", now + Duration::minutes(10)).unwrap())
            .unwrap();

        let due = service.due_for_notification(now, Duration::hours(1)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "soon");

        service.mark_notified(soon.id.unwrap(), now).unwrap();
        assert!(service
            .due_for_notification(now, Duration::hours(1))
            .unwrap()
            .is_empty());
    }
}
