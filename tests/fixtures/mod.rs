// Test fixtures - reusable test data
// Provides consistent reminders and instants across the integration tests

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use reminder_recurrence::models::reminder::Reminder;

/// Sample instants for testing
pub mod instants {
    use super::*;

    /// Returns Jan 15, 2024 at 09:00 UTC
    pub fn jan_15_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    /// Returns Jan 31, 2024 at 10:00 UTC
    pub fn jan_31_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap()
    }

    /// Returns Feb 29, 2024 (leap day) at 08:00 UTC
    pub fn leap_day_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap()
    }

    /// Returns Monday, Mar 4, 2024 at 12:00 in UTC+10
    pub fn monday_noon_brisbane() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(10 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 4, 12, 0, 0)
            .unwrap()
    }

    /// Local instant on the given date at a fixed time of day
    pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .earliest()
            .unwrap()
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Sample reminders for testing
pub mod reminders {
    use super::*;

    pub fn one_shot(title: &str, due_at: DateTime<Local>) -> Reminder {
        Reminder::new(title, due_at).unwrap()
    }

    pub fn recurring(title: &str, due_at: DateTime<Local>, rule: &str) -> Reminder {
        Reminder::builder()
            .title(title)
            .due_at(due_at)
            .recurrence_rule(rule)
            .build()
            .unwrap()
    }

    /// Weekly on Monday, Wednesday and Friday, starting Monday Mar 4, 2024 at 12:00
    pub fn gym_sessions() -> Reminder {
        recurring(
            "Gym",
            instants::local(2024, 3, 4, 12, 0),
            "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE,FR",
        )
    }

    /// Monthly rent reminder on the 31st that ends with April 2024
    pub fn month_end_rent() -> Reminder {
        Reminder::builder()
            .title("Rent")
            .due_at(instants::local(2024, 1, 31, 9, 0))
            .recurrence_rule("FREQ=MONTHLY;INTERVAL=1")
            .recurrence_ends_on(date(2024, 4, 30))
            .build()
            .unwrap()
    }
}
