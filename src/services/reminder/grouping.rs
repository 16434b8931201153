use crate::models::reminder::Reminder;
use crate::utils::date::add_days;
use chrono::{DateTime, Local, NaiveDate};
use std::fmt;

/// Section heading of a reminder list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySection {
    Overdue,
    Today,
    Tomorrow,
    On(NaiveDate),
}

impl DaySection {
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date < today {
            DaySection::Overdue
        } else if date == today {
            DaySection::Today
        } else if date == add_days(today, 1) {
            DaySection::Tomorrow
        } else {
            DaySection::On(date)
        }
    }
}

impl fmt::Display for DaySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySection::Overdue => write!(f, "Overdue"),
            DaySection::Today => write!(f, "Today"),
            DaySection::Tomorrow => write!(f, "Tomorrow"),
            DaySection::On(date) => write!(f, "{}", date.format("%A, %d %B")),
        }
    }
}

/// Group reminders into day sections, keeping input order within and across
/// sections.
pub fn group_by_day(reminders: &[Reminder], now: DateTime<Local>) -> Vec<(DaySection, Vec<Reminder>)> {
    let today = now.date_naive();
    let mut groups: Vec<(DaySection, Vec<Reminder>)> = Vec::new();

    for reminder in reminders {
        let section = DaySection::for_date(reminder.due_at.date_naive(), today);
        match groups.iter_mut().find(|(existing, _)| *existing == section) {
            Some((_, members)) => members.push(reminder.clone()),
            None => groups.push((section, vec![reminder.clone()])),
        }
    }

    groups
}
