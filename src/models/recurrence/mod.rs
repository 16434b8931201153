// Recurrence module
// Structured form of a reminder's recurrence rule text

use chrono::Weekday;
use std::fmt;

/// Frequency class decided once when a rule is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Missing or unknown `FREQ`; never recurs.
    Unrecognized,
}

impl Frequency {
    /// Parse the `FREQ` keyword. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "MONTHLY" => Frequency::Monthly,
            "YEARLY" => Frequency::Yearly,
            _ => Frequency::Unrecognized,
        }
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Frequency::Daily => Some("DAILY"),
            Frequency::Weekly => Some("WEEKLY"),
            Frequency::Monthly => Some("MONTHLY"),
            Frequency::Yearly => Some("YEARLY"),
            Frequency::Unrecognized => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
            Frequency::Unrecognized => "Recurring",
        }
    }
}

/// Set of weekdays, one bit per day (Monday = bit 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Weekdays in the order rules list them, Monday first.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "SU" => Some(Weekday::Sun),
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Recurrence descriptor built from the stored rule text on every query.
///
/// `weekdays` is only consulted for [`Frequency::Weekly`]; an empty set means
/// "same weekday as the anchor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub weekdays: WeekdaySet,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            weekdays: WeekdaySet::EMPTY,
        }
    }

    pub fn weekly_on(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            frequency: Frequency::Weekly,
            weekdays: days.into_iter().collect(),
        }
    }

    /// Whether the rule describes a repeating pattern the engine understands.
    pub fn is_recognized(&self) -> bool {
        self.frequency != Frequency::Unrecognized
    }

    /// Explicit weekday constraint, if any.
    pub fn explicit_weekdays(&self) -> Option<WeekdaySet> {
        (!self.weekdays.is_empty()).then_some(self.weekdays)
    }

    /// Short label for reminder lists: the weekday list for weekly rules that
    /// name days, otherwise the frequency name.
    pub fn describe(&self) -> String {
        match self.explicit_weekdays() {
            Some(days) if self.frequency == Frequency::Weekly => days
                .iter()
                .map(weekday_label)
                .collect::<Vec<_>>()
                .join(", "),
            _ => self.frequency.label().to_string(),
        }
    }
}

/// Canonical rule text, e.g. `FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,FR`.
/// Unrecognized rules render as an empty string.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(keyword) = self.frequency.keyword() else {
            return Ok(());
        };

        write!(f, "FREQ={};INTERVAL=1", keyword)?;

        if let Some(days) = self.explicit_weekdays() {
            let codes: Vec<&str> = days.iter().map(weekday_code).collect();
            write!(f, ";BYDAY={}", codes.join(","))?;
        }

        Ok(())
    }
}
