use crate::models::recurrence::{weekday_from_code, Frequency, RecurrenceRule, WeekdaySet};

/// Decode stored rule text such as `FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE`.
///
/// Returns `None` when there is no rule (absent, empty or blank text).
/// Malformed text never fails: a missing or unknown `FREQ` yields a rule with
/// [`Frequency::Unrecognized`], and unknown `BYDAY` codes are dropped.
/// `INTERVAL` and `UNTIL` are accepted but not interpreted.
pub fn parse_rule(text: Option<&str>) -> Option<RecurrenceRule> {
    let text = text?.trim();
    let text = text.strip_prefix("RRULE:").unwrap_or(text);
    if text.is_empty() {
        return None;
    }

    let mut frequency = Frequency::Unrecognized;
    let mut weekdays = WeekdaySet::EMPTY;

    for (key, value) in segments(text) {
        match key {
            "FREQ" => frequency = Frequency::from_keyword(value),
            "BYDAY" => weekdays = parse_byday(value),
            _ => {}
        }
    }

    if frequency == Frequency::Unrecognized {
        log::trace!("Unrecognized recurrence rule {:?}", text);
    }

    Some(RecurrenceRule {
        frequency,
        weekdays,
    })
}

fn segments(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split(';')
        .filter_map(|segment| segment.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
}

fn parse_byday(value: &str) -> WeekdaySet {
    value
        .split(',')
        .filter_map(|code| weekday_from_code(code.trim()))
        .collect()
}
