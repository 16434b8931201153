//! Recurrence engine for reminders.
//! Parses stored rule text, advances a completed reminder to its next due
//! instant, and decides which calendar dates a recurring reminder occupies.
//! Everything here is pure and safe to call from any thread.

mod advance;
mod expand;
mod matcher;
mod parser;

pub use advance::next_occurrence;
pub use expand::expand_month;
pub use matcher::occurs_on;
pub use parser::parse_rule;
