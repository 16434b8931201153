// Service module exports

pub mod calendar_sync;
pub mod database;
pub mod notification;
pub mod recurrence;
pub mod reminder;
