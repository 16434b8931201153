// Database service module
// SQLite connection and schema management for the reminder store

mod connection;
mod schema;

pub use connection::Database;
