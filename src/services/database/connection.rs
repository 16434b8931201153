use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use super::schema;

/// Thin wrapper around the reminder store's SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the provided path.
    ///
    /// # Examples
    /// ```
    /// use reminder_recurrence::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        Ok(Self { conn })
    }

    /// Opens the database and makes sure the schema is current.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Self::new(path)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Provides read/write access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates the reminders table and its indexes if missing.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}
