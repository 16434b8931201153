// Application configuration
// Loaded from a TOML file; every field has a default

use anyhow::{Context, Result};
use chrono::Duration;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "REMINDER_RECURRENCE_CONFIG";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "reminders.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Ken24T", "ReminderRecurrence")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file; defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// How far ahead `notify` looks for reminders to announce.
    pub notify_window_minutes: i64,
    /// Number of reminders listed by `upcoming`.
    pub upcoming_limit: usize,
    pub notifications_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            notify_window_minutes: 60,
            upcoming_limit: 10,
            notifications_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `explicit`, then the `REMINDER_RECURRENCE_CONFIG`
    /// variable, then the platform config directory. Only the platform default
    /// may be missing, in which case defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file at {}", path.display()))?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.notify_window_minutes <= 0 {
            anyhow::bail!("notify_window_minutes must be positive");
        }
        if self.upcoming_limit == 0 {
            anyhow::bail!("upcoming_limit must be at least 1");
        }
        Ok(())
    }

    pub fn notify_window(&self) -> Duration {
        Duration::minutes(self.notify_window_minutes)
    }

    /// Configured database path, or `reminders.db` in the platform data
    /// directory (created if needed).
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().context("Failed to determine the data directory")?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        Ok(data_dir.join(DATABASE_FILE))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
