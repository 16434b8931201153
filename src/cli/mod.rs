// Command line interface over the reminder store and recurrence engine

mod args;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use reminder_recurrence::config::AppConfig;
use reminder_recurrence::models::recurrence::RecurrenceRule;
use reminder_recurrence::models::reminder::Reminder;
use reminder_recurrence::services::calendar_sync::reminder_recurrence;
use reminder_recurrence::services::database::Database;
use reminder_recurrence::services::notification::NotificationService;
use reminder_recurrence::services::recurrence::{next_occurrence, parse_rule};
use reminder_recurrence::services::reminder::{
    group_by_day, CompletionOutcome, ReminderFilter, ReminderService,
};

use args::{
    parse_date, parse_instant, parse_local_datetime, parse_weekly_days, parse_year_month, YearMonth,
};

#[derive(Debug, Parser)]
#[command(name = "reminder-recurrence", version, about = "Recurring reminders from the command line")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from the configuration
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute successive occurrences of a rule without touching the store
    Next {
        rule: String,
        #[arg(value_parser = parse_instant)]
        from: DateTime<FixedOffset>,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    #[command(flatten)]
    Store(StoreCommand),
}

/// Commands that read or write the reminder database.
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Create a reminder
    Add {
        title: String,
        /// Due time, `YYYY-MM-DD HH:MM` local or RFC 3339
        #[arg(long, value_parser = parse_local_datetime)]
        due: DateTime<Local>,
        /// Rule text, e.g. `FREQ=MONTHLY;INTERVAL=1`
        #[arg(long, conflicts_with = "weekly_on")]
        rule: Option<String>,
        /// Repeat weekly on these days, e.g. `MO,WE,FR`
        #[arg(long, value_parser = parse_weekly_days)]
        weekly_on: Option<RecurrenceRule>,
        /// Last day of the recurrence (inclusive)
        #[arg(long, value_parser = parse_date)]
        until: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Send a desktop notification shortly before it is due
        #[arg(long)]
        notify: bool,
    },
    /// List reminders grouped by day
    List {
        #[arg(long, conflicts_with = "pending")]
        completed: bool,
        #[arg(long)]
        pending: bool,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a single reminder
    Show { id: i64 },
    /// Toggle completion; recurring reminders advance to their next occurrence
    Complete { id: i64 },
    /// Delete a reminder
    Delete { id: i64 },
    /// Reminders occurring on a date
    Day {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Dates carrying reminders in a month (`YYYY-MM`)
    Month {
        #[arg(value_parser = parse_year_month)]
        month: YearMonth,
    },
    /// Pending reminders coming up next
    Upcoming {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Notify about reminders due within the configured window
    Notify,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Command::Next { rule, from, count } => print_next(&rule, from, count, self.json),
            Command::Store(command) => command.run(&config, self.database, self.json),
        }
    }
}

impl StoreCommand {
    fn run(self, config: &AppConfig, database: Option<PathBuf>, json: bool) -> Result<()> {
        let db_path = match database {
            Some(path) => path,
            None => config.resolve_database_path()?,
        };
        log::info!("Using database {}", db_path.display());

        let db = Database::open(&db_path)?;
        let service = ReminderService::new(db.connection());
        let now = Local::now();

        match self {
            StoreCommand::Add {
                title,
                due,
                rule,
                weekly_on,
                until,
                description,
                category,
                notify,
            } => {
                let mut builder = Reminder::builder().title(title).due_at(due).notify(notify);
                if let Some(rule) = rule.or_else(|| weekly_on.map(|r| r.to_string())) {
                    builder = builder.recurrence_rule(rule);
                }
                if let Some(until) = until {
                    builder = builder.recurrence_ends_on(until);
                }
                if let Some(description) = description {
                    builder = builder.description(description);
                }
                if let Some(category) = category {
                    builder = builder.category(category);
                }

                let reminder = service.create(builder.build().map_err(|e| anyhow!(e))?)?;
                if json {
                    print_json(&reminder)
                } else {
                    println!("Created reminder {}", reminder.id.unwrap_or_default());
                    print_reminder(&reminder, now);
                    Ok(())
                }
            }
            StoreCommand::List {
                completed,
                pending,
                category,
            } => {
                let filter = ReminderFilter {
                    completed: if completed {
                        Some(true)
                    } else if pending {
                        Some(false)
                    } else {
                        None
                    },
                    category,
                    ..ReminderFilter::default()
                };
                let reminders = service.list(&filter)?;

                if json {
                    return print_json(&reminders);
                }
                for (section, members) in group_by_day(&reminders, now) {
                    println!("{}", section);
                    for reminder in &members {
                        print_reminder(reminder, now);
                    }
                }
                Ok(())
            }
            StoreCommand::Show { id } => {
                let reminder = service
                    .get(id)?
                    .ok_or_else(|| anyhow!("Reminder with id {} not found", id))?;

                if json {
                    return print_json(&reminder);
                }
                print_reminder(&reminder, now);
                if let Some(description) = &reminder.description {
                    println!("    {}", description);
                }
                for line in reminder_recurrence(&reminder).unwrap_or_default() {
                    println!("    {}", line);
                }
                Ok(())
            }
            StoreCommand::Complete { id } => {
                let outcome = service.toggle_complete(id, now)?;
                if json {
                    print_json(&outcome)
                } else {
                    println!("{}", outcome_line(id, &outcome));
                    Ok(())
                }
            }
            StoreCommand::Delete { id } => {
                service.delete(id)?;
                println!("Deleted reminder {}", id);
                Ok(())
            }
            StoreCommand::Day { date } => {
                let reminders = service.reminders_for_date(date)?;
                if json {
                    return print_json(&reminders);
                }
                println!("{}", date.format("%A, %d %B %Y"));
                for reminder in &reminders {
                    print_reminder(reminder, now);
                }
                Ok(())
            }
            StoreCommand::Month { month } => {
                let dates = service.reminder_dates_for_month(month.year, month.month)?;
                if json {
                    return print_json(&dates);
                }
                for date in dates {
                    println!("{}", date);
                }
                Ok(())
            }
            StoreCommand::Upcoming { limit } => {
                let reminders = service.upcoming(now, limit.unwrap_or(config.upcoming_limit))?;
                if json {
                    return print_json(&reminders);
                }
                for reminder in &reminders {
                    print_reminder(reminder, now);
                }
                Ok(())
            }
            StoreCommand::Notify => {
                let notifier = NotificationService::with_enabled(config.notifications_enabled);
                let due = service.due_for_notification(now, config.notify_window())?;
                let mut sent = 0usize;

                for reminder in &due {
                    let Some(id) = reminder.id else { continue };
                    match notifier.show_reminder(reminder, now) {
                        Ok(true) => {
                            service.mark_notified(id, now)?;
                            sent += 1;
                        }
                        Ok(false) => {}
                        Err(e) => log::warn!("Failed to notify reminder {}: {}", id, e),
                    }
                }

                log::info!("Sent {} of {} notification(s)", sent, due.len());
                if json {
                    print_json(&serde_json::json!({ "sent": sent, "total": due.len() }))
                } else {
                    println!("Sent {} of {} notification(s)", sent, due.len());
                    Ok(())
                }
            }
        }
    }
}

fn print_next(rule_text: &str, from: DateTime<FixedOffset>, count: usize, json: bool) -> Result<()> {
    let rule = parse_rule(Some(rule_text)).context("Rule text is empty")?;

    let mut occurrences = Vec::with_capacity(count);
    let mut current = from;
    for _ in 0..count {
        let Some(next) = next_occurrence(&current, &rule) else {
            break;
        };
        occurrences.push(next);
        current = next;
    }

    if occurrences.is_empty() {
        log::warn!("Rule {:?} does not recur", rule_text);
    }

    if json {
        return print_json(&occurrences);
    }
    for occurrence in occurrences {
        println!("{}", occurrence.to_rfc3339());
    }
    Ok(())
}

fn outcome_line(id: i64, outcome: &CompletionOutcome) -> String {
    match outcome {
        CompletionOutcome::Advanced { due_at } => format!(
            "Reminder #{} done, next due {}",
            id,
            due_at.format("%Y-%m-%d %H:%M")
        ),
        CompletionOutcome::Completed { completed_at } => format!(
            "Reminder #{} completed at {}",
            id,
            completed_at.format("%Y-%m-%d %H:%M")
        ),
        CompletionOutcome::Reopened => format!("Reminder #{} reopened", id),
    }
}

fn print_reminder(reminder: &Reminder, now: DateTime<Local>) {
    let status = if reminder.is_completed {
        "x"
    } else if reminder.is_overdue(now) {
        "!"
    } else {
        " "
    };

    let recurrence = reminder
        .recurrence_label()
        .map(|label| format!(" ({})", label))
        .unwrap_or_default();

    println!(
        "  [{}] #{} {} {}{}",
        status,
        reminder.id.unwrap_or_default(),
        reminder.due_at.format("%Y-%m-%d %H:%M"),
        reminder.title,
        recurrence
    );
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
