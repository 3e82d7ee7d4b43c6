//! Daily reminders drawn from a generated schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::{CheckIn, Schedule};

/// Message emitted when nothing is due.
pub const NOTHING_DUE: &str = "No reminders for today.";

/// Reminder rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Append the discussion topics to each reminder
    pub include_topics: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { include_topics: true }
    }
}

/// Surfaces the check-ins due on a given day.
pub struct Reminder<'a> {
    schedule: &'a Schedule,
    config: ReminderConfig,
}

impl<'a> Reminder<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        Self {
            schedule,
            config: ReminderConfig::default(),
        }
    }

    pub fn with_config(schedule: &'a Schedule, config: ReminderConfig) -> Self {
        Self { schedule, config }
    }

    /// Check-ins scheduled for `date`.
    pub fn due_on(&self, date: NaiveDate) -> Vec<&'a CheckIn> {
        self.schedule.for_date(date).collect()
    }

    /// One line per due check-in, or a single [`NOTHING_DUE`] line.
    pub fn messages(&self, date: NaiveDate) -> Vec<String> {
        let due = self.due_on(date);
        if due.is_empty() {
            return vec![NOTHING_DUE.to_string()];
        }
        due.iter().map(|c| self.render(c)).collect()
    }

    /// Emit today's reminders through the log and return how many were due.
    pub fn check_reminders(&self, today: NaiveDate) -> usize {
        let due = self.due_on(today);
        if due.is_empty() {
            tracing::info!("{NOTHING_DUE}");
        }
        for check_in in &due {
            tracing::info!(contact = %check_in.contact_name, "{}", self.render(check_in));
        }
        due.len()
    }

    fn render(&self, check_in: &CheckIn) -> String {
        let mut line = format!("Reminder: You need to check on {} today.", check_in.contact_name);
        if let Some(note) = &check_in.note {
            line.push_str(&format!(" ({note})"));
        }
        if self.config.include_topics {
            line.push_str(&format!(" What we talked about: {}", check_in.topics.join(", ")));
        }
        line
    }
}
