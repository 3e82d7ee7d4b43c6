//! # keepintouch Core Library
//!
//! This library provides the core logic for keepintouch, a planner that
//! spreads "check-in" reminders for personal contacts over a window of days.
//! The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Contacts**: relationship category, tenure, weight, topics and
//!   recurring important events
//! - **Frequency**: per-category check-in targets scaled to the window
//! - **Scheduler**: event placement and randomized day allocation under a
//!   daily capacity cap and a no-consecutive-day rule
//! - **Storage**: JSON contact roster and TOML configuration
//! - **Reminders**: what is due on a given day
//!
//! ## Key Components
//!
//! - [`ScheduleGenerator`]: roster plus schedule generation
//! - [`Schedule`]: generated, date-sorted check-ins
//! - [`Config`]: application configuration management
//! - [`ContactStore`]: contact persistence

pub mod contact;
pub mod dates;
pub mod error;
pub mod frequency;
pub mod reminder;
pub mod schedule;
pub mod scheduler;
pub mod storage;

pub use contact::{Contact, ImportantEvent, RelationshipCategory};
pub use dates::{format_date, DateLike, MonthDay};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use reminder::{Reminder, ReminderConfig};
pub use schedule::{CheckIn, ConstraintViolation, DegradedPlacement, Schedule};
pub use scheduler::{DayAllocator, Placement, ScheduleGenerator, SchedulerConfig, SchedulingContext};
pub use storage::{Config, ContactStore};
