pub mod config;
pub mod contact;
pub mod remind;
pub mod schedule;

use std::path::PathBuf;

use chrono::NaiveDate;
use keepintouch_core::dates::parse_date_like;
use keepintouch_core::storage::data_dir;

/// Default location of the generated schedule.
pub fn default_schedule_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("schedule.jsonl"))
}

/// Parse a user-supplied date, accepting every layout `format_date` accepts.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    parse_date_like(input).ok_or_else(|| format!("invalid date: {input}").into())
}
