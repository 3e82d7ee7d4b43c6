use std::path::PathBuf;

use clap::Args;
use keepintouch_core::dates;
use keepintouch_core::{Config, Reminder};

use super::schedule::load_schedule;
use super::{default_schedule_path, parse_date_arg};

#[derive(Args)]
pub struct RemindArgs {
    /// Day to check (default: today)
    #[arg(long)]
    date: Option<String>,
    /// Schedule file (default: <data dir>/schedule.jsonl)
    #[arg(long)]
    schedule: Option<PathBuf>,
}

pub fn run(args: RemindArgs) -> Result<(), Box<dyn std::error::Error>> {
    let day = match args.date {
        Some(date) => parse_date_arg(&date)?,
        None => dates::today(),
    };
    let path = match args.schedule {
        Some(path) => path,
        None => default_schedule_path()?,
    };

    let schedule = load_schedule(&path)?;
    let reminder = Reminder::with_config(&schedule, Config::load()?.reminder_config());
    for message in reminder.messages(day) {
        println!("{message}");
    }
    Ok(())
}
