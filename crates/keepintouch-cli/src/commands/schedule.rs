use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::Subcommand;
use keepintouch_core::{Config, ContactStore, Schedule, ScheduleGenerator};

use super::{default_schedule_path, parse_date_arg};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate a fresh schedule from the contact roster
    Generate {
        /// Window length in days (default: scheduler.window_days)
        #[arg(long)]
        days: Option<u32>,
        /// First day of the window (default: today)
        #[arg(long)]
        start: Option<String>,
        /// Random seed (default: scheduler.seed, or random)
        #[arg(long)]
        seed: Option<u64>,
        /// Where to write the schedule (default: <data dir>/schedule.jsonl)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the last generated schedule
    Show {
        /// Schedule file (default: <data dir>/schedule.jsonl)
        #[arg(long)]
        schedule: Option<PathBuf>,
        /// Only show check-ins for this contact
        #[arg(long)]
        contact: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Generate {
            days,
            start,
            seed,
            output,
            json,
        } => {
            let config = Config::load()?;
            let mut scheduler_config = config.scheduler_config();
            if seed.is_some() {
                scheduler_config.seed = seed;
            }
            let days = days.unwrap_or(config.scheduler.window_days);

            let mut generator = ScheduleGenerator::with_config(scheduler_config);
            for contact in ContactStore::open_default()?.load()? {
                generator.add_contact(contact);
            }
            if generator.contacts().is_empty() {
                return Err("no contacts; add one with `contact add`".into());
            }

            let schedule = match start {
                Some(start) => generator.generate_from(parse_date_arg(&start)?, days),
                None => generator.generate(days),
            };

            let path = match output {
                Some(path) => path,
                None => default_schedule_path()?,
            };
            schedule.write_json_lines(BufWriter::new(File::create(&path)?))?;

            if json {
                println!("{}", serde_json::to_string_pretty(schedule.check_ins())?);
            } else {
                print_schedule(&schedule, None);
                println!("{} check-ins written to {}", schedule.len(), path.display());
            }
            if !schedule.degraded().is_empty() {
                eprintln!(
                    "warning: {} check-ins could not satisfy every placement rule",
                    schedule.degraded().len()
                );
            }
        }
        ScheduleAction::Show {
            schedule,
            contact,
            json,
        } => {
            let path = match schedule {
                Some(path) => path,
                None => default_schedule_path()?,
            };
            let schedule = load_schedule(&path)?;
            if json {
                let selected: Vec<_> = match &contact {
                    Some(name) => schedule.for_contact(name).collect(),
                    None => schedule.iter().collect(),
                };
                println!("{}", serde_json::to_string_pretty(&selected)?);
            } else {
                print_schedule(&schedule, contact.as_deref());
            }
        }
    }
    Ok(())
}

/// Read a schedule written by `schedule generate`.
pub fn load_schedule(path: &std::path::Path) -> Result<Schedule, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| {
        format!(
            "cannot open schedule {}: {e} (run `schedule generate` first)",
            path.display()
        )
    })?;
    Ok(Schedule::read_json_lines(BufReader::new(file))?)
}

fn print_schedule(schedule: &Schedule, contact: Option<&str>) {
    let mut shown = 0;
    for check_in in schedule.iter() {
        if contact.is_some_and(|name| check_in.contact_name != name) {
            continue;
        }
        match &check_in.note {
            Some(note) => println!("{}  {}  ({note})", check_in.date, check_in.contact_name),
            None => println!("{}  {}", check_in.date, check_in.contact_name),
        }
        shown += 1;
    }
    if shown == 0 {
        println!("No check-ins scheduled.");
    }
}
