//! Contact roster commands for CLI.

use clap::Subcommand;
use keepintouch_core::dates::{self, MonthDay};
use keepintouch_core::frequency::{self, PARTNER_FREQUENCY_RANGE};
use keepintouch_core::{Contact, ContactStore, RelationshipCategory, ScheduleGenerator};

use super::parse_date_arg;

#[derive(Subcommand)]
pub enum ContactAction {
    /// Add a contact
    Add {
        /// Contact name
        name: String,
        /// Relationship: family, friend, acquaintance or partner
        #[arg(long, short, default_value = "friend")]
        relationship: RelationshipCategory,
        /// Priority multiplier (must be > 0)
        #[arg(long, default_value = "1.0")]
        weight: f64,
        /// When the relationship started (default: today)
        #[arg(long)]
        since: Option<String>,
        /// Conversation topic (repeatable)
        #[arg(long = "topic")]
        topics: Vec<String>,
    },
    /// List contacts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a contact by name
    Remove {
        /// Contact name
        name: String,
    },
    /// Add an important event, recurring every year
    EventAdd {
        /// Contact name
        name: String,
        /// Event label (e.g. "Birthday")
        label: String,
        /// Month and day as MM-DD, or a full date
        date: MonthDay,
    },
    /// Remove an important event by label
    EventRemove {
        /// Contact name
        name: String,
        /// Event label
        label: String,
    },
    /// Add a conversation topic
    Topic {
        /// Contact name
        name: String,
        /// Topic text
        topic: String,
    },
    /// Record that a missed check-in was made up
    Missed {
        /// Contact name
        name: String,
        /// Day the contact was reached (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show how often a contact is checked in on
    Frequency {
        /// Contact name
        name: String,
        /// Window length in days
        #[arg(long, default_value = "30")]
        days: u32,
    },
}

pub fn run(action: ContactAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = ContactStore::open_default()?;

    match action {
        ContactAction::Add {
            name,
            relationship,
            weight,
            since,
            topics,
        } => {
            let mut contacts = store.load()?;
            if contacts.iter().any(|c| c.name() == name) {
                return Err(format!("contact already exists: {name}").into());
            }
            let mut contact = Contact::new(name.as_str(), relationship)
                .with_weight(weight)?
                .with_topics(topics);
            if let Some(since) = since {
                contact.set_tenure_start(parse_date_arg(&since)?);
            }
            contacts.push(contact);
            store.save(&contacts)?;
            println!("Contact added: {name} ({relationship})");
        }
        ContactAction::List { json } => {
            let contacts = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&contacts)?);
            } else if contacts.is_empty() {
                println!("No contacts.");
            } else {
                for contact in &contacts {
                    print_contact(contact);
                }
            }
        }
        ContactAction::Remove { name } => {
            let mut generator = roster(&store)?;
            if generator.remove_contact(&name) {
                store.save(generator.contacts())?;
                println!("Contact removed: {name}");
            } else {
                println!("Contact not found, nothing removed: {name}");
            }
        }
        ContactAction::EventAdd { name, label, date } => {
            let mut generator = roster(&store)?;
            find_mut(&mut generator, &name)?.add_important_event(label.as_str(), date);
            store.save(generator.contacts())?;
            println!("Event added: {label} on {date} for {name}");
        }
        ContactAction::EventRemove { name, label } => {
            let mut generator = roster(&store)?;
            let removed = find_mut(&mut generator, &name)?.remove_important_event(&label);
            if removed == 0 {
                return Err(format!("no event labelled {label:?} for {name}").into());
            }
            store.save(generator.contacts())?;
            println!("Event removed: {label} for {name}");
        }
        ContactAction::Topic { name, topic } => {
            let mut generator = roster(&store)?;
            find_mut(&mut generator, &name)?.add_topic(topic.as_str());
            store.save(generator.contacts())?;
            println!("Topic added for {name}: {topic}");
        }
        ContactAction::Missed { name, date } => {
            let on = match date {
                Some(date) => parse_date_arg(&date)?,
                None => dates::today(),
            };
            let mut generator = roster(&store)?;
            if !generator.handle_missed_check_in(&name, on) {
                return Err(format!("contact not found: {name}").into());
            }
            store.save(generator.contacts())?;
            println!("Marked {name} as contacted on {on}");
        }
        ContactAction::Frequency { name, days } => {
            let contacts = store.load()?;
            let contact = contacts
                .iter()
                .find(|c| c.name() == name)
                .ok_or_else(|| format!("contact not found: {name}"))?;
            print_frequency(contact, days);
        }
    }
    Ok(())
}

fn roster(store: &ContactStore) -> Result<ScheduleGenerator, Box<dyn std::error::Error>> {
    let mut generator = ScheduleGenerator::new();
    for contact in store.load()? {
        generator.add_contact(contact);
    }
    Ok(generator)
}

fn find_mut<'a>(
    generator: &'a mut ScheduleGenerator,
    name: &str,
) -> Result<&'a mut Contact, Box<dyn std::error::Error>> {
    generator
        .contact_mut(name)
        .ok_or_else(|| format!("contact not found: {name}").into())
}

fn print_contact(contact: &Contact) {
    println!(
        "{} ({}, weight {}, since {})",
        contact.name(),
        contact.relationship(),
        contact.weight(),
        contact.tenure_start()
    );
    if let Some(last) = contact.last_contacted() {
        println!("  last contacted: {last}");
    }
    if !contact.topics().is_empty() {
        println!("  topics: {}", contact.topics().join(", "));
    }
    for event in contact.important_events() {
        println!("  {}: {}", event.label, event.date);
    }
}

fn print_frequency(contact: &Contact, days: u32) {
    let weight = contact.weight();
    match frequency::fixed_monthly_frequency(contact, dates::today()) {
        Some(monthly) => {
            println!(
                "{}: {monthly} per 30 days, weighted {:.2}",
                contact.name(),
                frequency::weighted_frequency(monthly, weight)
            );
            println!(
                "  {} check-ins over {days} days",
                frequency::required_check_ins(monthly, weight, days)
            );
        }
        None => {
            let (lo, hi) = (*PARTNER_FREQUENCY_RANGE.start(), *PARTNER_FREQUENCY_RANGE.end());
            println!("{}: {lo}-{hi} per 30 days (drawn each run), weight {weight}", contact.name());
            println!(
                "  {}-{} check-ins over {days} days",
                frequency::required_check_ins(lo, weight, days),
                frequency::required_check_ins(hi, weight, days)
            );
        }
    }
}
