//! Check-in schedule generation.
//!
//! This module spreads check-ins for every contact on the roster over a
//! window of days:
//! - Important events get a check-in on their date when it falls in the window
//! - Regular check-ins are placed on random days, `required_check_ins` per contact
//! - No day holds more than `max_check_ins_per_day` check-ins
//! - No contact is checked in on two adjacent days

pub mod allocator;
pub mod context;
pub mod event;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::dates::{self, DateLike};
use crate::frequency;
use crate::schedule::{CheckIn, DegradedPlacement, Schedule};

pub use allocator::{DayAllocator, Placement, DEFAULT_MAX_ATTEMPTS};
pub use context::{DailyLedger, SchedulingContext};
pub use event::place_event;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Check-ins allowed on one calendar day, across all contacts
    pub max_check_ins_per_day: u32,
    /// Random draws per regular check-in before falling back
    pub max_attempts: u32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_check_ins_per_day: 1,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// Roster of contacts plus the settings used to schedule them.
pub struct ScheduleGenerator {
    config: SchedulerConfig,
    contacts: Vec<Contact>,
}

impl ScheduleGenerator {
    /// Create a new generator with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            contacts: Vec::new(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            contacts: Vec::new(),
        }
    }

    pub fn add_contact(&mut self, contact: Contact) {
        tracing::info!(contact = contact.name(), "contact added");
        self.contacts.push(contact);
    }

    /// Remove every contact with this name. Returns whether anything was removed.
    pub fn remove_contact(&mut self, name: &str) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.name() != name);
        let removed = self.contacts.len() != before;
        if removed {
            tracing::info!(contact = name, "contact removed");
        } else {
            tracing::info!(contact = name, "contact not found, nothing removed");
        }
        removed
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// First contact with this name.
    pub fn contact_mut(&mut self, name: &str) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.name() == name)
    }

    /// Mark a contact as reached on `today` after a missed check-in.
    pub fn handle_missed_check_in(&mut self, name: &str, today: NaiveDate) -> bool {
        match self.contact_mut(name) {
            Some(contact) => {
                contact.mark_contacted(today);
                tracing::info!(contact = name, %today, "missed check-in handled");
                true
            }
            None => {
                tracing::info!(contact = name, "missed check-in for unknown contact");
                false
            }
        }
    }

    /// Generate a schedule starting today (UTC).
    pub fn generate(&self, total_days: u32) -> Schedule {
        self.generate_from(dates::today(), total_days)
    }

    /// Regenerate from scratch; schedules are never patched in place.
    pub fn refresh(&self, total_days: u32) -> Schedule {
        self.generate(total_days)
    }

    /// Generate a schedule for a window starting at `window_start`, using the
    /// configured seed or fresh entropy.
    pub fn generate_from(&self, window_start: NaiveDate, total_days: u32) -> Schedule {
        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        self.generate_with_rng(window_start, total_days, &mut rng)
    }

    /// Generate a schedule drawing all randomness from `rng`.
    ///
    /// # Arguments
    /// * `window_start` - First day of the window; also the "as of" date for tenure
    /// * `total_days` - Window length; regular check-ins land in
    ///   `window_start..window_start + total_days`, event check-ins up to and
    ///   including `window_start + total_days`
    /// * `rng` - Random source
    pub fn generate_with_rng<R: Rng>(
        &self,
        window_start: NaiveDate,
        total_days: u32,
        rng: &mut R,
    ) -> Schedule {
        let mut ctx = SchedulingContext::new(self.config.max_check_ins_per_day);
        let allocator = DayAllocator::new(self.config.max_attempts);
        let mut check_ins = Vec::new();
        let mut degraded = Vec::new();

        for contact in &self.contacts {
            // 1. Important events first, so they claim their days
            for event in contact.important_events() {
                let placed = place_event(contact, event, window_start, total_days, &mut ctx);
                if let Some(check_in) = placed {
                    check_ins.push(check_in);
                }
            }

            // 2. Regular check-ins
            let monthly = ctx.monthly_frequency(contact, window_start, rng);
            let mut required = frequency::required_check_ins(monthly, contact.weight(), total_days);
            // One contact can hold at most one check-in per day.
            if required > total_days {
                tracing::warn!(
                    contact = contact.name(),
                    weight = contact.weight(),
                    required,
                    total_days,
                    "more check-ins than days in the window, capping"
                );
                required = total_days;
            }
            tracing::debug!(
                contact = contact.name(),
                monthly,
                weight = contact.weight(),
                required,
                "placing regular check-ins"
            );

            for _ in 0..required {
                let placement =
                    allocator.allocate(contact.name(), window_start, total_days, &mut ctx, rng);
                if let Placement::Degraded { date, violations } = &placement {
                    degraded.push(DegradedPlacement {
                        contact_name: contact.name().to_string(),
                        date: *date,
                        violations: violations.clone(),
                    });
                }
                check_ins.push(CheckIn::regular(
                    contact.name(),
                    placement.date(),
                    contact.topics().to_vec(),
                ));
            }
        }

        Schedule::new(check_ins, degraded)
    }

    /// Normalize a date-like value to `YYYY-MM-DD`; `None` when invalid.
    pub fn format_date<D: DateLike + ?Sized>(&self, value: &D) -> Option<String> {
        dates::format_date(value)
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::RelationshipCategory;
    use crate::dates::MonthDay;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded(seed: u64) -> ScheduleGenerator {
        ScheduleGenerator::with_config(SchedulerConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn family_gets_weekly_check_ins() {
        let mut generator = seeded(1);
        generator.add_contact(Contact::new("Mom", RelationshipCategory::Family));

        let schedule = generator.generate_from(date(2024, 3, 1), 30);

        assert_eq!(schedule.for_contact("Mom").count(), 4);
        assert!(schedule.iter().all(|c| c.note.is_none()));
    }

    #[test]
    fn weight_scales_check_in_count() {
        let mut generator = seeded(2);
        generator.add_contact(
            Contact::new("Alice", RelationshipCategory::Friend)
                .with_weight(2.0)
                .unwrap(),
        );

        let schedule = generator.generate_from(date(2024, 3, 1), 30);

        assert_eq!(schedule.for_contact("Alice").count(), 4);
    }

    #[test]
    fn huge_weight_is_capped_at_window_length() {
        let mut generator = seeded(6);
        generator.add_contact(
            Contact::new("Mom", RelationshipCategory::Family)
                .with_weight(1e300)
                .unwrap(),
        );

        let schedule = generator.generate_from(date(2024, 3, 1), 10);

        assert_eq!(schedule.len(), 10);
        assert!(schedule.iter().all(|c| c.date < date(2024, 3, 11)));
    }

    #[test]
    fn event_check_in_lands_on_event_day() {
        let start = date(2024, 3, 1);
        let event_day = start + Days::new(5);
        let mut generator = seeded(3);
        generator.add_contact(
            Contact::new("John", RelationshipCategory::Friend)
                .with_event("Birthday", MonthDay::from_date(event_day)),
        );

        let schedule = generator.generate_from(start, 30);

        let on_day: Vec<_> = schedule.for_date(event_day).collect();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].contact_name, "John");
        assert_eq!(on_day[0].note.as_deref(), Some("Birthday Check-in"));
        // Two regular check-ins on top of the event.
        assert_eq!(schedule.for_contact("John").filter(|c| c.note.is_none()).count(), 2);
    }

    #[test]
    fn schedule_is_sorted() {
        let mut generator = seeded(4);
        generator.add_contact(Contact::new("Mom", RelationshipCategory::Family));
        generator.add_contact(Contact::new("Dave", RelationshipCategory::Family));
        generator.add_contact(Contact::new("Bright", RelationshipCategory::Friend));

        let schedule = generator.generate_from(date(2024, 3, 1), 30);

        assert_eq!(schedule.len(), 10);
        assert!(schedule.check_ins().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn same_seed_same_schedule() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for g in [&mut a, &mut b] {
            g.add_contact(Contact::new("Mom", RelationshipCategory::Family));
            g.add_contact(Contact::new("Onyi", RelationshipCategory::RomanticPartner));
        }
        let start = date(2024, 3, 1);
        assert_eq!(a.generate_from(start, 30), b.generate_from(start, 30));
    }

    #[test]
    fn zero_day_window_places_nothing_regular() {
        let mut generator = seeded(5);
        generator.add_contact(Contact::new("Mom", RelationshipCategory::Family));
        assert!(generator.generate_from(date(2024, 3, 1), 0).is_empty());
    }

    #[test]
    fn remove_contact_reports_outcome() {
        let mut generator = ScheduleGenerator::new();
        generator.add_contact(Contact::new("Mom", RelationshipCategory::Family));
        generator.add_contact(Contact::new("Mom", RelationshipCategory::Family));
        generator.add_contact(Contact::new("Dave", RelationshipCategory::Friend));

        assert!(generator.remove_contact("Mom"));
        assert!(!generator.remove_contact("Mom"));
        assert!(!generator.remove_contact("Nobody"));
        assert_eq!(generator.contacts().len(), 1);
    }

    #[test]
    fn missed_check_in_updates_last_contacted() {
        let mut generator = ScheduleGenerator::new();
        generator.add_contact(Contact::new("Dave", RelationshipCategory::Friend));
        let today = date(2024, 10, 16);

        assert!(generator.handle_missed_check_in("Dave", today));
        assert!(!generator.handle_missed_check_in("Esther", today));
        assert_eq!(generator.contacts()[0].last_contacted(), Some(today));
    }

    #[test]
    fn format_date_sentinel() {
        let generator = ScheduleGenerator::new();
        assert_eq!(generator.format_date("2024-12-01").as_deref(), Some("2024-12-01"));
        assert_eq!(generator.format_date("not a date"), None);
    }
}
