//! Per-run scheduling state.
//!
//! One [`SchedulingContext`] lives for exactly one generation run. The event
//! placer and the day allocator both read and write it; nothing in it
//! survives into the next run.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use rand::Rng;

use crate::contact::Contact;
use crate::dates::day_distance;
use crate::frequency;

/// Check-ins placed per calendar day, across all contacts.
#[derive(Debug, Clone, Default)]
pub struct DailyLedger {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DailyLedger {
    pub fn count(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn has_capacity(&self, date: NaiveDate, cap: u32) -> bool {
        self.count(date) < cap
    }

    pub fn record(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }
}

/// Mutable bookkeeping shared by every placement in one run.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    max_per_day: u32,
    ledger: DailyLedger,
    last_by_contact: HashMap<String, NaiveDate>,
    placed_by_contact: HashMap<String, BTreeSet<NaiveDate>>,
    frequencies: HashMap<String, u32>,
}

impl SchedulingContext {
    pub fn new(max_per_day: u32) -> Self {
        Self {
            max_per_day,
            ledger: DailyLedger::default(),
            last_by_contact: HashMap::new(),
            placed_by_contact: HashMap::new(),
            frequencies: HashMap::new(),
        }
    }

    pub fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    pub fn has_capacity(&self, date: NaiveDate) -> bool {
        self.ledger.has_capacity(date, self.max_per_day)
    }

    /// Most recent regular date assigned to `contact` in this run.
    ///
    /// "Most recent" is insertion order, not calendar order.
    pub fn last_assigned(&self, contact: &str) -> Option<NaiveDate> {
        self.last_by_contact.get(contact).copied()
    }

    /// Whether `date` keeps at least one free day between it and every
    /// check-in already placed for `contact`.
    pub fn keeps_gap(&self, contact: &str, date: NaiveDate) -> bool {
        match self.placed_by_contact.get(contact) {
            None => true,
            // Only the neighbours within one day can break the rule.
            Some(placed) => placed
                .range(date.pred_opt().unwrap_or(date)..=date.succ_opt().unwrap_or(date))
                .all(|other| day_distance(*other, date) > 1),
        }
    }

    /// Whether `contact` already has a check-in on `date` this run.
    pub fn placed_on(&self, contact: &str, date: NaiveDate) -> bool {
        self.placed_by_contact
            .get(contact)
            .is_some_and(|placed| placed.contains(&date))
    }

    /// Record an event check-in. Counts toward capacity but leaves the
    /// last-assigned map alone.
    pub fn record_event(&mut self, contact: &str, date: NaiveDate) {
        self.ledger.record(date);
        self.placed_by_contact
            .entry(contact.to_string())
            .or_default()
            .insert(date);
    }

    /// Record an accepted regular check-in.
    pub fn record_regular(&mut self, contact: &str, date: NaiveDate) {
        self.ledger.record(date);
        self.last_by_contact.insert(contact.to_string(), date);
        self.placed_by_contact
            .entry(contact.to_string())
            .or_default()
            .insert(date);
    }

    /// Monthly frequency for `contact`, drawn at most once per run.
    ///
    /// The first call for a name fixes the value; later calls in the same
    /// run return it unchanged, so a random category cannot disagree with
    /// itself between code paths.
    pub fn monthly_frequency<R: Rng>(
        &mut self,
        contact: &Contact,
        as_of: NaiveDate,
        rng: &mut R,
    ) -> u32 {
        if let Some(cached) = self.frequencies.get(contact.name()) {
            return *cached;
        }
        let drawn = frequency::monthly_frequency(contact, as_of, rng);
        self.frequencies.insert(contact.name().to_string(), drawn);
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::RelationshipCategory;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ledger_counts_per_day() {
        let mut ledger = DailyLedger::default();
        ledger.record(date(2024, 1, 1));
        ledger.record(date(2024, 1, 1));
        assert_eq!(ledger.count(date(2024, 1, 1)), 2);
        assert_eq!(ledger.count(date(2024, 1, 2)), 0);
        assert!(!ledger.has_capacity(date(2024, 1, 1), 2));
        assert!(ledger.has_capacity(date(2024, 1, 1), 3));
    }

    #[test]
    fn gap_checks_every_placed_day_not_just_last() {
        let mut ctx = SchedulingContext::new(1);
        ctx.record_regular("Dave", date(2024, 1, 10));
        ctx.record_regular("Dave", date(2024, 1, 20));

        assert_eq!(ctx.last_assigned("Dave"), Some(date(2024, 1, 20)));
        assert!(!ctx.keeps_gap("Dave", date(2024, 1, 11)));
        assert!(!ctx.keeps_gap("Dave", date(2024, 1, 9)));
        assert!(!ctx.keeps_gap("Dave", date(2024, 1, 10)));
        assert!(ctx.keeps_gap("Dave", date(2024, 1, 12)));
        assert!(ctx.keeps_gap("Mom", date(2024, 1, 11)));
    }

    #[test]
    fn events_count_toward_capacity_but_not_last_assigned() {
        let mut ctx = SchedulingContext::new(1);
        ctx.record_event("John", date(2024, 2, 5));
        assert!(!ctx.has_capacity(date(2024, 2, 5)));
        assert_eq!(ctx.last_assigned("John"), None);
        assert!(!ctx.keeps_gap("John", date(2024, 2, 6)));
        assert!(ctx.placed_on("John", date(2024, 2, 5)));
        assert!(!ctx.placed_on("John", date(2024, 2, 6)));
    }

    #[test]
    fn partner_frequency_is_memoized_per_run() {
        let mut rng = Mcg128Xsl64::seed_from_u64(99);
        let partner = Contact::new("Onyi", RelationshipCategory::RomanticPartner);
        let mut ctx = SchedulingContext::new(1);
        let first = ctx.monthly_frequency(&partner, date(2024, 1, 1), &mut rng);
        for _ in 0..50 {
            assert_eq!(ctx.monthly_frequency(&partner, date(2024, 1, 1), &mut rng), first);
        }
    }
}
