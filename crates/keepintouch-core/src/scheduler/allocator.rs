//! Randomized day search for regular check-ins.

use chrono::{Days, NaiveDate};
use rand::Rng;

use super::context::SchedulingContext;
use crate::schedule::ConstraintViolation;

/// Attempts before the allocator gives up and returns its last draw.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Outcome of one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A day satisfying both constraints; already recorded in the context.
    Placed(NaiveDate),
    /// Attempt budget exhausted. `date` is the last candidate drawn; it was
    /// not recorded and breaks the listed constraints.
    Degraded {
        date: NaiveDate,
        violations: Vec<ConstraintViolation>,
    },
}

impl Placement {
    pub fn date(&self) -> NaiveDate {
        match self {
            Placement::Placed(date) => *date,
            Placement::Degraded { date, .. } => *date,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Placement::Degraded { .. })
    }
}

/// Finds days for a contact's regular check-ins.
#[derive(Debug, Clone, Copy)]
pub struct DayAllocator {
    max_attempts: u32,
}

impl DayAllocator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Draw days uniformly from `window_start..window_start + total_days`
    /// until one has capacity and keeps a free day around every check-in
    /// already placed for `contact`.
    ///
    /// `total_days` must be at least 1.
    pub fn allocate<R: Rng>(
        &self,
        contact: &str,
        window_start: NaiveDate,
        total_days: u32,
        ctx: &mut SchedulingContext,
        rng: &mut R,
    ) -> Placement {
        let span = total_days.max(1);
        let mut candidate = window_start;

        for _ in 0..self.max_attempts {
            let offset = rng.gen_range(0..span);
            candidate = window_start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(window_start);

            if ctx.has_capacity(candidate) && ctx.keeps_gap(contact, candidate) {
                ctx.record_regular(contact, candidate);
                tracing::trace!(contact, date = %candidate, "placed check-in");
                return Placement::Placed(candidate);
            }
        }

        let mut violations = Vec::new();
        if !ctx.has_capacity(candidate) {
            violations.push(ConstraintViolation::DailyCapacity);
        }
        if !ctx.keeps_gap(contact, candidate) {
            violations.push(ConstraintViolation::ConsecutiveDay);
        }
        tracing::warn!(
            contact,
            date = %candidate,
            attempts = self.max_attempts,
            ?violations,
            "attempt budget exhausted, using last candidate"
        );
        Placement::Degraded {
            date: candidate,
            violations,
        }
    }
}

impl Default for DayAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
