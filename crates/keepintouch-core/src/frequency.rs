//! Check-in frequency derivation.
//!
//! Frequencies are expressed per 30-day period and scaled to the window
//! being scheduled.

use chrono::NaiveDate;
use rand::Rng;

use crate::contact::{Contact, RelationshipCategory};
use crate::dates::full_months_between;

/// Length of the period a monthly frequency refers to.
pub const DAYS_PER_PERIOD: u32 = 30;

/// Acquaintances younger than this many full months are checked more often.
pub const NEW_ACQUAINTANCE_MONTHS: u32 = 2;

/// Inclusive bounds for the romantic-partner draw.
pub const PARTNER_FREQUENCY_RANGE: std::ops::RangeInclusive<u32> = 3..=5;

/// Base number of check-ins per 30 days for a contact, before weighting.
///
/// `as_of` is the date tenure is measured against. Romantic partners get a
/// fresh draw from `rng` on every call; callers that need a stable value
/// for a run should memoize it (see `SchedulingContext::monthly_frequency`).
pub fn monthly_frequency<R: Rng>(contact: &Contact, as_of: NaiveDate, rng: &mut R) -> u32 {
    fixed_monthly_frequency(contact, as_of)
        .unwrap_or_else(|| rng.gen_range(PARTNER_FREQUENCY_RANGE))
}

/// Monthly frequency for categories that do not involve a random draw.
///
/// `None` for romantic partners.
pub fn fixed_monthly_frequency(contact: &Contact, as_of: NaiveDate) -> Option<u32> {
    match contact.relationship() {
        RelationshipCategory::Family => Some(4),
        RelationshipCategory::Friend => Some(2),
        RelationshipCategory::Acquaintance => {
            if full_months_between(contact.tenure_start(), as_of) < NEW_ACQUAINTANCE_MONTHS {
                Some(2)
            } else {
                Some(1)
            }
        }
        RelationshipCategory::RomanticPartner => None,
    }
}

/// Number of regular check-ins to place in a window of `total_days`.
///
/// `ceil(monthly * weight * total_days / 30)`, saturating at `u32::MAX`.
/// The generator further caps it at `total_days`.
pub fn required_check_ins(monthly: u32, weight: f64, total_days: u32) -> u32 {
    let exact = monthly as f64 * weight * total_days as f64 / DAYS_PER_PERIOD as f64;
    // Guard against 4.000000001-style float noise turning into an extra check-in.
    let rounded = (exact * 1e9).round() / 1e9;
    rounded.ceil().max(0.0) as u32
}

/// Weighted monthly frequency, for display.
pub fn weighted_frequency(monthly: u32, weight: f64) -> f64 {
    monthly as f64 * weight
}
