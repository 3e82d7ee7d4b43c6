//! Guaranteed check-ins on important-event dates.

use chrono::{Datelike, Days, NaiveDate};

use super::context::SchedulingContext;
use crate::contact::{Contact, ImportantEvent};
use crate::schedule::CheckIn;

/// Anchor `event` to the year of `window_start`.
///
/// Only the window's starting year is considered, so a window that crosses
/// New Year never sees early-January events.
pub fn anchor_event(event: &ImportantEvent, window_start: NaiveDate) -> NaiveDate {
    event.date.in_year(window_start.year())
}

/// Place one check-in on the event's date if it lies in the window and the
/// day still has capacity.
///
/// The window is inclusive on both ends: `window_start..=window_start +
/// total_days`. An event that cannot be placed is dropped for this run;
/// that includes a day the contact already holds. Event check-ins are
/// exempt from the no-consecutive-day rule.
pub fn place_event(
    contact: &Contact,
    event: &ImportantEvent,
    window_start: NaiveDate,
    total_days: u32,
    ctx: &mut SchedulingContext,
) -> Option<CheckIn> {
    let event_date = anchor_event(event, window_start);
    let window_end = window_start
        .checked_add_days(Days::new(total_days as u64))
        .unwrap_or(NaiveDate::MAX);

    if event_date < window_start || event_date > window_end {
        tracing::debug!(
            contact = contact.name(),
            event = %event.label,
            %event_date,
            "event outside window"
        );
        return None;
    }

    if ctx.placed_on(contact.name(), event_date) {
        tracing::debug!(
            contact = contact.name(),
            event = %event.label,
            %event_date,
            "contact already has a check-in that day, dropping event check-in"
        );
        return None;
    }

    if !ctx.has_capacity(event_date) {
        tracing::debug!(
            contact = contact.name(),
            event = %event.label,
            %event_date,
            "event day already full, dropping event check-in"
        );
        return None;
    }

    ctx.record_event(contact.name(), event_date);
    Some(CheckIn::for_event(
        contact.name(),
        event_date,
        contact.topics().to_vec(),
        event.note(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::RelationshipCategory;
    use crate::dates::MonthDay;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn birthday(month: u32, day: u32) -> ImportantEvent {
        ImportantEvent::new("Birthday", MonthDay::new(month, day).unwrap())
    }

    #[test]
    fn places_event_inside_window() {
        let contact = Contact::new("John", RelationshipCategory::Friend).with_topics(["bikes"]);
        let mut ctx = SchedulingContext::new(1);

        let check_in =
            place_event(&contact, &birthday(3, 6), date(2024, 3, 1), 30, &mut ctx).unwrap();

        assert_eq!(check_in.date, date(2024, 3, 6));
        assert_eq!(check_in.note.as_deref(), Some("Birthday Check-in"));
        assert_eq!(check_in.topics, vec!["bikes".to_string()]);
        assert_eq!(ctx.ledger().count(date(2024, 3, 6)), 1);
        assert_eq!(ctx.last_assigned("John"), None);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let start = date(2024, 3, 1);

        let mut ctx = SchedulingContext::new(1);
        assert!(place_event(&contact, &birthday(3, 1), start, 30, &mut ctx).is_some());
        assert!(place_event(&contact, &birthday(3, 31), start, 30, &mut ctx).is_some());
        assert!(place_event(&contact, &birthday(4, 1), start, 30, &mut ctx).is_none());
        assert!(place_event(&contact, &birthday(2, 29), start, 30, &mut ctx).is_none());
    }

    #[test]
    fn full_day_drops_event() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let mut ctx = SchedulingContext::new(1);
        ctx.record_regular("Mom", date(2024, 3, 6));

        assert!(place_event(&contact, &birthday(3, 6), date(2024, 3, 1), 30, &mut ctx).is_none());
        assert_eq!(ctx.ledger().count(date(2024, 3, 6)), 1);
    }

    #[test]
    fn same_day_events_place_once_under_cap_of_one() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let mut ctx = SchedulingContext::new(1);
        let anniversary = ImportantEvent::new("Anniversary", MonthDay::new(3, 6).unwrap());

        assert!(place_event(&contact, &birthday(3, 6), date(2024, 3, 1), 30, &mut ctx).is_some());
        assert!(place_event(&contact, &anniversary, date(2024, 3, 1), 30, &mut ctx).is_none());
    }

    #[test]
    fn same_day_events_place_once_with_spare_capacity() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let mut ctx = SchedulingContext::new(3);
        let anniversary = ImportantEvent::new("Anniversary", MonthDay::new(3, 6).unwrap());

        assert!(place_event(&contact, &birthday(3, 6), date(2024, 3, 1), 30, &mut ctx).is_some());
        assert!(place_event(&contact, &anniversary, date(2024, 3, 1), 30, &mut ctx).is_none());
        assert_eq!(ctx.ledger().count(date(2024, 3, 6)), 1);
    }

    #[test]
    fn adjacent_events_are_both_placed() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let mut ctx = SchedulingContext::new(1);
        let party = ImportantEvent::new("Party", MonthDay::new(3, 7).unwrap());

        assert!(place_event(&contact, &birthday(3, 6), date(2024, 3, 1), 30, &mut ctx).is_some());
        assert!(place_event(&contact, &party, date(2024, 3, 1), 30, &mut ctx).is_some());
    }

    #[test]
    fn year_boundary_is_not_bridged() {
        let contact = Contact::new("John", RelationshipCategory::Friend);
        let mut ctx = SchedulingContext::new(1);
        assert!(place_event(&contact, &birthday(1, 5), date(2024, 12, 20), 30, &mut ctx).is_none());
    }
}
