//! Calendar-day helpers.
//!
//! Everything in the scheduler works at calendar-day granularity, so dates
//! are `NaiveDate` throughout. Recurring important events carry only a
//! month and a day ([`MonthDay`]) and are anchored to a concrete year when a
//! schedule is generated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Canonical output format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted string layouts, tried in order after RFC 3339.
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b.%d.%Y", "%b %d %Y"];

/// Something that may be interpreted as a calendar date.
pub trait DateLike {
    /// Resolve to a calendar date, or `None` when the value is not a valid date.
    fn to_naive_date(&self) -> Option<NaiveDate>;
}

impl DateLike for NaiveDate {
    fn to_naive_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn to_naive_date(&self) -> Option<NaiveDate> {
        Some(self.with_timezone(&Utc).date_naive())
    }
}

impl DateLike for str {
    fn to_naive_date(&self) -> Option<NaiveDate> {
        parse_date_like(self)
    }
}

impl DateLike for String {
    fn to_naive_date(&self) -> Option<NaiveDate> {
        parse_date_like(self)
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn to_naive_date(&self) -> Option<NaiveDate> {
        (**self).to_naive_date()
    }
}

/// Parse a date from any of the accepted textual layouts.
///
/// Timestamps are reduced to their UTC calendar date.
pub fn parse_date_like(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Normalize a date-like value to `YYYY-MM-DD`.
///
/// Returns `None` for values that cannot be read as a valid date. This is a
/// sentinel, not a failure: the problem is logged and the caller decides.
pub fn format_date<D: DateLike + ?Sized>(value: &D) -> Option<String> {
    match value.to_naive_date() {
        Some(date) => Some(date.format(DATE_FORMAT).to_string()),
        None => {
            tracing::warn!("invalid date provided to format_date");
            None
        }
    }
}

/// Whole calendar days between two dates, ignoring direction.
pub fn day_distance(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Full calendar months elapsed from `start` to `as_of`.
///
/// A month only counts once its day-of-month has been reached again, so
/// Jan 31 -> Feb 28 is zero months. Negative spans clamp to zero.
pub fn full_months_between(start: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of <= start {
        return 0;
    }
    let mut months =
        (as_of.year() - start.year()) * 12 + as_of.month() as i32 - start.month() as i32;
    if as_of.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// A month/day pair with no year, e.g. a birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build a month/day pair. Feb 29 is accepted.
    pub fn new(month: u32, day: u32) -> Result<Self, ValidationError> {
        // 2000 is a leap year, so every real month/day exists in it.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(ValidationError::InvalidMonthDay { month, day });
        }
        Ok(Self { month, day })
    }

    /// Drop the year of a concrete date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Place this month/day in `year`.
    ///
    /// Feb 29 in a non-leap year rolls over to Mar 1.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = ValidationError;

    /// Accepts `MM-DD` or any full date layout understood by [`parse_date_like`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((m, d)) = trimmed.split_once('-') {
            if let (Ok(month), Ok(day)) = (m.parse::<u32>(), d.parse::<u32>()) {
                return MonthDay::new(month, day);
            }
        }
        parse_date_like(trimmed)
            .map(MonthDay::from_date)
            .ok_or_else(|| ValidationError::InvalidDate(s.to_string()))
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_date_normalizes_iso() {
        assert_eq!(format_date("2024-12-01").as_deref(), Some("2024-12-01"));
    }

    #[test]
    fn format_date_returns_none_for_garbage() {
        assert_eq!(format_date("not a date"), None);
        assert_eq!(format_date("Invalid Date String"), None);
        assert_eq!(format_date(""), None);
    }

    #[test]
    fn format_date_accepts_other_layouts() {
        assert_eq!(format_date("2024/12/01").as_deref(), Some("2024-12-01"));
        assert_eq!(format_date("12/01/2024").as_deref(), Some("2024-12-01"));
        assert_eq!(format_date("Nov.11.2024").as_deref(), Some("2024-11-11"));
        assert_eq!(format_date("2024-12-01T23:30:00Z").as_deref(), Some("2024-12-01"));
    }

    #[test]
    fn format_date_accepts_typed_values() {
        assert_eq!(format_date(&date(2024, 2, 29)).as_deref(), Some("2024-02-29"));
        let ts = Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
        assert_eq!(format_date(&ts).as_deref(), Some("2024-07-04"));
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(format_date("2023-02-29"), None);
        assert_eq!(format_date("2024-13-01"), None);
    }

    #[test]
    fn day_distance_is_symmetric() {
        assert_eq!(day_distance(date(2024, 3, 1), date(2024, 3, 3)), 2);
        assert_eq!(day_distance(date(2024, 3, 3), date(2024, 3, 1)), 2);
        assert_eq!(day_distance(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn full_months_requires_day_reached() {
        assert_eq!(full_months_between(date(2024, 1, 31), date(2024, 2, 28)), 0);
        assert_eq!(full_months_between(date(2024, 1, 15), date(2024, 3, 14)), 1);
        assert_eq!(full_months_between(date(2024, 1, 15), date(2024, 3, 15)), 2);
        assert_eq!(full_months_between(date(2023, 11, 1), date(2024, 2, 1)), 3);
        assert_eq!(full_months_between(date(2024, 5, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn month_day_parses_short_and_full_forms() {
        assert_eq!("11-11".parse::<MonthDay>().unwrap(), MonthDay::new(11, 11).unwrap());
        assert_eq!("1990-07-04".parse::<MonthDay>().unwrap(), MonthDay::new(7, 4).unwrap());
        assert_eq!("Oct.20.2024".parse::<MonthDay>().unwrap(), MonthDay::new(10, 20).unwrap());
        assert!("02-30".parse::<MonthDay>().is_err());
        assert!("someday".parse::<MonthDay>().is_err());
    }

    #[test]
    fn leap_day_rolls_to_march_in_common_years() {
        let leap = MonthDay::new(2, 29).unwrap();
        assert_eq!(leap.in_year(2024), date(2024, 2, 29));
        assert_eq!(leap.in_year(2023), date(2023, 3, 1));
    }

    #[test]
    fn month_day_serializes_as_string() {
        let md = MonthDay::new(3, 7).unwrap();
        let json = serde_json::to_string(&md).unwrap();
        assert_eq!(json, "\"03-07\"");
        let back: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, md);
    }
}
