//! Generated schedule types.
//!
//! A [`Schedule`] is the product of one generation run: check-ins sorted by
//! date, plus an audit trail of placements that had to break a constraint.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One scheduled outreach to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(rename = "name")]
    pub contact_name: String,
    pub date: NaiveDate,
    #[serde(rename = "whatWeTalkedAbout", default)]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CheckIn {
    /// A regular check-in with no note.
    pub fn regular(contact_name: impl Into<String>, date: NaiveDate, topics: Vec<String>) -> Self {
        Self {
            contact_name: contact_name.into(),
            date,
            topics,
            note: None,
        }
    }

    /// A check-in placed for an important event.
    pub fn for_event(
        contact_name: impl Into<String>,
        date: NaiveDate,
        topics: Vec<String>,
        note: String,
    ) -> Self {
        Self {
            contact_name: contact_name.into(),
            date,
            topics,
            note: Some(note),
        }
    }

    pub fn is_event(&self) -> bool {
        self.note.is_some()
    }
}

/// A constraint broken by a best-effort placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintViolation {
    /// The day already held the maximum number of check-ins.
    DailyCapacity,
    /// The contact already had a check-in on this or an adjacent day.
    ConsecutiveDay,
}

/// A regular check-in that was placed after the attempt budget ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedPlacement {
    pub contact_name: String,
    pub date: NaiveDate,
    pub violations: Vec<ConstraintViolation>,
}

/// Check-ins for a window, sorted ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScheduleRecord")]
pub struct Schedule {
    check_ins: Vec<CheckIn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    degraded: Vec<DegradedPlacement>,
}

/// Serialized shape of a [`Schedule`]; deserialization re-sorts through
/// [`Schedule::new`].
#[derive(Deserialize)]
struct ScheduleRecord {
    check_ins: Vec<CheckIn>,
    #[serde(default)]
    degraded: Vec<DegradedPlacement>,
}

impl From<ScheduleRecord> for Schedule {
    fn from(record: ScheduleRecord) -> Self {
        Schedule::new(record.check_ins, record.degraded)
    }
}

impl Schedule {
    /// Build a schedule. Entries are stable-sorted by date, so entries on the
    /// same day keep their insertion order.
    pub fn new(mut check_ins: Vec<CheckIn>, degraded: Vec<DegradedPlacement>) -> Self {
        check_ins.sort_by_key(|c| c.date);
        Self { check_ins, degraded }
    }

    pub fn check_ins(&self) -> &[CheckIn] {
        &self.check_ins
    }

    /// Placements that broke a constraint during generation.
    pub fn degraded(&self) -> &[DegradedPlacement] {
        &self.degraded
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckIn> {
        self.check_ins.iter()
    }

    pub fn len(&self) -> usize {
        self.check_ins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty()
    }

    /// Entries falling on `date`.
    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &CheckIn> + '_ {
        // Sorted, so skip to the first match and stop after the last one.
        let start = self.check_ins.partition_point(|c| c.date < date);
        self.check_ins[start..].iter().take_while(move |c| c.date == date)
    }

    /// Entries for one contact, in date order.
    pub fn for_contact<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CheckIn> + 'a {
        self.check_ins.iter().filter(move |c| c.contact_name == name)
    }

    /// Write one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> Result<()> {
        for check_in in &self.check_ins {
            serde_json::to_writer(&mut writer, check_in)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a schedule written by [`Schedule::write_json_lines`].
    ///
    /// Blank lines are skipped. The degraded audit trail is not part of the
    /// line format and comes back empty.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a line is not a check-in record.
    pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Self> {
        let mut check_ins = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            check_ins.push(serde_json::from_str(&line)?);
        }
        Ok(Self::new(check_ins, Vec::new()))
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a CheckIn;
    type IntoIter = std::slice::Iter<'a, CheckIn>;

    fn into_iter(self) -> Self::IntoIter {
        self.check_ins.iter()
    }
}
