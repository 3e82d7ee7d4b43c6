//! Contacts and their scheduling attributes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{self, MonthDay};
use crate::error::ValidationError;

/// Relationship category; determines the base check-in frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipCategory {
    Family,
    #[default]
    Friend,
    Acquaintance,
    RomanticPartner,
}

impl RelationshipCategory {
    pub const ALL: [RelationshipCategory; 4] = [
        RelationshipCategory::Family,
        RelationshipCategory::Friend,
        RelationshipCategory::Acquaintance,
        RelationshipCategory::RomanticPartner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipCategory::Family => "family",
            RelationshipCategory::Friend => "friend",
            RelationshipCategory::Acquaintance => "acquaintance",
            RelationshipCategory::RomanticPartner => "romantic_partner",
        }
    }
}

impl std::str::FromStr for RelationshipCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "family" => Ok(RelationshipCategory::Family),
            "friend" => Ok(RelationshipCategory::Friend),
            "acquaintance" => Ok(RelationshipCategory::Acquaintance),
            "romantic_partner" | "partner" => Ok(RelationshipCategory::RomanticPartner),
            other => Err(ValidationError::InvalidValue {
                field: "relationship".to_string(),
                message: format!("unknown category '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring date worth a guaranteed check-in (birthday, anniversary, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantEvent {
    pub label: String,
    pub date: MonthDay,
}

impl ImportantEvent {
    pub fn new(label: impl Into<String>, date: MonthDay) -> Self {
        Self {
            label: label.into(),
            date,
        }
    }

    /// Note attached to check-ins placed for this event.
    pub fn note(&self) -> String {
        format!("{} Check-in", self.label)
    }
}

fn default_weight() -> f64 {
    1.0
}

/// A person on the roster.
///
/// Serialized records only require `name`; everything else falls back to
/// defaults, so the minimal `{name, weight}` shape loads too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    name: String,
    #[serde(default)]
    relationship: RelationshipCategory,
    #[serde(default = "dates::today")]
    tenure_start: NaiveDate,
    #[serde(default)]
    last_contacted: Option<NaiveDate>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    important_events: Vec<ImportantEvent>,
}

impl Contact {
    /// Create a contact whose tenure starts today, with weight 1.
    pub fn new(name: impl Into<String>, relationship: RelationshipCategory) -> Self {
        Self {
            name: name.into(),
            relationship,
            tenure_start: dates::today(),
            last_contacted: None,
            topics: Vec::new(),
            weight: default_weight(),
            important_events: Vec::new(),
        }
    }

    pub fn with_tenure_start(mut self, start: NaiveDate) -> Self {
        self.tenure_start = start;
        self
    }

    /// Set the adjustable weight.
    ///
    /// # Errors
    ///
    /// Returns an error unless `weight` is positive and finite.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, ValidationError> {
        self.set_weight(weight)?;
        Ok(self)
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_event(mut self, label: impl Into<String>, date: MonthDay) -> Self {
        self.add_important_event(label, date);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relationship(&self) -> RelationshipCategory {
        self.relationship
    }

    pub fn tenure_start(&self) -> NaiveDate {
        self.tenure_start
    }

    pub fn last_contacted(&self) -> Option<NaiveDate> {
        self.last_contacted
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn important_events(&self) -> &[ImportantEvent] {
        &self.important_events
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_relationship(&mut self, relationship: RelationshipCategory) {
        self.relationship = relationship;
    }

    pub fn set_tenure_start(&mut self, start: NaiveDate) {
        self.tenure_start = start;
    }

    /// # Errors
    ///
    /// Returns an error unless `weight` is positive and finite; the old
    /// weight is kept in that case.
    pub fn set_weight(&mut self, weight: f64) -> Result<(), ValidationError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight { weight });
        }
        self.weight = weight;
        Ok(())
    }

    pub fn add_topic(&mut self, topic: impl Into<String>) {
        self.topics.push(topic.into());
    }

    pub fn add_important_event(&mut self, label: impl Into<String>, date: MonthDay) {
        self.important_events.push(ImportantEvent::new(label, date));
    }

    /// Remove every event with this label. Returns how many were removed.
    pub fn remove_important_event(&mut self, label: &str) -> usize {
        let before = self.important_events.len();
        self.important_events.retain(|e| e.label != label);
        before - self.important_events.len()
    }

    /// Date of the first event with this label.
    pub fn event_date(&self, label: &str) -> Option<MonthDay> {
        self.important_events
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.date)
    }

    pub fn mark_contacted(&mut self, on: NaiveDate) {
        self.last_contacted = Some(on);
    }

    /// Re-check invariants on a record that bypassed the constructors,
    /// e.g. one read from disk.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight { weight: self.weight });
        }
        Ok(())
    }
}
