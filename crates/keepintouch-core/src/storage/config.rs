//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Scheduling limits (daily capacity, attempt budget, window length, seed)
//! - Reminder rendering options
//!
//! Configuration is stored at `~/.config/keepintouch/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::reminder::ReminderConfig;
use crate::scheduler::{SchedulerConfig, DEFAULT_MAX_ATTEMPTS};

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSection {
    #[serde(default = "default_max_per_day")]
    pub max_check_ins_per_day: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Fixed seed for reproducible schedules.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Reminder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSection {
    #[serde(default = "default_true")]
    pub include_topics: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/keepintouch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerSection,
    #[serde(default)]
    pub reminders: ReminderSection,
}

// Default functions
fn default_max_per_day() -> u32 {
    1
}
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_window_days() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            max_check_ins_per_day: default_max_per_day(),
            max_attempts: default_max_attempts(),
            window_days: default_window_days(),
            seed: None,
        }
    }
}

impl Default for ReminderSection {
    fn default() -> Self {
        Self {
            include_topics: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    // Only optional fields accept "none"; required ones fail on deserialize.
                    serde_json::Value::Number(_) | serde_json::Value::Null => match value.trim() {
                        "" | "none" => serde_json::Value::Null,
                        other => other
                            .parse::<u64>()
                            .map(|n| serde_json::Value::Number(n.into()))
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    },
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the defaults cannot
    /// be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the scheduler cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the daily cap or the attempt budget is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scheduler.max_check_ins_per_day", self.scheduler.max_check_ins_per_day),
            ("scheduler.max_attempts", self.scheduler.max_attempts),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Every leaf key with its current value, in `section.key` form.
    pub fn entries(&self) -> Vec<(String, String)> {
        let Ok(serde_json::Value::Object(sections)) = serde_json::to_value(self) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (section, values) in sections {
            if let serde_json::Value::Object(values) = values {
                for (key, value) in values {
                    let rendered = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    out.push((format!("{section}.{key}"), rendered));
                }
            }
        }
        out
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_check_ins_per_day: self.scheduler.max_check_ins_per_day,
            max_attempts: self.scheduler.max_attempts,
            seed: self.scheduler.seed,
        }
    }

    pub fn reminder_config(&self) -> ReminderConfig {
        ReminderConfig {
            include_topics: self.reminders.include_topics,
        }
    }
}
