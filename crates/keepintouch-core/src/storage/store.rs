//! JSON file holding the contact roster.
//!
//! The file is a JSON array of contact records. Records written by older
//! tools that carry only `{name, weight}` are accepted; missing fields take
//! their defaults.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::contact::Contact;
use crate::error::{CoreError, StoreError};

pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/contacts.json`.
    pub fn open_default() -> Result<Self, CoreError> {
        Ok(Self::new(data_dir()?.join("contacts.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every contact. A missing file is an empty roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a JSON array of
    /// contact records, or a record fails validation.
    pub fn load(&self) -> Result<Vec<Contact>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let contacts: Vec<Contact> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        for contact in &contacts {
            contact.validate().map_err(|source| StoreError::InvalidRecord {
                name: contact.name().to_string(),
                source,
            })?;
        }
        tracing::debug!(path = %self.path.display(), count = contacts.len(), "contacts loaded");
        Ok(contacts)
    }

    /// Replace the stored roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, contacts: &[Contact]) -> Result<(), StoreError> {
        let content =
            serde_json::to_string_pretty(contacts).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = contacts.len(), "contacts saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::RelationshipCategory;
    use crate::dates::MonthDay;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ContactStore {
        ContactStore::new(dir.path().join("contacts.json"))
    }

    #[test]
    fn missing_file_is_empty_roster() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_full_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let contacts = vec![
            Contact::new("Mom", RelationshipCategory::Family).with_topics(["garden"]),
            Contact::new("Okaka", RelationshipCategory::Family)
                .with_event("Birthday", MonthDay::new(11, 11).unwrap()),
        ];

        store.save(&contacts).unwrap();

        assert_eq!(store.load().unwrap(), contacts);
    }

    #[test]
    fn accepts_name_weight_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"name":"Mom","weight":5},{"name":"Best Friend","weight":4}]"#,
        )
        .unwrap();

        let contacts = store.load().unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].name(), "Best Friend");
        assert_eq!(contacts[1].weight(), 4.0);
    }

    #[test]
    fn rejects_non_positive_weight() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"[{"name":"Mom","weight":0}]"#).unwrap();

        assert!(matches!(store.load(), Err(StoreError::InvalidRecord { .. })));
    }

    #[test]
    fn rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }
}
