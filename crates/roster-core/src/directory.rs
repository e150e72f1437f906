// Rust guideline compliant 2026-10-18

//! The user directory: every user ever recorded.

use crate::{Error, Result, UserRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of user records.
///
/// Identifiers are compared case-insensitively. A missing record is not an
/// error; callers treat it as "no such user".
pub trait Directory {
    /// Loads the record for `identifier`, if one exists.
    fn record(&self, identifier: &str) -> Option<Arc<UserRecord>>;

    /// Returns every known identifier. Identifiers are unique.
    fn known_identifiers(&self) -> Vec<String>;

    /// Number of known identifiers.
    ///
    /// The default collects the listing; stores that track their size
    /// should override it.
    fn known_count(&self) -> usize {
        self.known_identifiers().len()
    }
}

/// In-memory directory keyed by lowercased username.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    users: HashMap<String, Arc<UserRecord>>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from records, later duplicates replacing earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut directory = Self::new();
        for record in records {
            directory.upsert(record);
        }
        directory
    }

    /// Adds a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record fails validation
    /// - A user with the same (case-insensitive) name already exists
    pub fn insert(&mut self, record: UserRecord) -> Result<()> {
        record.validate()?;
        let key = record.key();
        if self.users.contains_key(&key) {
            return Err(Error::DuplicateUser(record.username));
        }
        self.users.insert(key, Arc::new(record));
        Ok(())
    }

    /// Adds or replaces a user.
    pub fn upsert(&mut self, record: UserRecord) {
        self.users.insert(record.key(), Arc::new(record));
    }

    /// Removes a user, returning its record.
    ///
    /// # Errors
    ///
    /// Returns an error if no such user exists.
    pub fn remove(&mut self, name: &str) -> Result<Arc<UserRecord>> {
        self.users
            .remove(&name.to_lowercase())
            .ok_or_else(|| Error::UserNotFound(name.to_string()))
    }

    /// Returns true if a user with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(&name.to_lowercase())
    }

    /// Returns the number of unique users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterates over every record in unspecified order.
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values().map(Arc::as_ref)
    }
}

impl Directory for MemoryDirectory {
    fn record(&self, identifier: &str) -> Option<Arc<UserRecord>> {
        self.users.get(&identifier.to_lowercase()).cloned()
    }

    fn known_identifiers(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }

    fn known_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut directory = MemoryDirectory::new();
        directory.insert(UserRecord::new("Steve")).unwrap();

        let record = directory.record("STEVE").expect("record");
        assert_eq!(record.username, "Steve");
        assert!(directory.contains("steve"));
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut directory = MemoryDirectory::new();
        directory.insert(UserRecord::new("bob")).unwrap();
        let err = directory.insert(UserRecord::new("BOB")).unwrap_err();
        assert!(matches!(err, Error::DuplicateUser(_)));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_remove_missing_user() {
        let mut directory = MemoryDirectory::new();
        assert!(matches!(
            directory.remove("ghost"),
            Err(Error::UserNotFound(_))
        ));
    }

    #[test]
    fn test_known_identifiers_are_keys() {
        let directory =
            MemoryDirectory::from_records([UserRecord::new("Alice"), UserRecord::new("bob")]);
        let mut ids = directory.known_identifiers();
        ids.sort();
        assert_eq!(ids, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_known_count_tracks_inserts_and_removals() {
        let mut directory =
            MemoryDirectory::from_records([UserRecord::new("Alice"), UserRecord::new("bob")]);
        assert_eq!(directory.known_count(), 2);
        directory.remove("ALICE").unwrap();
        assert_eq!(directory.known_count(), 1);
        assert_eq!(directory.known_count(), directory.known_identifiers().len());
    }
}
