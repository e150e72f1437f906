// Rust guideline compliant 2026-10-18

//! Core data models for Roster.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 32;

/// A known user of the directory.
///
/// The username is the canonical identifier; lookups against it are
/// case-insensitive. The nickname is a free-form display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Canonical username.
    pub username: String,
    /// Optional nickname shown instead of the username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Unix timestamp of the last time the user was seen online.
    #[serde(default)]
    pub last_seen: i64,
}

impl UserRecord {
    /// Creates a new record without a nickname.
    ///
    /// # Arguments
    ///
    /// * `username` - The canonical username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            nickname: None,
            last_seen: 0,
        }
    }

    /// Returns a copy of the record with the given nickname.
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Returns the directory key for this record (the lowercased username).
    pub fn key(&self) -> String {
        self.username.to_lowercase()
    }

    /// Returns the name shown to other users: the nickname when set, the
    /// username otherwise.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }

    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The username is empty or longer than [`MAX_USERNAME_LEN`]
    /// - The username contains characters other than ASCII letters, digits and `_`
    /// - The nickname is present but blank
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::InvalidUser("Username cannot be empty".to_string()));
        }

        if self.username.len() > MAX_USERNAME_LEN {
            return Err(Error::InvalidUser(format!(
                "Username '{}' exceeds {} characters",
                self.username, MAX_USERNAME_LEN
            )));
        }

        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::InvalidUser(format!(
                "Username '{}' may only contain letters, digits and '_'",
                self.username
            )));
        }

        if let Some(nickname) = &self.nickname {
            if nickname.trim().is_empty() {
                return Err(Error::InvalidUser(format!(
                    "Nickname for '{}' cannot be blank",
                    self.username
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_nickname() {
        let plain = UserRecord::new("steve");
        assert_eq!(plain.display_name(), "steve");

        let nicked = UserRecord::new("steve").with_nickname("SirSteve");
        assert_eq!(nicked.display_name(), "SirSteve");
    }

    #[test]
    fn test_key_is_lowercase() {
        assert_eq!(UserRecord::new("Notch").key(), "notch");
    }

    #[test]
    fn test_validate_rejects_bad_usernames() {
        assert!(UserRecord::new("").validate().is_err());
        assert!(UserRecord::new("has space").validate().is_err());
        assert!(UserRecord::new("a".repeat(33)).validate().is_err());
        assert!(UserRecord::new("Good_Name_1").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_nickname() {
        let record = UserRecord::new("steve").with_nickname("  ");
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_serde_skips_missing_nickname() {
        let json = serde_json::to_string(&UserRecord::new("bob")).unwrap();
        assert!(!json.contains("nickname"));

        let parsed: UserRecord = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(parsed.nickname, None);
        assert_eq!(parsed.last_seen, 0);
    }
}
