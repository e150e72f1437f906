// Rust guideline compliant 2026-10-18

//! User-facing message lookup.
//!
//! The core only ever asks for messages by key; turning a key into text is
//! the job of a [`Localizer`]. [`Catalog`] is the bundled implementation:
//! English defaults, optionally overlaid from a TOML file of templates with
//! positional `{0}`, `{1}`, ... placeholders.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Keys of the messages the core requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Nobody matched the query.
    UserNotFound,
    /// Several users matched, but none are left to list.
    TooManyMatches,
    /// Several users matched; `{0}` is the comma-joined list of names.
    TooManyMatchesWithList,
}

impl MessageKey {
    /// All keys.
    pub const ALL: [MessageKey; 3] = [
        MessageKey::UserNotFound,
        MessageKey::TooManyMatches,
        MessageKey::TooManyMatchesWithList,
    ];

    /// The key as it appears in message catalogs.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::UserNotFound => "userNotFound",
            MessageKey::TooManyMatches => "tooManyMatches",
            MessageKey::TooManyMatchesWithList => "tooManyMatchesWithList",
        }
    }

    fn default_template(self) -> &'static str {
        match self {
            MessageKey::UserNotFound => "User not found.",
            MessageKey::TooManyMatches => "Multiple users match that name.",
            MessageKey::TooManyMatchesWithList => "Multiple users match that name: {0}",
        }
    }
}

/// Resolves message keys to text.
pub trait Localizer {
    /// Renders `key` with positional `args`.
    fn message(&self, key: MessageKey, args: &[&str]) -> String;
}

/// Template catalog keyed by message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    templates: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let templates = MessageKey::ALL
            .into_iter()
            .map(|key| (key.as_str().to_string(), key.default_template().to_string()))
            .collect();
        Self { templates }
    }
}

impl Catalog {
    /// Loads a TOML catalog on top of the English defaults.
    ///
    /// The file is a flat table of `key = "template"` entries. Unknown keys
    /// are kept, so one file can serve several consumers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a flat table of
    /// strings.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a TOML catalog on top of the English defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a flat table of strings.
    pub fn from_toml(content: &str) -> Result<Self> {
        let overrides: HashMap<String, String> = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Invalid message catalog: {}", e)))?;
        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        Ok(catalog)
    }

    /// Returns the raw template for `key`.
    pub fn template(&self, key: MessageKey) -> Option<&str> {
        self.templates.get(key.as_str()).map(String::as_str)
    }
}

impl Localizer for Catalog {
    fn message(&self, key: MessageKey, args: &[&str]) -> String {
        let Some(template) = self.template(key) else {
            return key.as_str().to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.to_string(), |text, (i, arg)| {
                text.replace(&format!("{{{}}}", i), arg)
            })
    }
}
