// Rust guideline compliant 2026-10-18

//! Classifying a scan into a single user, nobody, or an ambiguous match.

use crate::messages::{Localizer, MessageKey};
use crate::{Error, Result, ScanCursor, UserRecord};
use std::sync::Arc;

/// Outcome of resolving a query to one user.
#[derive(Debug)]
pub enum MatchOutcome<'a> {
    /// Nobody matched.
    NotFound,
    /// Exactly one user matched.
    Found(Arc<UserRecord>),
    /// Two or more users matched.
    Ambiguous(AmbiguousMatch<'a>),
}

impl<'a> MatchOutcome<'a> {
    /// Returns the matched user, if exactly one matched.
    pub fn found(&self) -> Option<&Arc<UserRecord>> {
        match self {
            MatchOutcome::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Returns true if nobody matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchOutcome::NotFound)
    }

    /// Returns true if more than one user matched.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, MatchOutcome::Ambiguous(_))
    }

    /// Converts the outcome into a result, naming `query` on failure.
    ///
    /// An ambiguous outcome is enumerated here, not before.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nobody matched ([`Error::UserNotFound`])
    /// - More than one user matched ([`Error::TooManyMatches`])
    pub fn into_result(self, query: &str) -> Result<Arc<UserRecord>> {
        match self {
            MatchOutcome::NotFound => Err(Error::UserNotFound(query.to_string())),
            MatchOutcome::Found(record) => Ok(record),
            MatchOutcome::Ambiguous(ambiguous) => Err(ambiguous.into_error()),
        }
    }
}

/// Pulls at most two matches from `cursor` and classifies the result.
///
/// On ambiguity the cursor is reset and handed back inside
/// [`AmbiguousMatch`], so every match can be listed later without parsing
/// the query or taking a new snapshot.
pub fn resolve_one(mut cursor: ScanCursor<'_>) -> MatchOutcome<'_> {
    let Some(first) = cursor.next() else {
        return MatchOutcome::NotFound;
    };

    if cursor.next().is_none() {
        return MatchOutcome::Found(first);
    }

    cursor.reset();
    MatchOutcome::Ambiguous(AmbiguousMatch { cursor })
}

/// Resolves `cursor` to one user, turning the other outcomes into errors.
///
/// # Errors
///
/// Returns an error if:
/// - Nobody matched ([`Error::UserNotFound`])
/// - More than one user matched ([`Error::TooManyMatches`])
pub fn resolve_user(cursor: ScanCursor<'_>) -> Result<Arc<UserRecord>> {
    let query = cursor.query().raw().to_string();
    resolve_one(cursor).into_result(&query)
}

/// Two or more users matched; holds a rewound cursor over all of them.
///
/// Nothing is enumerated until a listing is asked for.
#[derive(Debug)]
pub struct AmbiguousMatch<'a> {
    cursor: ScanCursor<'a>,
}

impl<'a> AmbiguousMatch<'a> {
    /// Rewinds and returns the cursor for lazy enumeration.
    pub fn matches(&mut self) -> &mut ScanCursor<'a> {
        self.cursor.reset();
        &mut self.cursor
    }

    /// Display names of every match, in scan order.
    pub fn display_names(&mut self) -> Vec<String> {
        self.matches()
            .map(|record| record.display_name().to_string())
            .collect()
    }

    /// Renders the ambiguity message through `localizer`.
    ///
    /// Uses `tooManyMatchesWithList` with the comma-joined display names, or
    /// plain `tooManyMatches` if the re-scan comes back empty (the directory
    /// changed in between).
    pub fn message(&mut self, localizer: &dyn Localizer) -> String {
        let names = self.display_names();
        Self::message_for(&names, localizer)
    }

    /// Renders the ambiguity message for names already collected with
    /// [`AmbiguousMatch::display_names`], without scanning again.
    pub fn message_for(names: &[String], localizer: &dyn Localizer) -> String {
        if names.is_empty() {
            localizer.message(MessageKey::TooManyMatches, &[])
        } else {
            localizer.message(MessageKey::TooManyMatchesWithList, &[&names.join(", ")])
        }
    }

    /// Hands the rewound cursor to the caller.
    pub fn into_cursor(mut self) -> ScanCursor<'a> {
        self.cursor.reset();
        self.cursor
    }

    /// Enumerates every match into an [`Error::TooManyMatches`].
    pub fn into_error(mut self) -> Error {
        let matches = self.display_names();
        Error::TooManyMatches {
            query: self.cursor.query().raw().to_string(),
            matches,
        }
    }
}
