// Rust guideline compliant 2026-10-18

//! Entry points tying the query pipeline to the directory and sessions.

use crate::resolve::{resolve_one, MatchOutcome};
use crate::{
    resolve_candidates, CandidateSet, Config, Directory, ParsedQuery, ScanCursor, SearchFlag,
    SearchFlags, Sessions, UserRecord,
};
use std::sync::Arc;
use tracing::debug;

/// Read-only view over the user directory and live sessions.
#[derive(Clone, Copy)]
pub struct UserMap<'a> {
    directory: &'a dyn Directory,
    sessions: &'a dyn Sessions,
    nickname_prefix: &'a str,
}

impl<'a> UserMap<'a> {
    /// Creates a user map.
    ///
    /// # Arguments
    ///
    /// * `directory` - Every known user
    /// * `sessions` - Live connection and visibility state
    /// * `config` - Supplies the nickname prefix
    pub fn new(
        directory: &'a dyn Directory,
        sessions: &'a dyn Sessions,
        config: &'a Config,
    ) -> Self {
        Self::with_nickname_prefix(directory, sessions, &config.nickname_prefix)
    }

    /// Creates a user map with an explicit nickname prefix.
    pub fn with_nickname_prefix(
        directory: &'a dyn Directory,
        sessions: &'a dyn Sessions,
        nickname_prefix: &'a str,
    ) -> Self {
        Self {
            directory,
            sessions,
            nickname_prefix,
        }
    }

    /// Builds a lazy scan for `raw`.
    ///
    /// Nothing is matched yet; pulling from the returned cursor does the
    /// work. An invalid query gets an empty snapshot and never touches the
    /// directory.
    ///
    /// # Arguments
    ///
    /// * `raw` - The query as typed
    /// * `requester` - Who is searching, for visibility checks
    /// * `forced` - Flags applied as if their prefixes had been typed
    pub fn match_users(
        &self,
        raw: &str,
        requester: Option<&str>,
        forced: SearchFlags,
    ) -> ScanCursor<'a> {
        let query = ParsedQuery::parse_with(raw, self.nickname_prefix, forced);

        let candidates = if query.is_valid() {
            resolve_candidates(query.flags(), self.directory, self.sessions)
        } else {
            CandidateSet::empty()
        };

        debug!(
            query = raw,
            pattern = query.pattern(),
            flags = ?query.flags(),
            candidates = candidates.len(),
            "prepared user scan"
        );

        ScanCursor::new(query, requester, candidates, self.directory, self.sessions)
    }

    /// Lazy scan that includes hidden users, optionally offline ones too.
    pub fn match_all(&self, raw: &str, include_offline: bool) -> ScanCursor<'a> {
        self.match_users(raw, None, Self::forced(true, include_offline))
    }

    /// Lazy scan of online users visible to `requester`.
    pub fn match_users_excluding_hidden(&self, raw: &str, requester: &str) -> ScanCursor<'a> {
        self.match_users(raw, Some(requester), SearchFlags::default())
    }

    /// Resolves `raw` to one user, including hidden users.
    pub fn match_user(&self, raw: &str, include_offline: bool) -> MatchOutcome<'a> {
        resolve_one(self.match_all(raw, include_offline))
    }

    /// Resolves `raw` to one online user visible to `requester`.
    pub fn match_user_excluding_hidden(&self, raw: &str, requester: &str) -> MatchOutcome<'a> {
        resolve_one(self.match_users_excluding_hidden(raw, requester))
    }

    /// Returns true if a user with this exact (case-insensitive) name exists.
    pub fn user_exists(&self, name: &str) -> bool {
        self.directory.record(name).is_some()
    }

    /// Loads a user by exact (case-insensitive) name.
    pub fn get_user(&self, name: &str) -> Option<Arc<UserRecord>> {
        self.directory.record(name)
    }

    /// Every identifier the directory has ever recorded.
    pub fn all_unique_users(&self) -> Vec<String> {
        self.directory.known_identifiers()
    }

    /// Number of unique users ever recorded.
    pub fn unique_user_count(&self) -> usize {
        self.directory.known_count()
    }

    fn forced(include_hidden: bool, include_offline: bool) -> SearchFlags {
        let mut flags = SearchFlags::default();
        if include_hidden {
            flags = flags.with(SearchFlag::Hidden);
        }
        if include_offline {
            flags = flags.with(SearchFlag::Offline);
        }
        flags
    }
}
