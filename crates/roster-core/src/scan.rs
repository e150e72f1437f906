// Rust guideline compliant 2026-10-18

//! Lazy, restartable matching over a candidate snapshot.
//!
//! [`MatchRules`] is the immutable half: the parsed query, the requester and
//! the collaborators used to load records and check visibility. It decides
//! whether a single identifier matches. [`ScanCursor`] owns the mutable half:
//! the candidate snapshot and a position in it. Records are loaded only when
//! a candidate is actually tested, so pulling one match from a large
//! directory touches as few records as possible.

use crate::visibility::is_visible;
use crate::{CandidateSet, Directory, ParsedQuery, Sessions, UserRecord};
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::trace;

/// Matching rules for one query.
#[derive(Clone, Copy)]
pub struct MatchRules<'a> {
    query: &'a ParsedQuery,
    requester: Option<&'a str>,
    directory: &'a dyn Directory,
    sessions: &'a dyn Sessions,
}

impl<'a> MatchRules<'a> {
    /// Creates rules for a parsed query.
    pub fn new(
        query: &'a ParsedQuery,
        requester: Option<&'a str>,
        directory: &'a dyn Directory,
        sessions: &'a dyn Sessions,
    ) -> Self {
        Self {
            query,
            requester,
            directory,
            sessions,
        }
    }

    /// Tests one candidate.
    ///
    /// Nickname matching is tried first, then username matching. The record
    /// is loaded at most once, and not at all for a username-only search
    /// whose pattern misses the identifier. A candidate without a record
    /// never matches.
    pub fn evaluate(&self, identifier: &str) -> Option<Arc<UserRecord>> {
        let flags = self.query.flags();
        let mut loaded = None;

        if flags.matches_nickname() {
            let record = self.load(identifier)?;
            let nickname_hit = record
                .nickname
                .as_deref()
                .is_some_and(|nickname| self.query.matches(nickname));
            if nickname_hit && self.visible(&record) {
                trace!(identifier, "matched by nickname");
                return Some(record);
            }
            loaded = Some(record);
        }

        if flags.matches_username() && self.query.matches(identifier) {
            let record = match loaded {
                Some(record) => record,
                None => self.load(identifier)?,
            };
            if self.visible(&record) {
                trace!(identifier, "matched by username");
                return Some(record);
            }
        }

        None
    }

    fn load(&self, identifier: &str) -> Option<Arc<UserRecord>> {
        let record = self.directory.record(identifier);
        if record.is_none() {
            trace!(identifier, "candidate has no record");
        }
        record
    }

    fn visible(&self, record: &UserRecord) -> bool {
        let visible = is_visible(
            self.sessions,
            self.requester,
            &record.username,
            self.query.flags(),
        );
        if !visible {
            trace!(username = %record.username, "suppressed by visibility");
        }
        visible
    }
}

/// Lifecycle of a [`ScanCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Positioned at the start of the snapshot.
    Fresh,
    /// At least one candidate has been visited.
    Scanning,
    /// Every candidate has been visited; pulls return `None` until reset.
    Exhausted,
}

/// Cursor over the matches of one query.
///
/// Iterating yields matching records one at a time. [`ScanCursor::reset`]
/// rewinds to the start of the same snapshot, so a second pass yields the
/// same matches again (minus any excluded ones).
pub struct ScanCursor<'a> {
    query: ParsedQuery,
    requester: Option<String>,
    directory: &'a dyn Directory,
    sessions: &'a dyn Sessions,
    candidates: CandidateSet,
    position: usize,
    state: ScanState,
    last_yielded: Option<usize>,
}

impl<'a> ScanCursor<'a> {
    /// Creates a fresh cursor over `candidates`.
    pub fn new(
        query: ParsedQuery,
        requester: Option<&str>,
        candidates: CandidateSet,
        directory: &'a dyn Directory,
        sessions: &'a dyn Sessions,
    ) -> Self {
        Self {
            query,
            requester: requester.map(str::to_string),
            directory,
            sessions,
            candidates,
            position: 0,
            state: ScanState::Fresh,
            last_yielded: None,
        }
    }

    /// Returns the parsed query driving this scan.
    pub fn query(&self) -> &ParsedQuery {
        &self.query
    }

    /// Returns the requester, if any.
    pub fn requester(&self) -> Option<&str> {
        self.requester.as_deref()
    }

    /// Returns the candidate snapshot.
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Rewinds to the start of the snapshot. Idempotent.
    pub fn reset(&mut self) {
        self.position = 0;
        self.state = ScanState::Fresh;
        self.last_yielded = None;
    }

    /// Returns true if [`ScanCursor::exclude_current`] may be called now,
    /// i.e. the last pull yielded a record.
    pub fn can_exclude(&self) -> bool {
        self.last_yielded.is_some()
    }

    /// Drops the record yielded by the last pull from the snapshot, so later
    /// passes never visit it again. Returns the excluded identifier.
    ///
    /// # Panics
    ///
    /// Panics unless the immediately preceding pull yielded a record.
    /// Calling it at any other time is a bug in the caller.
    pub fn exclude_current(&mut self) -> String {
        let Some(index) = self.last_yielded.take() else {
            panic!("exclude_current called without a freshly yielded match");
        };
        let identifier = self.candidates.remove_at(index);
        self.position -= 1;
        trace!(identifier = %identifier, "excluded from scan");
        identifier
    }

    fn rules(&self) -> MatchRules<'_> {
        MatchRules::new(
            &self.query,
            self.requester.as_deref(),
            self.directory,
            self.sessions,
        )
    }
}

impl Iterator for ScanCursor<'_> {
    type Item = Arc<UserRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.last_yielded = None;
        if self.state == ScanState::Exhausted {
            return None;
        }
        self.state = ScanState::Scanning;

        while let Some(identifier) = self.candidates.get(self.position) {
            let index = self.position;
            self.position += 1;
            if let Some(record) = self.rules().evaluate(identifier) {
                self.last_yielded = Some(index);
                return Some(record);
            }
        }

        self.state = ScanState::Exhausted;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            ScanState::Exhausted => (0, Some(0)),
            _ => (0, Some(self.candidates.len() - self.position)),
        }
    }
}

impl FusedIterator for ScanCursor<'_> {}

impl std::fmt::Debug for ScanCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanCursor")
            .field("query", &self.query)
            .field("requester", &self.requester)
            .field("candidates", &self.candidates.len())
            .field("position", &self.position)
            .field("state", &self.state)
            .finish()
    }
}
