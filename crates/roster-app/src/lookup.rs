// Rust guideline compliant 2026-10-18

//! Name lookup services over a loaded repository snapshot.

use crate::error::{AppError, Result};
use crate::repo::RepoContext;
use roster_core::{
    AmbiguousMatch, Catalog, Config, Localizer, MatchOutcome, MemoryDirectory, MessageKey,
    SearchFlag, SearchFlags, SessionTable, Sessions, UserMap, UserRecord,
};
use serde::Serialize;
use tracing::debug;

/// Everything a lookup needs, loaded once from disk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Every known user.
    pub directory: MemoryDirectory,
    /// Live sessions.
    pub sessions: SessionTable,
    /// Repository configuration.
    pub config: Config,
    /// Message catalog for user-facing errors.
    pub catalog: Catalog,
}

impl Snapshot {
    /// Loads users, sessions, configuration and messages for `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if any repository file cannot be read or parsed.
    pub fn load(context: &RepoContext) -> Result<Self> {
        let config = context.load_config()?;
        let catalog = context.load_catalog(&config)?;
        Ok(Self {
            directory: context.open_user_store()?.load_directory()?,
            sessions: context.open_session_store()?.load()?,
            config,
            catalog,
        })
    }

    /// Borrows a [`UserMap`] over this snapshot.
    #[must_use]
    pub fn user_map(&self) -> UserMap<'_> {
        UserMap::new(&self.directory, &self.sessions, &self.config)
    }

    /// Summarizes `record` with its current online state.
    #[must_use]
    pub fn summarize(&self, record: &UserRecord) -> UserSummary {
        UserSummary {
            username: record.username.clone(),
            nickname: record.nickname.clone(),
            display_name: record.display_name().to_string(),
            online: self.sessions.is_online(&record.username),
        }
    }
}

/// A lookup request as issued by a command.
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    /// The query as typed, prefixes included.
    pub query: String,
    /// Who is searching; `None` skips visibility checks.
    pub requester: Option<String>,
    /// Search offline users as if `!` had been typed.
    pub include_offline: bool,
    /// Include hidden users as if `#` had been typed.
    pub include_hidden: bool,
}

impl LookupRequest {
    /// Creates a request for `query` with no forced flags.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    fn forced_flags(&self) -> SearchFlags {
        let mut flags = SearchFlags::default();
        if self.include_offline {
            flags = flags.with(SearchFlag::Offline);
        }
        if self.include_hidden {
            flags = flags.with(SearchFlag::Hidden);
        }
        flags
    }
}

/// A matched user as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Canonical name.
    pub username: String,
    /// Nickname, if one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Name shown to other users.
    pub display_name: String,
    /// Whether the user is connected right now.
    pub online: bool,
}

/// Repository totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    /// Unique users ever recorded.
    pub known_users: usize,
    /// Users connected right now.
    pub online_users: usize,
}

/// Resolves a request to exactly one user.
///
/// # Errors
///
/// Returns an error if:
/// - The query matches nobody ([`AppError::UserNotFound`])
/// - The query matches several users ([`AppError::TooManyMatches`])
pub fn resolve_one(snapshot: &Snapshot, request: &LookupRequest) -> Result<UserSummary> {
    let cursor = snapshot.user_map().match_users(
        &request.query,
        request.requester.as_deref(),
        request.forced_flags(),
    );

    match roster_core::resolve_one(cursor) {
        MatchOutcome::Found(record) => {
            debug!(query = %request.query, user = %record.username, "resolved user");
            Ok(snapshot.summarize(&record))
        }
        MatchOutcome::NotFound => Err(AppError::UserNotFound {
            query: request.query.clone(),
            message: snapshot.catalog.message(MessageKey::UserNotFound, &[]),
        }),
        MatchOutcome::Ambiguous(mut ambiguous) => {
            let matches = ambiguous.display_names();
            let message = AmbiguousMatch::message_for(&matches, &snapshot.catalog);
            debug!(query = %request.query, count = matches.len(), "ambiguous user query");
            Err(AppError::TooManyMatches {
                query: request.query.clone(),
                message,
                matches,
            })
        }
    }
}

/// Lists every user a request matches, in scan order.
#[must_use]
pub fn list_matches(snapshot: &Snapshot, request: &LookupRequest) -> Vec<UserSummary> {
    snapshot
        .user_map()
        .match_users(
            &request.query,
            request.requester.as_deref(),
            request.forced_flags(),
        )
        .map(|record| snapshot.summarize(&record))
        .collect()
}

/// Counts known and connected users.
#[must_use]
pub fn stats(snapshot: &Snapshot) -> RosterStats {
    RosterStats {
        known_users: snapshot.user_map().unique_user_count(),
        online_users: snapshot.sessions.online_count(),
    }
}
