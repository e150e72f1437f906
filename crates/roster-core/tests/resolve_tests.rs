// Rust guideline compliant 2026-10-18

//! Integration tests for resolving queries to users.
//!
//! These tests drive the full pipeline through `UserMap`: parsing, candidate
//! snapshots, visibility and lazy scanning.

use roster_core::{
    resolve_user, AmbiguousMatch, Catalog, Directory, Error, MatchOutcome, MemoryDirectory, SearchFlag,
    SearchFlags, SessionTable, UserMap, UserRecord,
};
use std::cell::Cell;
use std::sync::Arc;

/// Directory wrapper counting how often it is consulted.
struct CountingDirectory {
    inner: MemoryDirectory,
    record_calls: Cell<usize>,
    listing_calls: Cell<usize>,
}

impl CountingDirectory {
    fn new(inner: MemoryDirectory) -> Self {
        Self {
            inner,
            record_calls: Cell::new(0),
            listing_calls: Cell::new(0),
        }
    }
}

impl Directory for CountingDirectory {
    fn record(&self, identifier: &str) -> Option<Arc<UserRecord>> {
        self.record_calls.set(self.record_calls.get() + 1);
        self.inner.record(identifier)
    }

    fn known_identifiers(&self) -> Vec<String> {
        self.listing_calls.set(self.listing_calls.get() + 1);
        self.inner.known_identifiers()
    }
}

/// steve has no nickname, stevie goes by "SirSteve", bob by "Bobby".
fn directory() -> MemoryDirectory {
    MemoryDirectory::from_records([
        UserRecord::new("steve"),
        UserRecord::new("stevie").with_nickname("SirSteve"),
        UserRecord::new("bob").with_nickname("Bobby"),
        UserRecord::new("offlineguy").with_nickname("Sleepy"),
    ])
}

fn sessions() -> SessionTable {
    let mut sessions = SessionTable::new();
    for name in ["steve", "stevie", "bob", "alex"] {
        sessions.connect(name);
    }
    sessions
}

#[test]
fn test_two_matches_are_ambiguous_with_full_list() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let MatchOutcome::Ambiguous(mut ambiguous) = users.match_user("steve", false) else {
        panic!("expected ambiguous outcome");
    };

    let mut names = ambiguous.display_names();
    names.sort();
    assert_eq!(names, vec!["SirSteve".to_string(), "steve".to_string()]);

    let message = ambiguous.message(&Catalog::default());
    assert!(message.contains("SirSteve"));
    assert!(message.contains("steve"));
    assert!(message.contains(", "));
}

#[test]
fn test_ambiguous_message_from_collected_names_skips_rescan() {
    let directory = CountingDirectory::new(directory());
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let MatchOutcome::Ambiguous(mut ambiguous) = users.match_user("steve", false) else {
        panic!("expected ambiguous outcome");
    };

    let before = directory.record_calls.get();
    let names = ambiguous.display_names();
    let one_pass = directory.record_calls.get() - before;
    assert!(one_pass > 0);

    let message = AmbiguousMatch::message_for(&names, &Catalog::default());
    assert_eq!(directory.record_calls.get() - before, one_pass);
    assert_eq!(message, ambiguous.message(&Catalog::default()));
    assert_eq!(directory.record_calls.get() - before, 2 * one_pass);
}

#[test]
fn test_ambiguous_message_without_names_is_generic() {
    let catalog = Catalog::default();
    let generic = AmbiguousMatch::message_for(&[], &catalog);
    let listed = AmbiguousMatch::message_for(&["steve".to_string()], &catalog);
    assert!(!generic.contains("steve"));
    assert!(listed.contains("steve"));
}

#[test]
fn test_ambiguous_listing_can_be_repeated() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let MatchOutcome::Ambiguous(mut ambiguous) = users.match_user("steve", false) else {
        panic!("expected ambiguous outcome");
    };
    let first = ambiguous.display_names();
    let second = ambiguous.display_names();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_empty_query_is_not_found() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    assert!(users.match_user("", true).is_not_found());
    assert!(users.match_user("   ", true).is_not_found());
}

#[test]
fn test_prefix_only_query_never_touches_directory() {
    let directory = CountingDirectory::new(directory());
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    for raw in ["!~", "!", "#=@-", "!~"] {
        assert!(users.match_user(raw, true).is_not_found(), "{raw}");
    }
    assert_eq!(directory.record_calls.get(), 0);
    assert_eq!(directory.listing_calls.get(), 0);
}

#[test]
fn test_username_only_finds_bob() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let outcome = users.match_user("-bob", false);
    assert_eq!(
        outcome.found().map(|r| r.username.as_str()),
        Some("bob")
    );
}

#[test]
fn test_nickname_search_is_case_insensitive() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let outcome = users.match_user("@BOBBY", false);
    assert_eq!(outcome.found().map(|r| r.username.as_str()), Some("bob"));
}

#[test]
fn test_nickname_prefix_is_stripped() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, ".");

    let outcome = users.match_user(".sirst", false);
    assert_eq!(outcome.found().map(|r| r.username.as_str()), Some("stevie"));
}

#[test]
fn test_offline_users_need_offline_search() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    assert!(users.match_user("sleepy", false).is_not_found());
    assert_eq!(
        users
            .match_user("!sleepy", false)
            .found()
            .map(|r| r.username.as_str()),
        Some("offlineguy")
    );
    assert_eq!(
        users
            .match_user("sleepy", true)
            .found()
            .map(|r| r.username.as_str()),
        Some("offlineguy")
    );
}

#[test]
fn test_hidden_user_suppressed_for_online_requester() {
    let directory = directory();
    let mut sessions = sessions();
    sessions.hide("alex", "steve");
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    // "-steve" matches steve only (stevie does not contain "steve").
    assert!(users
        .match_user_excluding_hidden("-steve", "alex")
        .is_not_found());

    let outcome = users.match_user_excluding_hidden("#-steve", "alex");
    assert_eq!(outcome.found().map(|r| r.username.as_str()), Some("steve"));

    let outcome = users.match_user_excluding_hidden("!-steve", "alex");
    assert_eq!(outcome.found().map(|r| r.username.as_str()), Some("steve"));
}

#[test]
fn test_hidden_flag_overrides_vanish() {
    let directory = directory();
    let mut sessions = sessions();
    sessions.vanish("steve");
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    // With steve vanished the dual-mode query only sees SirSteve.
    let outcome = users.match_user_excluding_hidden("steve", "alex");
    assert_eq!(outcome.found().map(|r| r.username.as_str()), Some("stevie"));

    let outcome = users.match_user_excluding_hidden("#steve", "alex");
    assert!(outcome.is_ambiguous());
}

#[test]
fn test_offline_requester_sees_hidden_users() {
    let directory = directory();
    let mut sessions = sessions();
    sessions.vanish("bob");
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let cursor = users.match_users("bob", Some("offlineguy"), SearchFlags::default());
    assert_eq!(cursor.count(), 1);

    let cursor = users.match_users("bob", Some("alex"), SearchFlags::default());
    assert_eq!(cursor.count(), 0);
}

#[test]
fn test_forced_flags_widen_the_snapshot() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let forced = SearchFlags::default().with(SearchFlag::Offline);
    let cursor = users.match_users("sleepy", Some("alex"), forced);
    assert_eq!(cursor.candidates().len(), directory.len());
    assert_eq!(cursor.count(), 1);
}

#[test]
fn test_resolve_user_errors() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let err = resolve_user(users.match_all("zzz", true)).unwrap_err();
    assert!(matches!(err, Error::UserNotFound(ref q) if q == "zzz"));

    let err = resolve_user(users.match_all("steve", false)).unwrap_err();
    match err {
        Error::TooManyMatches { query, mut matches } => {
            assert_eq!(query, "steve");
            matches.sort();
            assert_eq!(matches, vec!["SirSteve".to_string(), "steve".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let record = resolve_user(users.match_all("bobby", false)).unwrap();
    assert_eq!(record.username, "bob");
}

#[test]
fn test_outcome_into_result() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let record = users.match_user("-bob", false).into_result("-bob").unwrap();
    assert_eq!(record.username, "bob");

    let err = users.match_user("sleepy", false).into_result("sleepy").unwrap_err();
    assert!(matches!(err, Error::UserNotFound(ref q) if q == "sleepy"));

    let err = users.match_user("steve", false).into_result("steve").unwrap_err();
    assert!(matches!(err, Error::TooManyMatches { ref matches, .. } if matches.len() == 2));
}

#[test]
fn test_first_match_loads_records_lazily() {
    let records = (0..500).map(|i| UserRecord::new(format!("user{i}")));
    let directory = CountingDirectory::new(MemoryDirectory::from_records(records));
    let sessions = SessionTable::new();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    // Username-only search never loads records for identifiers it misses.
    let offline = SearchFlags::default().with(SearchFlag::Offline);
    let mut cursor = users.match_users("-user42", None, offline);
    let mut found = 0;
    while cursor.next().is_some() {
        found += 1;
    }
    // user42 and user420..=user429
    assert_eq!(found, 11);
    assert_eq!(directory.record_calls.get(), 11);
}

#[test]
fn test_ambiguous_cursor_can_exclude_entries() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    let MatchOutcome::Ambiguous(ambiguous) = users.match_user("steve", false) else {
        panic!("expected ambiguous outcome");
    };
    let mut cursor = ambiguous.into_cursor();
    while let Some(record) = cursor.next() {
        if record.username == "stevie" {
            cursor.exclude_current();
        }
    }
    cursor.reset();
    let remaining: Vec<_> = cursor.map(|r| r.username.clone()).collect();
    assert_eq!(remaining, vec!["steve".to_string()]);
}

#[test]
fn test_user_map_lookups() {
    let directory = directory();
    let sessions = sessions();
    let users = UserMap::with_nickname_prefix(&directory, &sessions, "~");

    assert!(users.user_exists("BOB"));
    assert!(!users.user_exists("bo"));
    assert_eq!(
        users.get_user("Stevie").map(|r| r.display_name().to_string()),
        Some("SirSteve".to_string())
    );
    assert_eq!(users.unique_user_count(), 4);
    assert_eq!(users.all_unique_users().len(), 4);
}
