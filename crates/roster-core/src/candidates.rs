// Rust guideline compliant 2026-10-18

//! Candidate selection for a scan.

use crate::{Directory, SearchFlags, Sessions};
use std::collections::HashSet;

/// Point-in-time snapshot of the identifiers a scan will visit.
///
/// Order carries no meaning. Identifiers are unique (case-insensitively).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    identifiers: Vec<String>,
}

impl CandidateSet {
    /// An empty set; scans over it match nobody.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns true if there is nothing to scan.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns the identifier at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.identifiers.get(index).map(String::as_str)
    }

    /// Iterates over the identifiers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> String {
        self.identifiers.remove(index)
    }
}

impl FromIterator<String> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let identifiers = iter
            .into_iter()
            .filter(|id| seen.insert(id.to_lowercase()))
            .collect();
        Self { identifiers }
    }
}

/// Takes the candidate snapshot for a query.
///
/// Offline searches scan every identifier the directory knows; all other
/// searches scan only connected users.
pub fn resolve_candidates(
    flags: SearchFlags,
    directory: &dyn Directory,
    sessions: &dyn Sessions,
) -> CandidateSet {
    if flags.search_offline() {
        directory.known_identifiers().into_iter().collect()
    } else {
        sessions.online_identifiers().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryDirectory, SearchFlag, SessionTable, UserRecord};

    fn fixture() -> (MemoryDirectory, SessionTable) {
        let directory = MemoryDirectory::from_records([
            UserRecord::new("steve"),
            UserRecord::new("bob"),
            UserRecord::new("alex"),
        ]);
        let mut sessions = SessionTable::new();
        sessions.connect("steve");
        (directory, sessions)
    }

    #[test]
    fn test_online_search_uses_sessions() {
        let (directory, sessions) = fixture();
        let set = resolve_candidates(SearchFlags::default(), &directory, &sessions);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["steve"]);
    }

    #[test]
    fn test_offline_search_uses_directory() {
        let (directory, sessions) = fixture();
        let flags = SearchFlags::default().with(SearchFlag::Offline);
        let set = resolve_candidates(flags, &directory, &sessions);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_snapshot_ignores_later_changes() {
        let (directory, mut sessions) = fixture();
        let set = resolve_candidates(SearchFlags::default(), &directory, &sessions);
        sessions.connect("bob");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: CandidateSet = vec!["Steve".to_string(), "steve".to_string()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some("Steve"));
    }
}
