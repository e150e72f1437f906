// Rust guideline compliant 2026-10-18

//! Query parsing.
//!
//! A query is a run of single-character prefix flags followed by the search
//! pattern:
//!
//! | prefix | flag |
//! |--------|------|
//! | `!` | search offline users as well as online ones |
//! | `~` | match nicknames only |
//! | `-` | match usernames only |
//! | `@` | keyword search |
//! | `=` | exact search |
//! | `#` | include users hidden from the requester |
//!
//! The prefix scan stops at the first character that is not a flag. A single
//! leading nickname prefix (as configured) is then stripped from the pattern.
//! Regular expressions are deliberately not supported.

use serde::Serialize;

/// A single search switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFlag {
    /// Scan every known user instead of only connected ones.
    Offline,
    /// Match against nicknames only.
    NicknameOnly,
    /// Match against usernames only.
    UsernameOnly,
    /// Keyword search.
    Keyword,
    /// Exact search.
    Exact,
    /// Do not suppress users hidden from the requester.
    Hidden,
}

impl SearchFlag {
    /// All flags, in prefix-table order.
    pub const ALL: [SearchFlag; 6] = [
        SearchFlag::Offline,
        SearchFlag::NicknameOnly,
        SearchFlag::UsernameOnly,
        SearchFlag::Keyword,
        SearchFlag::Exact,
        SearchFlag::Hidden,
    ];

    /// Maps a query prefix character to its flag.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '!' => Some(SearchFlag::Offline),
            '~' => Some(SearchFlag::NicknameOnly),
            '-' => Some(SearchFlag::UsernameOnly),
            '@' => Some(SearchFlag::Keyword),
            '=' => Some(SearchFlag::Exact),
            '#' => Some(SearchFlag::Hidden),
            _ => None,
        }
    }

    /// Returns the query prefix character for this flag.
    pub fn prefix(self) -> char {
        match self {
            SearchFlag::Offline => '!',
            SearchFlag::NicknameOnly => '~',
            SearchFlag::UsernameOnly => '-',
            SearchFlag::Keyword => '@',
            SearchFlag::Exact => '=',
            SearchFlag::Hidden => '#',
        }
    }
}

/// Immutable set of search switches.
///
/// Flags can only be added, never cleared. When neither
/// [`SearchFlag::NicknameOnly`] nor [`SearchFlag::UsernameOnly`] is set both
/// nickname and username matching are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SearchFlags {
    offline: bool,
    nickname_only: bool,
    username_only: bool,
    keyword: bool,
    exact: bool,
    hidden: bool,
}

impl SearchFlags {
    /// Returns a copy with `flag` set.
    #[must_use]
    pub fn with(mut self, flag: SearchFlag) -> Self {
        match flag {
            SearchFlag::Offline => self.offline = true,
            SearchFlag::NicknameOnly => self.nickname_only = true,
            SearchFlag::UsernameOnly => self.username_only = true,
            SearchFlag::Keyword => self.keyword = true,
            SearchFlag::Exact => self.exact = true,
            SearchFlag::Hidden => self.hidden = true,
        }
        self
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub fn union(self, other: SearchFlags) -> Self {
        SearchFlag::ALL
            .into_iter()
            .filter(|flag| other.contains(*flag))
            .fold(self, SearchFlags::with)
    }

    /// Returns true if `flag` is set.
    pub fn contains(&self, flag: SearchFlag) -> bool {
        match flag {
            SearchFlag::Offline => self.offline,
            SearchFlag::NicknameOnly => self.nickname_only,
            SearchFlag::UsernameOnly => self.username_only,
            SearchFlag::Keyword => self.keyword,
            SearchFlag::Exact => self.exact,
            SearchFlag::Hidden => self.hidden,
        }
    }

    pub fn search_offline(&self) -> bool {
        self.offline
    }

    pub fn include_hidden(&self) -> bool {
        self.hidden
    }

    pub fn keyword(&self) -> bool {
        self.keyword
    }

    pub fn exact(&self) -> bool {
        self.exact
    }

    /// Whether nicknames are tested, taking the dual-mode default into account.
    pub fn matches_nickname(&self) -> bool {
        self.nickname_only || !self.username_only
    }

    /// Whether usernames are tested, taking the dual-mode default into account.
    pub fn matches_username(&self) -> bool {
        self.username_only || !self.nickname_only
    }
}

/// A parsed query: the raw input, its flags, and the cleaned pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    raw: String,
    flags: SearchFlags,
    pattern: String,
}

impl ParsedQuery {
    /// Parses a raw query.
    ///
    /// # Arguments
    ///
    /// * `raw` - The query as typed; may be empty
    /// * `nickname_prefix` - The configured nickname prefix, stripped once if present
    pub fn parse(raw: &str, nickname_prefix: &str) -> Self {
        Self::parse_with(raw, nickname_prefix, SearchFlags::default())
    }

    /// Parses a raw query on top of caller-forced flags.
    ///
    /// `forced` flags are applied before the prefix scan, so they behave
    /// exactly as if the matching prefix characters had been typed.
    pub fn parse_with(raw: &str, nickname_prefix: &str, forced: SearchFlags) -> Self {
        let trimmed = raw.trim();
        let mut flags = forced;
        let mut rest = "";

        for (offset, c) in trimmed.char_indices() {
            match SearchFlag::from_prefix(c) {
                Some(flag) => flags = flags.with(flag),
                None => {
                    rest = &trimmed[offset..];
                    break;
                }
            }
        }

        let mut pattern = rest.to_lowercase();
        let prefix = nickname_prefix.to_lowercase();
        if !pattern.is_empty() && !prefix.is_empty() && pattern.starts_with(&prefix) {
            pattern.drain(..prefix.len());
        }

        Self {
            raw: raw.to_string(),
            flags,
            pattern,
        }
    }

    /// Returns the query as originally typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed flags.
    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Returns the lowercased pattern; empty for an invalid query.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// A query is valid when something is left to match after stripping
    /// prefixes. Invalid queries match nobody.
    pub fn is_valid(&self) -> bool {
        !self.pattern.is_empty()
    }

    /// Case-insensitive substring test against the cleaned pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.is_valid() && text.to_lowercase().contains(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query_is_dual_mode() {
        let query = ParsedQuery::parse("Steve", "~");
        assert!(query.is_valid());
        assert_eq!(query.pattern(), "steve");
        assert!(query.flags().matches_nickname());
        assert!(query.flags().matches_username());
        assert!(!query.flags().search_offline());
    }

    #[test]
    fn test_every_prefix_sets_its_flag() {
        for flag in SearchFlag::ALL {
            let raw = format!("{}abc", flag.prefix());
            let query = ParsedQuery::parse(&raw, "");
            assert!(query.flags().contains(flag), "{:?} not set by {}", flag, raw);
            assert_eq!(query.pattern(), "abc");
        }
    }

    #[test]
    fn test_prefix_scan_stops_at_first_unrecognized() {
        let query = ParsedQuery::parse("!x#bob", "");
        assert!(query.flags().search_offline());
        assert!(!query.flags().include_hidden());
        assert_eq!(query.pattern(), "x#bob");
    }

    #[test]
    fn test_username_only_disables_nickname_matching() {
        let flags = ParsedQuery::parse("-bob", "").flags();
        assert!(flags.matches_username());
        assert!(!flags.matches_nickname());

        let flags = ParsedQuery::parse("~bob", "").flags();
        assert!(flags.matches_nickname());
        assert!(!flags.matches_username());
    }

    #[test]
    fn test_both_restrictions_enable_both_rules() {
        let flags = ParsedQuery::parse("~-bob", "").flags();
        assert!(flags.matches_nickname());
        assert!(flags.matches_username());
    }

    #[test]
    fn test_empty_and_prefix_only_queries_are_invalid() {
        assert!(!ParsedQuery::parse("", "~").is_valid());
        assert!(!ParsedQuery::parse("   ", "~").is_valid());
        assert!(!ParsedQuery::parse("!~", "~").is_valid());
        assert_eq!(ParsedQuery::parse("!~", "~").pattern(), "");
    }

    #[test]
    fn test_outer_whitespace_is_trimmed() {
        let query = ParsedQuery::parse("  !bob  ", "");
        assert!(query.flags().search_offline());
        assert_eq!(query.pattern(), "bob");
    }

    #[test]
    fn test_nickname_prefix_stripped_once() {
        let query = ParsedQuery::parse("..foo", ".");
        assert_eq!(query.pattern(), ".foo");
    }

    #[test]
    fn test_nickname_prefix_is_case_insensitive() {
        let query = ParsedQuery::parse("NickSteve", "nick");
        assert_eq!(query.pattern(), "steve");
    }

    #[test]
    fn test_nickname_prefix_alone_is_invalid() {
        let query = ParsedQuery::parse("#.", ".");
        assert!(query.flags().include_hidden());
        assert!(!query.is_valid());
    }

    #[test]
    fn test_forced_flags_are_kept() {
        let forced = SearchFlags::default().with(SearchFlag::Offline);
        let query = ParsedQuery::parse_with("#bob", "", forced);
        assert!(query.flags().search_offline());
        assert!(query.flags().include_hidden());
    }

    #[test]
    fn test_matches_is_case_insensitive_substring() {
        let query = ParsedQuery::parse("@Steve", "");
        assert!(query.flags().keyword());
        assert!(query.matches("xSTEVEx"));
        assert!(!query.matches("stev"));
    }

    #[test]
    fn test_exact_mode_still_uses_substring_matching() {
        let query = ParsedQuery::parse("=ste", "");
        assert!(query.flags().exact());
        assert!(query.matches("steve"));
    }

    #[test]
    fn test_union_is_additive() {
        let a = SearchFlags::default().with(SearchFlag::Offline);
        let b = SearchFlags::default().with(SearchFlag::Hidden);
        let both = a.union(b);
        assert!(both.search_offline());
        assert!(both.include_hidden());
        assert_eq!(a.union(SearchFlags::default()), a);
    }
}
