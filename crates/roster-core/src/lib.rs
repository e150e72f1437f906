// Rust guideline compliant 2026-10-18

//! Roster Core Library
//!
//! This crate resolves human-typed, possibly abbreviated names to users:
//! - Query parsing (prefix flags, nickname prefix, cleaned pattern)
//! - Candidate snapshots (online users or every known user)
//! - Visibility policy for hidden and vanished users
//! - Lazy, restartable match scanning
//! - One-user resolution with lazy ambiguity listing
//! - Directory, session and message collaborators with in-memory and file-backed implementations
//! - Configuration and error types

pub mod candidates;
pub mod config;
pub mod directory;
pub mod error;
pub mod messages;
pub mod models;
pub mod query;
pub mod resolve;
pub mod scan;
pub mod session;
pub mod storage;
pub mod user_map;
pub mod visibility;

pub use candidates::{resolve_candidates, CandidateSet};
pub use config::{Config, OutputFormat};
pub use directory::{Directory, MemoryDirectory};
pub use error::{Error, Result};
pub use messages::{Catalog, Localizer, MessageKey};
pub use models::UserRecord;
pub use query::{ParsedQuery, SearchFlag, SearchFlags};
pub use resolve::{resolve_one, resolve_user, AmbiguousMatch, MatchOutcome};
pub use scan::{MatchRules, ScanCursor, ScanState};
pub use session::{SessionSnapshot, SessionTable, Sessions};
pub use storage::{SessionStore, UserStore};
pub use user_map::UserMap;
pub use visibility::is_visible;
