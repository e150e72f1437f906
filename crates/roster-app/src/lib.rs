// Rust guideline compliant 2026-10-18

//! Shared application services for Roster.
//!
//! This crate provides reusable, non-CLI-specific helpers for repository
//! discovery, user lookups with localized errors, and standardized response
//! envelopes.

pub mod error;
pub mod lookup;
pub mod presence;
pub mod repo;
pub mod response;
pub mod users;

pub use error::{AppError, ErrorCode, Result};
pub use lookup::{list_matches, resolve_one, stats, LookupRequest, RosterStats, Snapshot, UserSummary};
pub use repo::RepoContext;
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use users::{add_user, list_users, remove_user, set_nickname};
