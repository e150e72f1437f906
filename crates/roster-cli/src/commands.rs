// Rust guideline compliant 2026-10-18

//! Command implementations for the Roster CLI.

pub mod init;
pub mod lookup;
pub mod session;
pub mod stats;
pub mod user;
