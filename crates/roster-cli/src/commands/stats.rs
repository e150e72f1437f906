// Rust guideline compliant 2026-10-18

//! Implementation of the `roster stats` command.

use crate::OutputFormatter;
use anyhow::Result;
use roster_app::{RepoContext, Snapshot};
use std::path::Path;

/// Prints how many users are known and how many are online.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded.
pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let snapshot = Snapshot::load(&context)?;
    println!("{}", formatter.format_stats(&roster_app::stats(&snapshot)));
    Ok(())
}
