// Rust guideline compliant 2026-10-18

//! Implementation of the `roster init` command.
//!
//! Creates the `.roster` directory with an empty user file, an empty
//! session table and the default configuration.

use crate::OutputFormatter;
use anyhow::Result;
use roster_app::RepoContext;
use std::path::Path;

/// Initializes a new Roster repository.
///
/// Existing files are left untouched, so running it twice is harmless.
///
/// # Errors
///
/// Returns an error if the `.roster` directory or one of its files cannot be
/// created.
pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = RepoContext::init(root)?;
    println!(
        "{}",
        formatter.format_success(&format!(
            "Roster repository initialized at {}",
            context.roster_dir().display()
        ))
    );
    Ok(())
}
