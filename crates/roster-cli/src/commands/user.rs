// Rust guideline compliant 2026-10-18

//! Implementation of the `roster user` subcommands.

use crate::OutputFormatter;
use anyhow::Result;
use roster_app::{RepoContext, Snapshot};
use std::path::Path;

/// Registers a user.
///
/// # Errors
///
/// Returns an error if the repository is missing, the name is invalid or
/// already taken, or the store cannot be written.
pub fn add(
    root: Option<&Path>,
    username: &str,
    nickname: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let record = roster_app::add_user(&context, username, nickname)?;
    println!(
        "{}",
        formatter.format_success(&format!("Added user {}", record.username))
    );
    Ok(())
}

/// Removes a user.
///
/// # Errors
///
/// Returns an error if the repository is missing, the user does not exist,
/// or a store cannot be written.
pub fn remove(root: Option<&Path>, username: &str, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = RepoContext::discover(root)?;
    roster_app::remove_user(&context, username)?;
    println!(
        "{}",
        formatter.format_success(&format!("Removed user {}", username))
    );
    Ok(())
}

/// Sets or clears a nickname.
///
/// # Errors
///
/// Returns an error if the repository is missing, the user does not exist,
/// or the nickname is blank.
pub fn nick(
    root: Option<&Path>,
    username: &str,
    nickname: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let record = roster_app::set_nickname(&context, username, nickname)?;
    let message = match &record.nickname {
        Some(nickname) => format!("{} is now known as {}", record.username, nickname),
        None => format!("Cleared nickname of {}", record.username),
    };
    println!("{}", formatter.format_success(&message));
    Ok(())
}

/// Lists every known user.
///
/// # Errors
///
/// Returns an error if the repository is missing or cannot be read.
pub fn list(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let snapshot = Snapshot::load(&context)?;
    println!(
        "{}",
        formatter.format_users(&roster_app::list_users(&snapshot))
    );
    Ok(())
}
