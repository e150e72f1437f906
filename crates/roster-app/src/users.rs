// Rust guideline compliant 2026-10-18

//! User directory maintenance.

use crate::error::Result;
use crate::lookup::{Snapshot, UserSummary};
use crate::repo::RepoContext;
use roster_core::{UserRecord, UserStore};
use tracing::info;

/// Registers a new user.
///
/// # Arguments
///
/// * `context` - Repository to write to
/// * `username` - Canonical name
/// * `nickname` - Optional display name
///
/// # Errors
///
/// Returns an error if:
/// - The record fails validation
/// - A user with the same (case-insensitive) name exists
/// - The store cannot be locked, read or written
pub fn add_user(
    context: &RepoContext,
    username: &str,
    nickname: Option<String>,
) -> Result<UserRecord> {
    let record = UserRecord {
        nickname,
        ..UserRecord::new(username)
    };
    record.validate()?;

    let store = context.open_user_store()?;
    store.with_lock(|| {
        let mut directory = store.load_directory()?;
        directory.insert(record.clone())?;
        store.save(&record)
    })?;

    info!(user = %record.username, "added user");
    Ok(record)
}

/// Removes a user along with all of its session state.
///
/// # Errors
///
/// Returns an error if the user does not exist or a store cannot be locked
/// or written.
pub fn remove_user(context: &RepoContext, name: &str) -> Result<()> {
    let store = context.open_user_store()?;
    store.with_lock(|| store.delete(name))?;

    context
        .open_session_store()?
        .update(|sessions| sessions.forget(name))?;

    info!(user = name, "removed user");
    Ok(())
}

/// Sets or clears a user's nickname.
///
/// # Errors
///
/// Returns an error if:
/// - The user does not exist
/// - The new nickname is blank
/// - The store cannot be locked, read or written
pub fn set_nickname(
    context: &RepoContext,
    name: &str,
    nickname: Option<String>,
) -> Result<UserRecord> {
    let store = context.open_user_store()?;
    let record = store.with_lock(|| update_nickname(&store, name, nickname))?;
    info!(user = %record.username, nickname = ?record.nickname, "updated nickname");
    Ok(record)
}

fn update_nickname(
    store: &UserStore,
    name: &str,
    nickname: Option<String>,
) -> roster_core::Result<UserRecord> {
    let mut record = store.load_by_name(name)?;
    record.nickname = nickname;
    record.validate()?;
    store.save(&record)?;
    Ok(record)
}

/// Summarizes every known user, ordered by name.
#[must_use]
pub fn list_users(snapshot: &Snapshot) -> Vec<UserSummary> {
    let mut users: Vec<UserSummary> = snapshot
        .directory
        .records()
        .map(|record| snapshot.summarize(record))
        .collect();
    users.sort_by_key(|user| user.username.to_lowercase());
    users
}
