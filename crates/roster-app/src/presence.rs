// Rust guideline compliant 2026-10-18

//! Session state changes: connecting, vanishing, and hiding users.

use crate::error::{AppError, Result};
use crate::repo::RepoContext;
use roster_core::{Directory, Error as CoreError, SessionTable, UserRecord};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Marks a known user as connected.
///
/// Returns false if the user was already online.
///
/// # Errors
///
/// Returns an error if the user is unknown or a store cannot be accessed.
pub fn connect(context: &RepoContext, name: &str) -> Result<bool> {
    let record = require_user(context, name)?;
    update_sessions(context, |sessions| sessions.connect(&record.username))
}

/// Marks a user as disconnected and stamps their last-seen time.
///
/// Returns false if the user was not online.
///
/// # Errors
///
/// Returns an error if a store cannot be accessed.
pub fn disconnect(context: &RepoContext, name: &str) -> Result<bool> {
    let was_online = update_sessions(context, |sessions| sessions.disconnect(name))?;
    if was_online {
        stamp_last_seen(context, name)?;
    }
    Ok(was_online)
}

/// Hides a user from everyone without the see-vanished grant.
///
/// # Errors
///
/// Returns an error if the user is unknown or a store cannot be accessed.
pub fn vanish(context: &RepoContext, name: &str) -> Result<()> {
    require_user(context, name)?;
    update_sessions(context, |sessions| sessions.vanish(name))
}

/// Undoes [`vanish`].
///
/// # Errors
///
/// Returns an error if the session store cannot be accessed.
pub fn reveal(context: &RepoContext, name: &str) -> Result<()> {
    update_sessions(context, |sessions| sessions.reveal(name))
}

/// Lets a user see vanished users.
///
/// # Errors
///
/// Returns an error if the user is unknown or a store cannot be accessed.
pub fn grant_see_vanished(context: &RepoContext, name: &str) -> Result<()> {
    require_user(context, name)?;
    update_sessions(context, |sessions| sessions.grant_see_vanished(name))
}

/// Hides `target` from `viewer` only.
///
/// # Errors
///
/// Returns an error if either user is unknown, the two are the same user, or
/// a store cannot be accessed.
pub fn hide(context: &RepoContext, viewer: &str, target: &str) -> Result<()> {
    if viewer.eq_ignore_ascii_case(target) {
        return Err(AppError::InvalidInput(
            "A user cannot be hidden from themselves".to_string(),
        ));
    }
    require_user(context, viewer)?;
    require_user(context, target)?;
    update_sessions(context, |sessions| sessions.hide(viewer, target))
}

/// Undoes [`hide`].
///
/// # Errors
///
/// Returns an error if the session store cannot be accessed.
pub fn unhide(context: &RepoContext, viewer: &str, target: &str) -> Result<()> {
    update_sessions(context, |sessions| sessions.unhide(viewer, target))
}

fn require_user(context: &RepoContext, name: &str) -> Result<Arc<UserRecord>> {
    context
        .open_user_store()?
        .load_directory()?
        .record(name)
        .ok_or_else(|| AppError::Core(CoreError::UserNotFound(name.to_string())))
}

fn update_sessions<T>(
    context: &RepoContext,
    change: impl FnOnce(&mut SessionTable) -> T,
) -> Result<T> {
    let outcome = context.open_session_store()?.update(|sessions| {
        let outcome = change(sessions);
        debug!(online = sessions.online_count(), "saving sessions");
        outcome
    })?;
    Ok(outcome)
}

fn stamp_last_seen(context: &RepoContext, name: &str) -> Result<()> {
    let now = unix_timestamp()?;
    let store = context.open_user_store()?;
    store.with_lock(|| match store.load_by_name(name) {
        Ok(mut record) => {
            record.last_seen = now;
            store.save(&record)
        }
        Err(CoreError::UserNotFound(_)) => {
            warn!(user = name, "disconnected user has no record");
            Ok(())
        }
        Err(err) => Err(err),
    })?;
    Ok(())
}

fn unix_timestamp() -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| AppError::InvalidInput(format!("System time before epoch: {err}")))?
        .as_secs();
    Ok(i64::try_from(now).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::users::add_user;
    use roster_core::Sessions;
    use tempfile::TempDir;

    fn repo() -> (TempDir, RepoContext) {
        let temp_dir = TempDir::new().unwrap();
        let context = RepoContext::init(Some(temp_dir.path())).unwrap();
        add_user(&context, "Steve", None).unwrap();
        add_user(&context, "alex", None).unwrap();
        (temp_dir, context)
    }

    fn sessions(context: &RepoContext) -> SessionTable {
        context.open_session_store().unwrap().load().unwrap()
    }

    #[test]
    fn test_connect_uses_canonical_name() {
        let (_temp_dir, context) = repo();
        assert!(connect(&context, "steve").unwrap());
        assert!(!connect(&context, "STEVE").unwrap());
        assert_eq!(sessions(&context).online_identifiers(), vec!["Steve".to_string()]);
    }

    #[test]
    fn test_connect_unknown_user_fails() {
        let (_temp_dir, context) = repo();
        let err = connect(&context, "ghost").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_disconnect_stamps_last_seen() {
        let (_temp_dir, context) = repo();
        connect(&context, "steve").unwrap();
        assert!(disconnect(&context, "steve").unwrap());
        assert!(!disconnect(&context, "steve").unwrap());

        let record = context.open_user_store().unwrap().load_by_name("steve").unwrap();
        assert!(record.last_seen > 0);
    }

    #[test]
    fn test_vanish_hide_round_trip() {
        let (_temp_dir, context) = repo();
        connect(&context, "steve").unwrap();
        connect(&context, "alex").unwrap();

        vanish(&context, "steve").unwrap();
        assert!(!sessions(&context).can_see("alex", "steve"));
        grant_see_vanished(&context, "alex").unwrap();
        assert!(sessions(&context).can_see("alex", "steve"));
        reveal(&context, "steve").unwrap();

        hide(&context, "alex", "steve").unwrap();
        assert!(!sessions(&context).can_see("alex", "steve"));
        unhide(&context, "alex", "steve").unwrap();
        assert!(sessions(&context).can_see("alex", "steve"));

        let err = hide(&context, "steve", "Steve").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    #[test]
    fn test_session_change_refused_while_locked() {
        use fs2::FileExt;

        let (_temp_dir, context) = repo();
        let held = std::fs::File::create(context.sessions_path().with_extension("lock")).unwrap();
        held.lock_exclusive().unwrap();

        let err = connect(&context, "steve").unwrap_err();
        assert_eq!(err.code(), ErrorCode::IoError);
        assert_eq!(sessions(&context).online_count(), 0);

        held.unlock().unwrap();
        assert!(connect(&context, "steve").unwrap());
    }
}
