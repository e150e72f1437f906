// Rust guideline compliant 2026-10-18

//! Implementation of the `roster session` subcommands.

use crate::terminal::print_warning;
use crate::OutputFormatter;
use anyhow::Result;
use roster_app::{presence, RepoContext};
use std::path::Path;

/// Session changes accepted by [`execute`].
#[derive(Debug, Clone, clap::Subcommand)]
pub enum SessionAction {
    /// Mark a user as connected
    Connect {
        /// Username
        name: String,
    },

    /// Mark a user as disconnected
    Disconnect {
        /// Username
        name: String,
    },

    /// Hide a user from everyone without the see-vanished grant
    Vanish {
        /// Username
        name: String,
    },

    /// Make a vanished user visible again
    Reveal {
        /// Username
        name: String,
    },

    /// Let a user see vanished users
    Grant {
        /// Username
        name: String,
    },

    /// Hide one user from another
    Hide {
        /// User who should no longer see the target
        viewer: String,

        /// User to hide
        target: String,
    },

    /// Undo a hide
    Unhide {
        /// User who should see the target again
        viewer: String,

        /// User to show
        target: String,
    },
}

/// Applies a session change.
///
/// # Errors
///
/// Returns an error if the repository is missing, a named user is unknown,
/// or the session table cannot be written.
pub fn execute(
    root: Option<&Path>,
    action: SessionAction,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let context = RepoContext::discover(root)?;

    let message = match action {
        SessionAction::Connect { name } => {
            if !presence::connect(&context, &name)? {
                print_warning(&format!("{} is already online", name));
            }
            format!("{} connected", name)
        }
        SessionAction::Disconnect { name } => {
            if !presence::disconnect(&context, &name)? {
                print_warning(&format!("{} was not online", name));
            }
            format!("{} disconnected", name)
        }
        SessionAction::Vanish { name } => {
            presence::vanish(&context, &name)?;
            format!("{} vanished", name)
        }
        SessionAction::Reveal { name } => {
            presence::reveal(&context, &name)?;
            format!("{} revealed", name)
        }
        SessionAction::Grant { name } => {
            presence::grant_see_vanished(&context, &name)?;
            format!("{} can see vanished users", name)
        }
        SessionAction::Hide { viewer, target } => {
            presence::hide(&context, &viewer, &target)?;
            format!("{} is hidden from {}", target, viewer)
        }
        SessionAction::Unhide { viewer, target } => {
            presence::unhide(&context, &viewer, &target)?;
            format!("{} is visible to {}", target, viewer)
        }
    };

    println!("{}", formatter.format_success(&message));
    Ok(())
}
