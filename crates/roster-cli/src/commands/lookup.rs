// Rust guideline compliant 2026-10-18

//! Implementation of the `roster match` and `roster matches` commands.
//!
//! Both take a query with optional prefix characters:
//! `!` offline users, `~` nickname only, `-` username only,
//! `#` include hidden users.

use crate::OutputFormatter;
use anyhow::Result;
use roster_app::{LookupRequest, RepoContext, Snapshot};
use std::path::Path;
use tracing::debug;

/// Flags shared by both lookup commands.
#[derive(Debug, Clone, clap::Args)]
pub struct LookupArgs {
    /// Query, optionally prefixed with search flags
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Search offline users too
    #[arg(long)]
    pub offline: bool,

    /// Include hidden and vanished users
    #[arg(long)]
    pub hidden: bool,

    /// Search as this user, applying what they are allowed to see
    #[arg(long = "as", value_name = "USER")]
    pub requester: Option<String>,
}

impl From<LookupArgs> for LookupRequest {
    fn from(args: LookupArgs) -> Self {
        Self {
            query: args.query,
            requester: args.requester,
            include_offline: args.offline,
            include_hidden: args.hidden,
        }
    }
}

/// Resolves a query to exactly one user.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded, or the query
/// matches nobody or more than one user.
pub fn resolve(
    root: Option<&Path>,
    args: LookupArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let snapshot = Snapshot::load(&context)?;
    let request = LookupRequest::from(args);
    debug!(query = %request.query, "resolving user");

    let user = roster_app::resolve_one(&snapshot, &request)?;
    println!("{}", formatter.format_user(&user));
    Ok(())
}

/// Lists every user a query matches.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded.
pub fn list(root: Option<&Path>, args: LookupArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let context = RepoContext::discover(root)?;
    let snapshot = Snapshot::load(&context)?;
    let request = LookupRequest::from(args);

    let users = roster_app::list_matches(&snapshot, &request);
    println!("{}", formatter.format_users(&users));
    Ok(())
}
