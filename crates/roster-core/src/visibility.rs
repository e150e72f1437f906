// Rust guideline compliant 2026-10-18

//! Visibility policy for surfacing matches to a requester.

use crate::{SearchFlags, Sessions};

/// Decides whether `candidate` may be shown to `requester`.
///
/// Offline parties are never hidden from each other: the rule only bites
/// when both the requester and the candidate are connected. In that case the
/// candidate is visible if the search asked for offline or hidden users, or
/// the requester can currently see the candidate.
///
/// # Arguments
///
/// * `sessions` - Live session state
/// * `requester` - Who is searching; `None` for the console or a system caller
/// * `candidate` - Identifier of the matched user
/// * `flags` - Flags of the current query
pub fn is_visible(
    sessions: &dyn Sessions,
    requester: Option<&str>,
    candidate: &str,
    flags: SearchFlags,
) -> bool {
    let Some(requester) = requester else {
        return true;
    };

    if !sessions.is_online(requester) || !sessions.is_online(candidate) {
        return true;
    }

    flags.search_offline() || flags.include_hidden() || sessions.can_see(requester, candidate)
}
