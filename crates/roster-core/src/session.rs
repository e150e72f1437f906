// Rust guideline compliant 2026-10-18

//! Live sessions: who is connected and who can see whom.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Source of connection state and the live visibility relation.
pub trait Sessions {
    /// Returns the identifiers of currently connected users.
    fn online_identifiers(&self) -> Vec<String>;

    /// Returns true if `identifier` is currently connected.
    fn is_online(&self, identifier: &str) -> bool;

    /// Returns true if `viewer` can currently see `target`.
    ///
    /// Only meaningful when both users are online.
    fn can_see(&self, viewer: &str, target: &str) -> bool;
}

/// In-memory session table.
///
/// Names are stored lowercased; the name a user connected with is kept for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTable {
    online: BTreeMap<String, String>,
    vanished: BTreeSet<String>,
    see_vanished: BTreeSet<String>,
    hidden: BTreeSet<(String, String)>,
}

impl SessionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a user as connected. Returns false if already connected.
    pub fn connect(&mut self, name: &str) -> bool {
        match self.online.entry(name.to_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
                true
            }
        }
    }

    /// Marks a user as disconnected. Returns false if not connected.
    pub fn disconnect(&mut self, name: &str) -> bool {
        self.online.remove(&name.to_lowercase()).is_some()
    }

    /// Hides a user from everyone without the see-vanished grant.
    pub fn vanish(&mut self, name: &str) {
        self.vanished.insert(name.to_lowercase());
    }

    /// Undoes [`SessionTable::vanish`].
    pub fn reveal(&mut self, name: &str) {
        self.vanished.remove(&name.to_lowercase());
    }

    /// Lets `name` see vanished users.
    pub fn grant_see_vanished(&mut self, name: &str) {
        self.see_vanished.insert(name.to_lowercase());
    }

    /// Hides `target` from one specific `viewer`.
    pub fn hide(&mut self, viewer: &str, target: &str) {
        self.hidden
            .insert((viewer.to_lowercase(), target.to_lowercase()));
    }

    /// Undoes [`SessionTable::hide`].
    pub fn unhide(&mut self, viewer: &str, target: &str) {
        self.hidden
            .remove(&(viewer.to_lowercase(), target.to_lowercase()));
    }

    /// Drops every trace of a user: their session, vanish state, grant, and
    /// hidden pairs on either side.
    pub fn forget(&mut self, name: &str) {
        let key = name.to_lowercase();
        self.online.remove(&key);
        self.vanished.remove(&key);
        self.see_vanished.remove(&key);
        self.hidden
            .retain(|(viewer, target)| *viewer != key && *target != key);
    }

    /// Returns true if the user is vanished.
    pub fn is_vanished(&self, name: &str) -> bool {
        self.vanished.contains(&name.to_lowercase())
    }

    /// Number of connected users.
    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    /// Captures the table as a serializable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            online: self.online.values().cloned().collect(),
            vanished: self.vanished.iter().cloned().collect(),
            see_vanished: self.see_vanished.iter().cloned().collect(),
            hidden: self.hidden.iter().cloned().collect(),
        }
    }

    /// Rebuilds a table from a snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let mut table = Self::new();
        for name in &snapshot.online {
            table.connect(name);
        }
        for name in &snapshot.vanished {
            table.vanish(name);
        }
        for name in &snapshot.see_vanished {
            table.grant_see_vanished(name);
        }
        for (viewer, target) in &snapshot.hidden {
            table.hide(viewer, target);
        }
        table
    }
}

impl Sessions for SessionTable {
    fn online_identifiers(&self) -> Vec<String> {
        self.online.values().cloned().collect()
    }

    fn is_online(&self, identifier: &str) -> bool {
        self.online.contains_key(&identifier.to_lowercase())
    }

    fn can_see(&self, viewer: &str, target: &str) -> bool {
        let viewer = viewer.to_lowercase();
        let target = target.to_lowercase();

        if viewer == target {
            return true;
        }

        if self.vanished.contains(&target) && !self.see_vanished.contains(&viewer) {
            return false;
        }

        !self.hidden.contains(&(viewer, target))
    }
}

/// Serializable form of a [`SessionTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Connected users.
    #[serde(default)]
    pub online: Vec<String>,
    /// Users hidden from everyone.
    #[serde(default)]
    pub vanished: Vec<String>,
    /// Users who can see vanished users.
    #[serde(default)]
    pub see_vanished: Vec<String>,
    /// `(viewer, target)` pairs where target is hidden from viewer.
    #[serde(default)]
    pub hidden: Vec<(String, String)>,
}
