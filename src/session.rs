//! Per-session sync state, one entry per mirrored collection.
//!
//! Decides where a load reads from:
//!
//! | state       | load reads from |
//! |-------------|-----------------|
//! | `NotLoaded` | remote          |
//! | `Stale`     | remote          |
//! | `Loaded`    | local mirror    |

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionState {
    #[default]
    NotLoaded,
    Loaded,
    /// Fetched before, but changed locally since.
    Stale,
}

impl CollectionState {
    pub fn needs_remote(self) -> bool {
        self != CollectionState::Loaded
    }

    /// Marks a loaded collection stale. A collection that was never loaded stays `NotLoaded`.
    pub fn invalidate(&mut self) {
        if *self == CollectionState::Loaded {
            *self = CollectionState::Stale;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub catalog: CollectionState,

    #[serde(default)]
    pub profile: CollectionState,

    #[serde(default)]
    pub subscriptions: CollectionState,
}

impl SessionState {
    /// A subscription was added, edited or removed.
    pub fn subscriptions_changed(&mut self) {
        self.subscriptions.invalidate();
        self.profile.invalidate();
    }

    /// Forces the next catalog load to go to the remote.
    pub fn invalidate_catalog(&mut self) {
        self.catalog = CollectionState::NotLoaded;
    }

    /// Forgets everything account specific. The catalog is shared across accounts.
    pub fn signed_out(&mut self) {
        self.profile = CollectionState::NotLoaded;
        self.subscriptions = CollectionState::NotLoaded;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
