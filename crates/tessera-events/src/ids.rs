//! Type-safe entity identifier.
//!
//! Identifiers use UUID v7 (time-ordered) so that entities created later
//! sort after earlier ones in logs and dispatch tables.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity.
///
/// Notifications never carry an entity; the identifier travels next to the
/// notification when it is handed to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new identifier using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
