//! Opaque entity handle used for owners and damage sources

use core::fmt;
use serde::{Deserialize, Serialize};

/// Reference to the entity a health component belongs to, or to the entity
/// that caused a change. The health system never dereferences it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef(pub u64);

impl EntityRef {
    /// Placeholder for "no entity" (environment, scripted changes)
    pub const NONE: Self = Self(u64::MAX);

    /// Create a reference from a raw entity id
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw entity id
    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }

    /// Check if this is the placeholder reference
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityRef {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<u64> for EntityRef {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "EntityRef(none)")
        } else {
            write!(f, "EntityRef({})", self.0)
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<none>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}
