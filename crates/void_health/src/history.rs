//! Health change log

use crate::entity::EntityRef;
use std::time::Instant;

/// A single recorded health change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthLogEntry {
    /// Entity the change is attributed to
    pub source: EntityRef,
    /// Signed change (positive for healing, negative for damage)
    pub delta: f32,
    /// When the change was applied
    pub timestamp: Instant,
}

impl HealthLogEntry {
    /// Create an entry stamped with the current time
    pub fn new(source: EntityRef, delta: f32) -> Self {
        Self {
            source,
            delta,
            timestamp: Instant::now(),
        }
    }

    /// Check if this entry records damage
    pub fn is_damage(&self) -> bool {
        self.delta < 0.0
    }

    /// Check if this entry records healing
    pub fn is_heal(&self) -> bool {
        self.delta > 0.0
    }
}

/// Append-only sequence of health changes, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<HealthLogEntry>,
}

impl ChangeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub(crate) fn push(&mut self, entry: HealthLogEntry) {
        self.entries.push(entry);
    }

    /// Drop all entries
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HealthLogEntry] {
        &self.entries
    }

    /// Iterate over entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HealthLogEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HealthLogEntry> {
        self.entries.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all damage deltas, as a positive amount
    pub fn total_damage(&self) -> f32 {
        -self.iter().filter(|e| e.is_damage()).map(|e| e.delta).sum::<f32>()
    }

    /// Sum of all healing deltas
    pub fn total_healing(&self) -> f32 {
        self.iter().filter(|e| e.is_heal()).map(|e| e.delta).sum()
    }

    /// Entries attributed to a given source
    pub fn by_source(&self, source: EntityRef) -> impl Iterator<Item = &HealthLogEntry> {
        self.entries.iter().filter(move |e| e.source == source)
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a HealthLogEntry;
    type IntoIter = std::slice::Iter<'a, HealthLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
