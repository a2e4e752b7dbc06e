//! # Comparison State
//!
//! Open comparisons. Each one owns a carousel over the same dogs so the
//! mobile layout can page through the columns one dog at a time.

use uuid::Uuid;

use pawfinder_core::ComparisonTable;

use crate::error::SessionResult;
use crate::state::registry::InstanceRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub table: ComparisonTable,
    pub carousel_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ComparisonStore {
    entries: InstanceRegistry<ComparisonEntry>,
}

impl ComparisonStore {
    pub fn new() -> Self {
        ComparisonStore {
            entries: InstanceRegistry::new("comparison"),
        }
    }

    pub fn insert(&self, entry: ComparisonEntry) -> SessionResult<Uuid> {
        self.entries.insert(entry)
    }

    pub fn get(&self, id: Uuid) -> SessionResult<ComparisonEntry> {
        self.entries.with(id, ComparisonEntry::clone)
    }

    pub fn remove(&self, id: Uuid) -> SessionResult<ComparisonEntry> {
        self.entries.remove(id)
    }
}

impl Default for ComparisonStore {
    fn default() -> Self {
        Self::new()
    }
}
