//! In-memory record cache
//!
//! Receives materialized records from normalization passes and serves them
//! back by identifier. The cache is the one piece shared between concurrent
//! passes, so every access goes through a `parking_lot::RwLock`.
//!
//! Publishing is last-write-wins per identifier: a record published by a
//! later pass replaces the earlier one.

use feedgraph_normalize::{
    ArrayRef, Entity, Identifier, ObjectRef, Record, RecordSink, TableName,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
pub struct RecordCache {
    records: RwLock<HashMap<Identifier, Record>>,
}

/// Point-in-time copy of the cache, ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub records: Vec<Record>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Identifier) -> Option<Record> {
        self.records.read().get(id).cloned()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.records.read().contains_key(id)
    }

    /// Typed lookup. `None` if absent or stored under a different type.
    pub fn get_as<T: Entity>(&self, key: &str) -> Option<T> {
        let record = self.get(&Identifier::new(key, T::TABLE))?;
        T::try_from(record).ok()
    }

    /// "Not found" is an ordinary outcome: references may point at entities
    /// that were never identifiable.
    pub fn resolve(&self, reference: &ObjectRef) -> Option<Record> {
        self.get(&reference.identifier())
    }

    pub fn resolve_as<T: Entity>(&self, reference: &ObjectRef) -> Option<T> {
        if reference.table != T::TABLE {
            return None;
        }
        self.get_as(&reference.id)
    }

    /// Resolves in order, skipping ids that are not cached.
    pub fn resolve_all<T: Entity>(&self, reference: &ArrayRef) -> Vec<T> {
        if reference.table != T::TABLE {
            return Vec::new();
        }
        let records = self.records.read();
        reference
            .identifiers()
            .filter_map(|id| records.get(&id).cloned())
            .filter_map(|record| T::try_from(record).ok())
            .collect()
    }

    pub fn remove(&self, id: &Identifier) -> Option<Record> {
        self.records.write().remove(id)
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Record count per table.
    pub fn table_counts(&self) -> BTreeMap<TableName, usize> {
        let mut counts = BTreeMap::new();
        for id in self.records.read().keys() {
            *counts.entry(id.table).or_default() += 1;
        }
        counts
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        let records = self.records.read();
        let mut entries: Vec<(&Identifier, &Record)> = records.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        CacheSnapshot {
            records: entries.into_iter().map(|(_, r)| r.clone()).collect(),
        }
    }
}

impl RecordSink for RecordCache {
    fn publish(&self, id: Identifier, record: Record) {
        let replaced = self.records.write().insert(id, record);
        if replaced.is_some() {
            tracing::trace!("replaced cached record");
        }
    }
}
