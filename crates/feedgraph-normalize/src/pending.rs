//! Per-pass store of flattened fragments awaiting materialization.
//!
//! A `PendingStore` is created empty for one normalization pass, filled by
//! flattening, drained by materialization and then dropped. It is not `Clone`
//! and is never shared between passes.

use crate::{Fragment, Identifier, TableName};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct PendingStore {
    tables: BTreeMap<TableName, BTreeMap<String, Fragment>>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Identifier) -> Option<&Fragment> {
        self.tables.get(&id.table)?.get(&id.key)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.get(id).is_some()
    }

    /// Merges `fragment` onto an existing entry (fields of `fragment` win) or
    /// inserts it. Returns `true` when an entry was already present.
    pub fn merge(&mut self, id: &Identifier, fragment: Fragment) -> bool {
        let table = self.tables.entry(id.table).or_default();
        match table.get_mut(&id.key) {
            Some(existing) => {
                existing.merge_from(fragment);
                true
            }
            None => {
                table.insert(id.key.clone(), fragment);
                false
            }
        }
    }

    /// Removes one field from an existing entry. No-op if the entry is absent.
    pub fn remove_field(&mut self, id: &Identifier, field: &str) -> Option<Value> {
        self.tables.get_mut(&id.table)?.get_mut(&id.key)?.remove(field)
    }

    /// Removes and returns the entry so it cannot be materialized twice.
    pub fn take(&mut self, id: &Identifier) -> Option<Fragment> {
        let table = self.tables.get_mut(&id.table)?;
        let fragment = table.remove(&id.key);
        if table.is_empty() {
            self.tables.remove(&id.table);
        }
        fragment
    }

    /// Removes the first remaining entry in table order, then key order.
    pub fn pop_next(&mut self) -> Option<(Identifier, Fragment)> {
        let mut first = self.tables.first_entry()?;
        let (key, fragment) = first.get_mut().pop_first()?;
        let table = *first.key();
        if first.get().is_empty() {
            first.remove();
        }
        Some((Identifier::new(key, table), fragment))
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_len(&self, table: TableName) -> usize {
        self.tables.get(&table).map_or(0, BTreeMap::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Identifier, &Fragment)> {
        self.tables.iter().flat_map(|(table, entries)| {
            entries
                .iter()
                .map(move |(key, fragment)| (Identifier::new(key.clone(), *table), fragment))
        })
    }
}
