use crate::TableName;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters for one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// Distinct entities stored in the pending store.
    pub flattened: usize,
    /// Fragments merged onto an entity already pending.
    pub revisits: usize,
    /// Fragments dropped as unidentifiable or malformed.
    pub dropped: usize,
    /// Records built and published, per table.
    pub materialized: BTreeMap<TableName, usize>,
    /// Pending entries whose build failed.
    pub skipped: usize,
}

impl PassStats {
    pub fn materialized_total(&self) -> usize {
        self.materialized.values().sum()
    }
}
