//! Recursive flattening with link substitution.
//!
//! Each nested fragment found at a declared link field is flattened into the
//! pending store under its own table first; only then is the parent's link
//! field replaced by a reference descriptor and the parent stored. A fragment
//! therefore never reaches the pending store with a nested fragment still
//! inline at one of its link fields.

use crate::{
    ArrayRef, Fragment, Identifier, LinkDeclaration, LinkKind, ObjectRef, ParserRegistry,
    PassStats, PendingStore, TableName,
};
use serde_json::Value;

/// Mutable state of one flattening pass: the registry to look parsers up in,
/// the pending store being filled, and counters for the pass.
pub struct FlattenContext<'a> {
    registry: &'a ParserRegistry,
    pending: PendingStore,
    stats: PassStats,
}

impl<'a> FlattenContext<'a> {
    pub fn new(registry: &'a ParserRegistry) -> Self {
        Self {
            registry,
            pending: PendingStore::new(),
            stats: PassStats::default(),
        }
    }

    pub fn pending(&self) -> &PendingStore {
        &self.pending
    }

    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    pub fn into_parts(self) -> (PendingStore, PassStats) {
        (self.pending, self.stats)
    }

    /// Flattens a raw wire value as an entity of `table`. Returns `None` (and
    /// stores nothing) when the value is not an object or cannot be
    /// identified.
    pub fn flatten_value(&mut self, table: TableName, value: Value) -> Option<Identifier> {
        match Fragment::from_value(value) {
            Some(fragment) => self.flatten_fragment(table, fragment),
            None => {
                self.stats.dropped += 1;
                tracing::debug!(%table, "dropping non-object fragment");
                None
            }
        }
    }

    pub fn flatten_fragment(&mut self, table: TableName, fragment: Fragment) -> Option<Identifier> {
        let registry = self.registry;
        let Some(parser) = registry.get(table) else {
            self.stats.dropped += 1;
            tracing::debug!(%table, "no parser registered; dropping fragment");
            return None;
        };
        let Some(id) = parser.identify(&fragment) else {
            self.stats.dropped += 1;
            tracing::debug!(%table, fields = fragment.len(), "dropping unidentifiable fragment");
            return None;
        };
        parser.flatten(fragment, &id, self);
        Some(id)
    }

    /// Standard link substitution followed by a merge into the pending store.
    ///
    /// Links are substituted on the incoming fragment, which is then merged
    /// onto whatever entry already exists for `id` (incoming fields win). An
    /// entry can appear during the recursion itself when an embed refers back
    /// to its parent.
    ///
    /// A link the incoming fragment carries is authoritative: when it is null
    /// or cannot be identified, the reference already stored for it is
    /// removed. A link the fragment does not carry leaves the stored
    /// reference alone.
    pub fn store_with_links(
        &mut self,
        links: &[LinkDeclaration],
        mut fragment: Fragment,
        id: &Identifier,
    ) {
        for link in links {
            let Some(nested) = fragment.remove(&link.fragment_field) else {
                continue;
            };
            match self.substitute(link, nested) {
                Some(descriptor) => {
                    fragment.insert(link.reference_field.clone(), descriptor);
                }
                None => self.clear_reference(id, &link.reference_field),
            }
        }
        self.store(id, fragment);
    }

    /// Drops `field` from the pending entry for `id`, if there is one.
    pub fn clear_reference(&mut self, id: &Identifier, field: &str) {
        if self.pending.remove_field(id, field).is_some() {
            tracing::trace!(%id, field, "cleared stale reference");
        }
    }

    fn substitute(&mut self, link: &LinkDeclaration, nested: Value) -> Option<Value> {
        match (link.kind, nested) {
            (_, Value::Null) => None,
            (LinkKind::Object, value) => self
                .flatten_value(link.table, value)
                .map(|child| ObjectRef::from(child).to_value()),
            (LinkKind::Array, Value::Array(items)) => {
                let ids = items
                    .into_iter()
                    .filter_map(|item| self.flatten_value(link.table, item))
                    .map(|child| child.key)
                    .collect();
                Some(ArrayRef::new(ids, link.table).to_value())
            }
            (LinkKind::Array, _) => {
                self.stats.dropped += 1;
                tracing::debug!(
                    table = %link.table,
                    field = %link.fragment_field,
                    "array link does not hold an array"
                );
                None
            }
        }
    }

    fn store(&mut self, id: &Identifier, fragment: Fragment) {
        if self.pending.merge(id, fragment) {
            self.stats.revisits += 1;
            tracing::trace!(%id, "merged revisited fragment");
        } else {
            self.stats.flattened += 1;
        }
    }
}
