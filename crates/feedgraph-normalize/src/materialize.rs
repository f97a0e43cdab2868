//! Two-phase materialization: roots first, then a sweep of everything else
//! left in the pending store.

use crate::{BuildError, Fragment, Identifier, ParserRegistry, PassStats, PendingStore, Record};
use std::collections::HashMap;
use std::sync::Arc;

/// Write-only boundary to the long-lived record cache.
///
/// Implementations shared between concurrent passes own their locking.
pub trait RecordSink {
    fn publish(&self, id: Identifier, record: Record);
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn publish(&self, id: Identifier, record: Record) {
        (**self).publish(id, record)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Arc<S> {
    fn publish(&self, id: Identifier, record: Record) {
        (**self).publish(id, record)
    }
}

/// Drains `pending`, publishing every record to `sink` exactly once.
///
/// The returned vector lines up with `roots`: `None` where a root's build
/// failed. A root listed more than once is built once and cloned.
pub fn materialize(
    registry: &ParserRegistry,
    mut pending: PendingStore,
    roots: &[Identifier],
    sink: &dyn RecordSink,
    stats: &mut PassStats,
) -> Vec<Option<Record>> {
    let mut out: Vec<Option<Record>> = Vec::with_capacity(roots.len());
    let mut first_seen: HashMap<&Identifier, usize> = HashMap::new();

    for root in roots {
        let record = match pending.take(root) {
            Some(fragment) => {
                let record = build_entry(registry, root, &fragment, stats);
                if let Some(record) = &record {
                    sink.publish(root.clone(), record.clone());
                }
                first_seen.insert(root, out.len());
                record
            }
            None => first_seen.get(root).and_then(|&i| out[i].clone()),
        };
        out.push(record);
    }

    while let Some((id, fragment)) = pending.pop_next() {
        if let Some(record) = build_entry(registry, &id, &fragment, stats) {
            sink.publish(id, record);
        }
    }

    tracing::debug!(
        roots = roots.len(),
        materialized = stats.materialized_total(),
        skipped = stats.skipped,
        "materialization sweep complete"
    );
    out
}

fn build_entry(
    registry: &ParserRegistry,
    id: &Identifier,
    fragment: &Fragment,
    stats: &mut PassStats,
) -> Option<Record> {
    let Some(parser) = registry.get(id.table) else {
        stats.skipped += 1;
        tracing::warn!(%id, "no parser registered; skipping pending entry");
        return None;
    };

    let built = parser.build(fragment).and_then(|record| {
        if record.table() == id.table {
            Ok(record)
        } else {
            Err(BuildError::TableMismatch {
                expected: id.table,
                found: record.table(),
            })
        }
    });

    match built {
        Ok(record) => {
            *stats.materialized.entry(id.table).or_default() += 1;
            Some(record)
        }
        Err(err) => {
            stats.skipped += 1;
            tracing::warn!(%id, error = %err, "skipping pending entry");
            None
        }
    }
}
