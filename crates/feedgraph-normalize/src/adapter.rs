//! Response adapters: the "one" and "many" entry points.

use crate::{
    materialize, Entity, Envelope, FlattenContext, Identifier, NormalizeConfig, NormalizeError,
    PageInfo, ParserRegistry, PassStats, Record, RecordSink, TableName,
};
use serde_json::Value;

/// Runs flatten + materialize passes over response envelopes.
///
/// A `Normalizer` holds no per-pass state; every call allocates a fresh
/// pending store, so one instance can serve concurrent responses.
#[derive(Debug)]
pub struct Normalizer {
    registry: ParserRegistry,
    config: NormalizeConfig,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::standard()
    }
}

impl Normalizer {
    pub fn new(registry: ParserRegistry, config: NormalizeConfig) -> Self {
        Self { registry, config }
    }

    /// Built-in parsers, default config.
    pub fn standard() -> Self {
        Self::new(ParserRegistry::standard(), NormalizeConfig::default())
    }

    pub fn with_config(config: NormalizeConfig) -> Self {
        Self::new(ParserRegistry::standard(), config)
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Single-result adapter.
    pub fn parse_one<T: Entity>(
        &self,
        envelope: Envelope,
        sink: &dyn RecordSink,
    ) -> Result<(PageInfo, T), NormalizeError> {
        let (page, record, _) = self.normalize_one(T::TABLE, envelope, sink)?;
        Ok((page, typed_record(record)?))
    }

    /// Many-result adapter. Unidentifiable elements are skipped; the rest keep
    /// their array order.
    pub fn parse_many<T: Entity>(
        &self,
        envelope: Envelope,
        sink: &dyn RecordSink,
    ) -> Result<(PageInfo, Vec<T>), NormalizeError> {
        let (page, records, _) = self.normalize_many(T::TABLE, envelope, sink)?;
        let typed = records
            .into_iter()
            .map(typed_record::<T>)
            .collect::<Result<Vec<T>, _>>()?;
        Ok((page, typed))
    }

    /// Untyped single-result pass for callers choosing the table at runtime.
    pub fn normalize_one(
        &self,
        table: TableName,
        mut envelope: Envelope,
        sink: &dyn RecordSink,
    ) -> Result<(PageInfo, Record, PassStats), NormalizeError> {
        let page = envelope.page_info();
        let root = envelope
            .take(&self.config.result_key)
            .ok_or(NormalizeError::NotIdentifiable { table })?;

        let mut ctx = FlattenContext::new(&self.registry);
        let id = ctx
            .flatten_value(table, root)
            .ok_or(NormalizeError::NotIdentifiable { table })?;
        let (pending, mut stats) = ctx.into_parts();

        let record = materialize(
            &self.registry,
            pending,
            std::slice::from_ref(&id),
            sink,
            &mut stats,
        )
        .pop()
        .flatten()
        .ok_or(NormalizeError::WrongType { expected: table })?;

        log_pass(table, 1, &stats);
        Ok((page, record, stats))
    }

    /// Untyped many-result pass. All elements share one pending store, so an
    /// entity embedded by several roots is materialized once.
    pub fn normalize_many(
        &self,
        table: TableName,
        mut envelope: Envelope,
        sink: &dyn RecordSink,
    ) -> Result<(PageInfo, Vec<Record>, PassStats), NormalizeError> {
        let page = envelope.page_info();
        let key = &self.config.result_key;
        let Some(Value::Array(items)) = envelope.take(key) else {
            return Err(NormalizeError::NotAnArray { key: key.clone() });
        };

        let mut ctx = FlattenContext::new(&self.registry);
        let roots: Vec<Identifier> = items
            .into_iter()
            .filter_map(|item| ctx.flatten_value(table, item))
            .collect();
        let (pending, mut stats) = ctx.into_parts();

        let records: Vec<Record> = materialize(&self.registry, pending, &roots, sink, &mut stats)
            .into_iter()
            .flatten()
            .collect();

        log_pass(table, records.len(), &stats);
        Ok((page, records, stats))
    }
}

/// Materialization already rejects records built for the wrong table, so the
/// error arm is not expected to be hit.
fn typed_record<T: Entity>(record: Record) -> Result<T, NormalizeError> {
    T::try_from(record).map_err(|_| NormalizeError::WrongType { expected: T::TABLE })
}

fn log_pass(table: TableName, roots: usize, stats: &PassStats) {
    tracing::debug!(
        %table,
        roots,
        flattened = stats.flattened,
        revisits = stats.revisits,
        dropped = stats.dropped,
        skipped = stats.skipped,
        "normalized response"
    );
}
