//! `normalize` and `tables` commands.

use anyhow::{Context, Result};
use feedgraph_cache::{CacheSnapshot, RecordCache};
use feedgraph_normalize::{
    Envelope, LinkDeclaration, NormalizeConfig, Normalizer, PageInfo, PassStats, Record,
    TableName,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::Shape;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub table: TableName,
    pub shape: Shape,
    pub config: Option<PathBuf>,
    pub result_key: Option<String>,
    pub dump_cache: bool,
}

#[derive(Debug, Serialize)]
pub struct NormalizeReport {
    pub page: PageInfo,
    pub result: Vec<Record>,
    pub stats: PassStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: TableName,
    pub singular: &'static str,
    pub links: Vec<LinkDeclaration>,
}

pub fn load_config(options: &NormalizeOptions) -> Result<NormalizeConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => NormalizeConfig::default(),
    };
    if let Some(key) = &options.result_key {
        config.result_key = key.clone();
    }
    Ok(config)
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read(input).with_context(|| format!("reading {}", input.display()))
}

pub fn cmd_normalize(input: &Path, options: &NormalizeOptions) -> Result<NormalizeReport> {
    let config = load_config(options)?;
    let bytes = read_input(input)?;
    let envelope = Envelope::from_slice(&bytes)
        .with_context(|| format!("decoding envelope {}", input.display()))?;

    let normalizer = Normalizer::with_config(config);
    let cache = RecordCache::new();

    let (page, result, stats) = match options.shape {
        Shape::One => {
            let (page, record, stats) = normalizer.normalize_one(options.table, envelope, &cache)?;
            (page, vec![record], stats)
        }
        Shape::Many => normalizer.normalize_many(options.table, envelope, &cache)?,
    };

    tracing::info!(
        table = %options.table,
        roots = result.len(),
        cached = cache.len(),
        dropped = stats.dropped,
        "normalized {}",
        input.display()
    );

    Ok(NormalizeReport {
        page,
        result,
        stats,
        cache: options.dump_cache.then(|| cache.snapshot()),
    })
}

pub fn cmd_tables() -> Vec<TableReport> {
    let normalizer = Normalizer::standard();
    normalizer
        .registry()
        .tables()
        .filter_map(|table| {
            let parser = normalizer.registry().get(table)?;
            Some(TableReport {
                table,
                singular: table.singular(),
                links: parser.links().to_vec(),
            })
        })
        .collect()
}

pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
