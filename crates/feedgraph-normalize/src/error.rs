use crate::TableName;

/// Root-level shape failures returned by the response adapters.
///
/// Anything below the root degrades by omission and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("root fragment for table `{table}` has no usable identifier")]
    NotIdentifiable { table: TableName },

    #[error("root did not materialize as `{expected}`")]
    WrongType { expected: TableName },

    #[error("envelope key `{key}` does not hold an array")]
    NotAnArray { key: String },
}

/// Failure to turn one flattened fragment into a typed record. Only ever
/// logged; the materialization sweep skips the entry and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("parser for `{expected}` built a `{found}` record")]
    TableMismatch {
        expected: TableName,
        found: TableName,
    },

    #[error("fragment for `{table}` has no primary key")]
    MissingKey { table: TableName },
}
