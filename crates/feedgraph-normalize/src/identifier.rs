use crate::TableName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names one logical entity: a primary key scoped to its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    pub table: TableName,
    pub key: String,
}

impl Identifier {
    pub fn new(key: impl Into<String>, table: TableName) -> Self {
        Self {
            table,
            key: key.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.table, self.key)
    }
}
