//! Reference descriptors.
//!
//! After flattening, a link field no longer holds the nested fragment. It
//! holds `{ "id": .., "type": .. }` for an object link or
//! `{ "ids": [..], "type": .. }` for an array link. Typed records keep these
//! descriptors and resolve them against the record cache on demand.

use crate::{Identifier, TableName};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reference to a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
    #[serde(rename = "type")]
    pub table: TableName,
}

impl ObjectRef {
    pub fn new(id: impl Into<String>, table: TableName) -> Self {
        Self {
            id: id.into(),
            table,
        }
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::new(self.id.clone(), self.table)
    }

    pub fn to_value(&self) -> Value {
        json!({ "id": self.id, "type": self.table.as_str() })
    }
}

impl From<Identifier> for ObjectRef {
    fn from(id: Identifier) -> Self {
        Self {
            id: id.key,
            table: id.table,
        }
    }
}

/// Ordered references to entities of one table. Duplicate ids are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayRef {
    pub ids: Vec<String>,
    #[serde(rename = "type")]
    pub table: TableName,
}

impl ArrayRef {
    pub fn new(ids: Vec<String>, table: TableName) -> Self {
        Self { ids, table }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.ids.iter().map(|id| Identifier::new(id.clone(), self.table))
    }

    pub fn to_value(&self) -> Value {
        json!({ "ids": self.ids, "type": self.table.as_str() })
    }
}
