//! Raw, untyped entity fragments as decoded from the wire.
//!
//! Every accessor returns an `Option`: a missing field and a field of the
//! wrong JSON type are the same thing to the normalizer.

use crate::{ArrayRef, ObjectRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding an entity's primary key unless a parser says otherwise.
pub const PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(Map<String, Value>);

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` unless the value is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Field-by-field overwrite: every field present in `newer` replaces the
    /// same field here; fields absent from `newer` are left alone.
    pub fn merge_from(&mut self, newer: Fragment) {
        for (field, value) in newer.0 {
            self.0.insert(field, value);
        }
    }

    pub fn str_field(&self, field: &str) -> Option<String> {
        self.get(field)?.as_str().map(str::to_string)
    }

    pub fn bool_field(&self, field: &str) -> Option<bool> {
        self.get(field)?.as_bool()
    }

    pub fn i64_field(&self, field: &str) -> Option<i64> {
        self.get(field)?.as_i64()
    }

    pub fn u32_field(&self, field: &str) -> Option<u32> {
        self.get(field)?
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Primary-key style read: a non-empty string, or an integer rendered in
    /// decimal.
    pub fn key_field(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn object_ref(&self, field: &str) -> Option<ObjectRef> {
        serde_json::from_value(self.get(field)?.clone()).ok()
    }

    pub fn array_ref(&self, field: &str) -> Option<ArrayRef> {
        serde_json::from_value(self.get(field)?.clone()).ok()
    }
}

impl From<Map<String, Value>> for Fragment {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
