//! Outer response envelope and page continuation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

pub const NEXT: &str = "next";
pub const IS_LAST_PAGE: &str = "isLastPage";

/// Page continuation carried through from the envelope untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last_page: Option<bool>,
}

impl PageInfo {
    /// A further page can be requested.
    pub fn has_more(&self) -> bool {
        self.next.is_some() && self.is_last_page != Some(true)
    }
}

/// Which envelope key holds the root fragment(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub result_key: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            result_key: "data".to_string(),
        }
    }
}

/// A decoded response body. Anything other than a JSON object is treated as
/// an empty envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    body: Map<String, Value>,
}

impl Envelope {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(body) => Self { body },
            _ => Self::default(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self::from_value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.body.remove(key)
    }

    /// Wrong-typed `next` / `isLastPage` values read as absent.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            next: self.get(NEXT).and_then(Value::as_str).map(str::to_string),
            is_last_page: self.get(IS_LAST_PAGE).and_then(Value::as_bool),
        }
    }
}

impl FromStr for Envelope {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(Self::from_value)
    }
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
