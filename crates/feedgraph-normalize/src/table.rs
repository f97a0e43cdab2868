//! Closed set of entity tables known to the normalizer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity table. The wire name (`as_str`) is what appears in the `type` field
/// of reference descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Posts,
    Users,
    Assets,
    Categories,
    Comments,
}

impl TableName {
    pub const ALL: [TableName; 5] = [
        TableName::Posts,
        TableName::Users,
        TableName::Assets,
        TableName::Categories,
        TableName::Comments,
    ];

    pub fn as_str(self) -> &'static str {
        self.plural()
    }

    /// Canonical singular name (`post`, `category`, ...).
    pub fn singular(self) -> &'static str {
        match self {
            TableName::Posts => "post",
            TableName::Users => "user",
            TableName::Assets => "asset",
            TableName::Categories => "category",
            TableName::Comments => "comment",
        }
    }

    /// Canonical plural name, identical to the wire name.
    pub fn plural(self) -> &'static str {
        match self {
            TableName::Posts => "posts",
            TableName::Users => "users",
            TableName::Assets => "assets",
            TableName::Categories => "categories",
            TableName::Comments => "comments",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown table: {0}")]
pub struct UnknownTable(pub String);

impl FromStr for TableName {
    type Err = UnknownTable;

    /// Accepts either the plural wire name or the singular form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .into_iter()
            .find(|t| t.plural() == s || t.singular() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

/// `repostAuthor` -> `repost_author`, `tileImage` -> `tile_image`.
///
/// Already snake-cased input passes through unchanged.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}
