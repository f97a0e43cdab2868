use crate::{BuildError, EntityParser, Fragment, LinkDeclaration, Record, TableName, PRIMARY_KEY};
use serde::{Deserialize, Serialize};

/// An uploaded media asset (avatar, cover, post image).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size: Option<i64>,
}

impl Asset {
    /// Width over height, when both dimensions are known and non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AssetParser;

impl AssetParser {
    pub fn new() -> Self {
        Self
    }
}

impl EntityParser for AssetParser {
    fn table(&self) -> TableName {
        TableName::Assets
    }

    fn links(&self) -> &[LinkDeclaration] {
        &[]
    }

    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError> {
        let id = fragment
            .key_field(PRIMARY_KEY)
            .ok_or(BuildError::MissingKey {
                table: TableName::Assets,
            })?;
        Ok(Asset {
            id,
            url: fragment.str_field("url"),
            content_type: fragment.str_field("contentType"),
            width: fragment.u32_field("width"),
            height: fragment.u32_field("height"),
            size: fragment.i64_field("size"),
        }
        .into())
    }
}
