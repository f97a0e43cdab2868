use crate::{
    BuildError, EntityParser, Fragment, Identifier, LinkDeclaration, ObjectRef, Record,
    TableName, PRIMARY_KEY,
};
use serde::{Deserialize, Serialize};

const SLUG: &str = "slug";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub order: Option<i64>,
    pub tile_image: Option<ObjectRef>,
}

/// Categories are embedded either with an `id` or, in older payloads, only a
/// `slug`; the slug then serves as the key.
#[derive(Debug)]
pub struct CategoryParser {
    links: Vec<LinkDeclaration>,
}

impl CategoryParser {
    pub fn new() -> Self {
        Self {
            links: vec![LinkDeclaration::object(TableName::Assets).field("tileImage")],
        }
    }

    fn key(fragment: &Fragment) -> Option<String> {
        fragment
            .key_field(PRIMARY_KEY)
            .or_else(|| fragment.key_field(SLUG))
    }
}

impl Default for CategoryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParser for CategoryParser {
    fn table(&self) -> TableName {
        TableName::Categories
    }

    fn links(&self) -> &[LinkDeclaration] {
        &self.links
    }

    fn identify(&self, fragment: &Fragment) -> Option<Identifier> {
        Self::key(fragment).map(|key| Identifier::new(key, TableName::Categories))
    }

    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError> {
        let id = Self::key(fragment).ok_or(BuildError::MissingKey {
            table: TableName::Categories,
        })?;
        Ok(Category {
            id,
            slug: fragment.str_field(SLUG),
            name: fragment.str_field("name"),
            description: fragment.str_field("description"),
            level: fragment.str_field("level"),
            order: fragment.i64_field("order"),
            tile_image: fragment.object_ref("tile_image"),
        }
        .into())
    }
}
