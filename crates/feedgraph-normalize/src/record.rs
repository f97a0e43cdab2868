//! Typed records produced by materialization.

use crate::entities::{Asset, Category, Comment, Post, User};
use crate::{Identifier, TableName};
use serde::{Deserialize, Serialize};

/// One materialized entity of any table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    #[serde(rename = "posts")]
    Post(Post),
    #[serde(rename = "users")]
    User(User),
    #[serde(rename = "assets")]
    Asset(Asset),
    #[serde(rename = "categories")]
    Category(Category),
    #[serde(rename = "comments")]
    Comment(Comment),
}

impl Record {
    pub fn identifier(&self) -> Identifier {
        Identifier::new(self.key(), self.table())
    }
}

/// A concrete record type bound to one table.
pub trait Entity: Sized + Into<Record> + TryFrom<Record, Error = Record> {
    const TABLE: TableName;

    fn key(&self) -> &str;

    fn identifier(&self) -> Identifier {
        Identifier::new(self.key(), Self::TABLE)
    }
}

macro_rules! entity_records {
    ($($variant:ident => $table:ident),* $(,)?) => {
        impl Record {
            pub fn table(&self) -> TableName {
                match self {
                    $(Record::$variant(_) => TableName::$table,)*
                }
            }

            pub fn key(&self) -> &str {
                match self {
                    $(Record::$variant(r) => &r.id,)*
                }
            }
        }

        $(
            impl From<$variant> for Record {
                fn from(record: $variant) -> Self {
                    Record::$variant(record)
                }
            }

            impl TryFrom<Record> for $variant {
                type Error = Record;

                fn try_from(record: Record) -> Result<Self, Record> {
                    match record {
                        Record::$variant(r) => Ok(r),
                        other => Err(other),
                    }
                }
            }

            impl Entity for $variant {
                const TABLE: TableName = TableName::$table;

                fn key(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

entity_records! {
    Post => Posts,
    User => Users,
    Asset => Assets,
    Category => Categories,
    Comment => Comments,
}
