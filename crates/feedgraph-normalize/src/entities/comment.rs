use crate::{
    ArrayRef, BuildError, EntityParser, Fragment, LinkDeclaration, ObjectRef, Record, TableName,
    PRIMARY_KEY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub author: Option<ObjectRef>,
    pub parent_post: Option<ObjectRef>,
    pub assets: Option<ArrayRef>,
}

#[derive(Debug)]
pub struct CommentParser {
    links: Vec<LinkDeclaration>,
}

impl CommentParser {
    pub fn new() -> Self {
        Self {
            links: vec![
                LinkDeclaration::object(TableName::Users).field("author"),
                LinkDeclaration::object(TableName::Posts).field("parentPost"),
                LinkDeclaration::array(TableName::Assets),
            ],
        }
    }
}

impl Default for CommentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParser for CommentParser {
    fn table(&self) -> TableName {
        TableName::Comments
    }

    fn links(&self) -> &[LinkDeclaration] {
        &self.links
    }

    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError> {
        let id = fragment
            .key_field(PRIMARY_KEY)
            .ok_or(BuildError::MissingKey {
                table: TableName::Comments,
            })?;
        Ok(Comment {
            id,
            content: fragment.str_field("content"),
            created_at: fragment.str_field("createdAt"),
            author: fragment.object_ref("author"),
            parent_post: fragment.object_ref("parent_post"),
            assets: fragment.array_ref("assets"),
        }
        .into())
    }
}
