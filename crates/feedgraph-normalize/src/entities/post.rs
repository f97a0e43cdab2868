use crate::{
    ArrayRef, BuildError, EntityParser, FlattenContext, Fragment, Identifier, LinkDeclaration,
    ObjectRef, Record, TableName, PRIMARY_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire field carrying the original post inside a repost.
pub const REPOSTED_POST: &str = "repostedPost";
/// Reference field a repost gets pointing at its original.
pub const REPOST_OF: &str = "repost_of";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub token: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub views_count: Option<i64>,
    pub reposts_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub loved: Option<bool>,
    pub author: Option<ObjectRef>,
    pub repost_author: Option<ObjectRef>,
    pub category: Option<ObjectRef>,
    pub repost_of: Option<ObjectRef>,
    pub assets: Option<ArrayRef>,
    pub comments: Option<ArrayRef>,
}

impl Post {
    pub fn is_repost(&self) -> bool {
        self.repost_of.is_some()
    }
}

/// Besides its declared links, a post may embed the post it reposts. That
/// original lives in the same `posts` table and is referenced through
/// `repost_of`.
#[derive(Debug)]
pub struct PostParser {
    links: Vec<LinkDeclaration>,
}

impl PostParser {
    pub fn new() -> Self {
        Self {
            links: vec![
                LinkDeclaration::object(TableName::Users).field("author"),
                LinkDeclaration::object(TableName::Users).field("repostAuthor"),
                LinkDeclaration::object(TableName::Categories),
                LinkDeclaration::array(TableName::Assets),
                LinkDeclaration::array(TableName::Comments),
            ],
        }
    }

    fn flatten_original(
        &self,
        original: Value,
        id: &Identifier,
        ctx: &mut FlattenContext<'_>,
    ) -> Option<Identifier> {
        match original {
            Value::Null => None,
            Value::Object(map) => {
                let original = Fragment::from(map);
                // Some payloads echo the repost itself as its own original.
                if self.identify(&original).as_ref() == Some(id) {
                    tracing::debug!(%id, "ignoring self-referencing repost");
                    return None;
                }
                ctx.flatten_fragment(TableName::Posts, original)
            }
            other => ctx.flatten_value(TableName::Posts, other),
        }
    }
}

impl Default for PostParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParser for PostParser {
    fn table(&self) -> TableName {
        TableName::Posts
    }

    fn links(&self) -> &[LinkDeclaration] {
        &self.links
    }

    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError> {
        let id = fragment
            .key_field(PRIMARY_KEY)
            .ok_or(BuildError::MissingKey {
                table: TableName::Posts,
            })?;
        Ok(Post {
            id,
            token: fragment.str_field("token"),
            summary: fragment.str_field("summary"),
            content: fragment.str_field("content"),
            created_at: fragment.str_field("createdAt"),
            views_count: fragment.i64_field("viewsCount"),
            reposts_count: fragment.i64_field("repostsCount"),
            comments_count: fragment.i64_field("commentsCount"),
            loved: fragment.bool_field("loved"),
            author: fragment.object_ref("author"),
            repost_author: fragment.object_ref("repost_author"),
            category: fragment.object_ref("category"),
            repost_of: fragment.object_ref(REPOST_OF),
            assets: fragment.array_ref("assets"),
            comments: fragment.array_ref("comments"),
        }
        .into())
    }

    fn flatten(&self, mut fragment: Fragment, id: &Identifier, ctx: &mut FlattenContext<'_>) {
        if let Some(original) = fragment.remove(REPOSTED_POST) {
            match self.flatten_original(original, id, ctx) {
                Some(source) => {
                    fragment.insert(REPOST_OF, ObjectRef::from(source).to_value());
                }
                None => ctx.clear_reference(id, REPOST_OF),
            }
        }
        ctx.store_with_links(&self.links, fragment, id);
    }
}
