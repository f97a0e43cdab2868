use crate::{
    BuildError, EntityParser, Fragment, LinkDeclaration, ObjectRef, Record, TableName, PRIMARY_KEY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub followers_count: Option<i64>,
    pub following_count: Option<i64>,
    pub posts_count: Option<i64>,
    pub avatar: Option<ObjectRef>,
    pub cover_image: Option<ObjectRef>,
}

impl User {
    /// `name`, falling back to `@username`.
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.username.as_ref().map(|u| format!("@{u}")))
    }
}

#[derive(Debug)]
pub struct UserParser {
    links: Vec<LinkDeclaration>,
}

impl UserParser {
    pub fn new() -> Self {
        Self {
            links: vec![
                LinkDeclaration::object(TableName::Assets).field("avatar"),
                LinkDeclaration::object(TableName::Assets).field("coverImage"),
            ],
        }
    }
}

impl Default for UserParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParser for UserParser {
    fn table(&self) -> TableName {
        TableName::Users
    }

    fn links(&self) -> &[LinkDeclaration] {
        &self.links
    }

    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError> {
        let id = fragment
            .key_field(PRIMARY_KEY)
            .ok_or(BuildError::MissingKey {
                table: TableName::Users,
            })?;
        Ok(User {
            id,
            username: fragment.str_field("username"),
            name: fragment.str_field("name"),
            bio: fragment.str_field("bio"),
            location: fragment.str_field("location"),
            followers_count: fragment.i64_field("followersCount"),
            following_count: fragment.i64_field("followingCount"),
            posts_count: fragment.i64_field("postsCount"),
            avatar: fragment.object_ref("avatar"),
            cover_image: fragment.object_ref("cover_image"),
        }
        .into())
    }
}
