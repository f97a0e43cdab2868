//! Built-in entity types and their parsers.

mod asset;
mod category;
mod comment;
mod post;
mod user;

pub use asset::{Asset, AssetParser};
pub use category::{Category, CategoryParser};
pub use comment::{Comment, CommentParser};
pub use post::{Post, PostParser, REPOSTED_POST, REPOST_OF};
pub use user::{User, UserParser};
