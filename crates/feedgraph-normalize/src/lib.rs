//! feedgraph normalization engine
//!
//! Turns paginated, deeply nested API responses into deduplicated, typed
//! entity records:
//!
//! ```text
//! envelope ──► adapter ──► flatten (recursive, per-table parsers)
//!                                │
//!                                ▼
//!                         pending store  table → key → fragment
//!                                │
//!                                ▼
//!                   materialize (roots first, then sweep)
//!                                │
//!                                ▼
//!                     RecordSink::publish(id, record)
//! ```
//!
//! Nested fragments are replaced by reference descriptors (`{id, type}` /
//! `{ids, type}`), so every record holds lookup keys rather than copies of
//! related entities. Fragments without an identifiable key are dropped; only
//! root-level shape problems surface as [`NormalizeError`].

pub mod adapter;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod flatten;
pub mod fragment;
pub mod identifier;
pub mod materialize;
pub mod parser;
pub mod pending;
pub mod record;
pub mod reference;
pub mod registry;
pub mod stats;
pub mod table;

pub use adapter::Normalizer;
pub use entities::{
    Asset, AssetParser, Category, CategoryParser, Comment, CommentParser, Post, PostParser, User,
    UserParser,
};
pub use envelope::{Envelope, NormalizeConfig, PageInfo};
pub use error::{BuildError, NormalizeError};
pub use flatten::FlattenContext;
pub use fragment::{Fragment, PRIMARY_KEY};
pub use identifier::Identifier;
pub use materialize::{materialize, RecordSink};
pub use parser::{EntityParser, LinkDeclaration, LinkKind};
pub use pending::PendingStore;
pub use record::{Entity, Record};
pub use reference::{ArrayRef, ObjectRef};
pub use registry::ParserRegistry;
pub use stats::PassStats;
pub use table::{TableName, UnknownTable};
