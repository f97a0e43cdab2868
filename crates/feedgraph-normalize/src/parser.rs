//! The per-entity-type parsing contract.

use crate::flatten::FlattenContext;
use crate::table::snake_case;
use crate::{BuildError, Fragment, Identifier, Record, TableName, PRIMARY_KEY};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// The field holds one nested fragment.
    Object,
    /// The field holds an array of nested fragments.
    Array,
}

/// A field of a fragment that embeds other entities.
///
/// `fragment_field` is where the nested fragment sits on the wire;
/// `reference_field` is where the reference descriptor lands after
/// substitution. When the two differ the wire field is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDeclaration {
    pub kind: LinkKind,
    pub table: TableName,
    pub fragment_field: String,
    pub reference_field: String,
}

impl LinkDeclaration {
    /// Object link named after the target's singular (`author` style
    /// overrides go through [`LinkDeclaration::field`]).
    pub fn object(table: TableName) -> Self {
        Self::with_defaults(LinkKind::Object, table, table.singular())
    }

    /// Array link named after the target's plural.
    pub fn array(table: TableName) -> Self {
        Self::with_defaults(LinkKind::Array, table, table.plural())
    }

    fn with_defaults(kind: LinkKind, table: TableName, field: &str) -> Self {
        Self {
            kind,
            table,
            fragment_field: field.to_string(),
            reference_field: snake_case(field),
        }
    }

    /// Read the nested fragment from `field`; the reference field follows as
    /// its snake_case form unless overridden afterwards.
    pub fn field(mut self, field: &str) -> Self {
        self.fragment_field = field.to_string();
        self.reference_field = snake_case(field);
        self
    }

    pub fn reference(mut self, field: &str) -> Self {
        self.reference_field = field.to_string();
        self
    }
}

/// Recognizes and builds one entity type.
///
/// Implementations are registered once per table in a
/// [`ParserRegistry`](crate::ParserRegistry) and shared across passes.
pub trait EntityParser: Send + Sync {
    fn table(&self) -> TableName;

    /// Link declarations, fixed at construction time.
    fn links(&self) -> &[LinkDeclaration];

    /// `None` means "not linkable": the fragment is dropped without error.
    fn identify(&self, fragment: &Fragment) -> Option<Identifier> {
        fragment
            .key_field(PRIMARY_KEY)
            .map(|key| Identifier::new(key, self.table()))
    }

    /// Builds the typed record from a fully flattened fragment. Never
    /// re-enters flattening.
    fn build(&self, fragment: &Fragment) -> Result<Record, BuildError>;

    /// Substitutes this type's links and stores the result. Override only
    /// for non-standard cross-linking, then fall back to
    /// [`FlattenContext::store_with_links`].
    fn flatten(&self, fragment: Fragment, id: &Identifier, ctx: &mut FlattenContext<'_>) {
        ctx.store_with_links(self.links(), fragment, id);
    }
}
