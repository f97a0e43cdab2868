use crate::entities::{AssetParser, CategoryParser, CommentParser, PostParser, UserParser};
use crate::{EntityParser, TableName};
use std::collections::BTreeMap;
use std::fmt;

/// Table registry: one parser per table, resolved when the registry is built.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<TableName, Box<dyn EntityParser>>,
}

impl ParserRegistry {
    /// An empty registry. Every table is "cannot identify" until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in parser for every table.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(PostParser::new());
        registry.register(UserParser::new());
        registry.register(AssetParser::new());
        registry.register(CategoryParser::new());
        registry.register(CommentParser::new());
        registry
    }

    /// Registers `parser` under its own table, returning any parser it
    /// replaced.
    pub fn register<P: EntityParser + 'static>(
        &mut self,
        parser: P,
    ) -> Option<Box<dyn EntityParser>> {
        self.register_boxed(Box::new(parser))
    }

    pub fn register_boxed(
        &mut self,
        parser: Box<dyn EntityParser>,
    ) -> Option<Box<dyn EntityParser>> {
        self.parsers.insert(parser.table(), parser)
    }

    pub fn get(&self, table: TableName) -> Option<&dyn EntityParser> {
        self.parsers.get(&table).map(Box::as_ref)
    }

    pub fn tables(&self) -> impl Iterator<Item = TableName> + '_ {
        self.parsers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("tables", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}
