use sil_source::Token;
use sil_util::{Map, Text};

sil_util::typed_index! {
    /// Index of a [`Symbol`] within its [`SymbolTable`](crate::SymbolTable).
    pub struct SymbolId
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Namespace,
    Type,
    TypeParam,
    Method,
    MethodParam,
    Field,
    Other,
}

impl SymbolKind {
    /// Type parameters and method parameters.
    pub fn is_param(self) -> bool {
        matches!(self, SymbolKind::TypeParam | SymbolKind::MethodParam)
    }
}

/// A single named entity in the symbol table.
#[derive(Debug)]
pub struct Symbol {
    pub(crate) name: Text,
    pub(crate) kind: SymbolKind,
    pub(crate) token: Token,
    pub(crate) parent: Option<SymbolId>,

    /// Children in insertion order.
    pub(crate) children: Vec<SymbolId>,

    /// Named children only; anonymous ones are unique by id.
    pub(crate) named_children: Map<Text, SymbolId>,
}

impl Symbol {
    /// Name of the symbol; empty for the root and other anonymous scopes.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<SymbolId> {
        self.parent
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.children.iter().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
