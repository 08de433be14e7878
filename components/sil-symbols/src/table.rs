use sil_source::{Diagnostic, Token};
use sil_util::{Fallible, Map, Text, bail, typedvec::TypedVec};

use crate::symbol::{Symbol, SymbolId, SymbolKind};

/// Owns every [`Symbol`] of a compilation unit.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: TypedVec<SymbolId, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table holding only the root: an anonymous namespace.
    pub fn new() -> Self {
        let mut symbols = TypedVec::new();
        symbols.push(Symbol {
            name: Text::from(""),
            kind: SymbolKind::Namespace,
            token: Token::synthetic(""),
            parent: None,
            children: vec![],
            named_children: Map::default(),
        });
        Self { symbols }
    }

    pub fn root(&self) -> SymbolId {
        SymbolId::from(0usize)
    }

    /// Number of symbols, root included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    /// Add a symbol named `name` under `parent`.
    ///
    /// Fails if `parent` already has a child with that name. Any number of
    /// anonymous (empty-named) children may share a parent.
    pub fn add_child(
        &mut self,
        parent: SymbolId,
        name: impl Into<Text>,
        kind: SymbolKind,
        token: Token,
    ) -> Fallible<SymbolId> {
        let name = name.into();
        let Some(parent_symbol) = self.symbols.get(parent) else {
            bail!("no symbol with id {parent}");
        };
        if !name.is_empty() && parent_symbol.named_children.contains_key(&name) {
            bail!(
                "`{}` already contains a symbol named `{name}`",
                self.full_name(parent)
            );
        }

        let id = self.symbols.push(Symbol {
            name: name.clone(),
            kind,
            token,
            parent: Some(parent),
            children: vec![],
            named_children: Map::default(),
        });
        let parent_symbol = &mut self.symbols[parent];
        parent_symbol.children.push(id);
        if !name.is_empty() {
            parent_symbol.named_children.insert(name, id);
        }
        Ok(id)
    }

    /// The child of `id` named `name`, if any.
    pub fn child(&self, id: SymbolId, name: &str) -> Option<SymbolId> {
        self.symbols[id]
            .named_children
            .get(&Text::from(name))
            .copied()
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        self.symbols[id].parent
    }

    /// Iterator that starts from the parent of `id` and walks up to the root.
    pub fn ancestors(&self, id: SymbolId) -> impl Iterator<Item = SymbolId> + '_ {
        let mut cursor = self.parent(id);
        std::iter::from_fn(move || {
            let p = cursor?;
            cursor = self.parent(p);
            Some(p)
        })
    }

    /// Dot-separated path of the non-empty names from the root down to `id`.
    pub fn full_name(&self, id: SymbolId) -> String {
        let mut names: Vec<&str> = std::iter::once(id)
            .chain(self.ancestors(id))
            .map(|s| self.symbols[s].name())
            .filter(|n| !n.is_empty())
            .collect();
        names.reverse();
        names.join(".")
    }

    /// Invoke `action` on every symbol reachable from the root, root included.
    ///
    /// The order is a depth-first pre-order: a symbol is visited before its
    /// children, and children are visited in insertion order. The order only
    /// depends on the tree, so repeated calls over an unchanged table visit
    /// the same sequence.
    pub fn visit_all(&self, mut action: impl FnMut(SymbolId, &Symbol)) {
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let symbol = &self.symbols[id];
            action(id, symbol);
            stack.extend(symbol.children.iter().rev().copied());
        }
    }

    /// The errors attached to the tokens of all symbols, in traversal order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];
        self.visit_all(|_, symbol| {
            if let Some(error) = symbol.token.error() {
                diagnostics.push(error.clone());
            }
        });
        diagnostics
    }
}

impl std::ops::Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        self.symbol(id)
    }
}
