//! The hierarchical symbol table: namespaces, types, methods, fields and
//! their parameters, each a node with a name, a kind and a source token.
//!
//! Nodes are stored in an arena owned by the [`SymbolTable`]; a node refers
//! to its parent by [`SymbolId`], so dropping the table drops everything.

mod symbol;
mod table;

pub use symbol::{Symbol, SymbolId, SymbolKind};
pub use table::SymbolTable;
