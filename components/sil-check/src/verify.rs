//! Naming rules checked over the whole symbol table before code generation.
//!
//! Violations never stop the pass. Each one is attached to the token of the
//! offending symbol (first error wins), and the driver inspects the tokens
//! once the pass is over.

use sil_symbols::{Symbol, SymbolKind, SymbolTable};
use sil_util::{debug, debug_heading};

pub const SAME_NAME_AS_PARENT: &str = "name must not be same as parent scope";

pub const PARAM_SHADOWS_PARENT_PARAM: &str =
    "a parent scope may not contain a type parameter with the same name";

/// Check every symbol of `table` against the naming rules.
#[tracing::instrument(level = "debug", skip_all)]
pub fn verify_header(table: &SymbolTable) {
    debug_heading!("verify_header", table.len());
    table.visit_all(|_, symbol| {
        // Anonymous scopes carry no naming contract.
        if symbol.is_anonymous() {
            return;
        }
        check_not_named_like_parent(table, symbol);
        if symbol.kind().is_param() {
            check_param_not_shadowed(table, symbol);
        }
    });
}

/// A symbol may not share its name with the scope that declares it.
fn check_not_named_like_parent(table: &SymbolTable, symbol: &Symbol) {
    let Some(parent) = symbol.parent() else {
        return;
    };
    if table[parent].name() == symbol.name() {
        report(symbol, SAME_NAME_AS_PARENT);
    }
}

/// A type or method parameter may not reuse the name of a type parameter
/// declared by an enclosing generic scope. The walk starts above the
/// declaring scope and stops at the first namespace or anonymous scope.
fn check_param_not_shadowed(table: &SymbolTable, symbol: &Symbol) {
    let Some(declaring) = symbol.parent() else {
        return;
    };
    if !is_generic_scope(&table[declaring]) {
        return;
    }

    let mut cursor = table.parent(declaring);
    while let Some(ancestor) = cursor {
        if !is_generic_scope(&table[ancestor]) {
            break;
        }
        let shadowed = table
            .child(ancestor, symbol.name())
            .is_some_and(|other| table[other].kind() == SymbolKind::TypeParam);
        if shadowed {
            report(symbol, PARAM_SHADOWS_PARENT_PARAM);
        }
        cursor = table.parent(ancestor);
    }
}

/// Scopes that may contribute type parameters: named, and not a namespace.
fn is_generic_scope(symbol: &Symbol) -> bool {
    !symbol.is_anonymous() && symbol.kind() != SymbolKind::Namespace
}

fn report(symbol: &Symbol, message: &'static str) {
    if symbol.token().add_error(message) {
        debug!("naming error", symbol.name(), message);
        tracing::debug!("{}: {}", symbol.name(), message);
    }
}
