//! # Sil compiler backend
//!
//! This crate re-exports the backend components of the compiler:
//!
//! - [`symbols`] - the hierarchical symbol table and its traversal
//! - [`check`] - naming rules verified over the symbol table
//! - [`asm`] - the scoped assembler IR and its text dump
//! - [`package`] - header/object package metadata
//! - [`source`] - tokens and the diagnostics attached to them
//!
//! ## Typical flow
//!
//! A driver builds the [`SymbolTable`](symbols::SymbolTable), calls
//! [`verify_header`](check::verify_header), then reads the errors back
//! from the tokens (or from [`SymbolTable::diagnostics`](symbols::SymbolTable::diagnostics)).
//! Functions are generated as [`AsFun`](asm::AsFun)s, dumped with
//! [`asm::print`], and projected into a [`PackageBuilder`](package::PackageBuilder)
//! with [`project_code`].

pub use sil_asm as asm;
pub use sil_check as check;
pub use sil_package as package;
pub use sil_source as source;
pub use sil_symbols as symbols;
pub use sil_util as util;

mod project;

pub use project::{project_code, project_funs};
