//! Compiled-package metadata, split into a header view (what a consumer
//! needs to compile against the package) and an object view (header plus
//! function bodies and string pools).
//!
//! Every map is keyed by a flat, fully qualified name. Only fields nest
//! inside a type record; constants, functions and types all live at the
//! top level of the package.

mod decimal;
mod info;
mod package;

pub use decimal::SymDecimal;
pub use info::{
    SilTrString, SymCodeInfo, SymConstFieldInfo, SymFieldInfo, SymLocalInfo, SymMethodInfo,
    SymTypeInfo,
};
pub use package::{PackageBuilder, PackageKind, SilJsonPackage};
