//! Source locations and the diagnostics attached to them.
//!
//! The central type is [`Token`](token::Token): a handle on a piece of
//! source text that can carry at most one error. Passes attach errors to
//! tokens; the driver reads them back once the pass is over.

pub mod diagnostic;
pub mod span;
pub mod token;

pub use diagnostic::{Diagnostic, Level, RenderOptions};
pub use span::{AbsoluteSpan, Offset, SourceFile, Span};
pub use token::Token;
