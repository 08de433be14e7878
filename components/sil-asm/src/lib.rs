//! The assembler-level IR: a function is an ordered table of typed local
//! slots plus a tree of scopes holding operations in execution order.
//!
//! [`print`] renders a function to the text form used by golden tests.

mod fun;
mod opcode;
pub mod print;
mod scope;

pub use fun::{AsFun, LocalIndex, LocalSlot};
pub use opcode::{Opcode, Operand};
pub use scope::{AsScope, Op};
