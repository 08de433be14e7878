use sil_source::Token;

use crate::{
    fun::LocalIndex,
    opcode::{Opcode, Operand},
};

/// An ordered list of operations. Order is execution order.
#[derive(Clone, Debug, Default)]
pub struct AsScope {
    ops: Vec<Op>,
}

#[derive(Clone, Debug)]
pub enum Op {
    /// A nested scope.
    Scope(AsScope),

    /// Debug comment; an empty comment renders as a blank line.
    Comment(String),

    /// Declares the local at `index` live from here.
    Local { index: LocalIndex, token: Token },

    /// Loads a reference to the local at `index`.
    Ldlr { index: LocalIndex, token: Token },

    /// Any other operation.
    Other { opcode: Opcode, operand: Operand },
}

impl Op {
    pub fn opcode(&self) -> Opcode {
        match self {
            Op::Scope(_) => Opcode::Scope,
            Op::Comment(_) => Opcode::Comment,
            Op::Local { .. } => Opcode::Local,
            Op::Ldlr { .. } => Opcode::Ldlr,
            Op::Other { opcode, .. } => *opcode,
        }
    }

    /// The local slot this operation addresses, if any.
    pub fn local_index(&self) -> Option<LocalIndex> {
        match self {
            Op::Local { index, .. } | Op::Ldlr { index, .. } => Some(*index),
            Op::Scope(_) | Op::Comment(_) | Op::Other { .. } => None,
        }
    }
}

impl AsScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.push(Op::Comment(text.into()));
    }

    pub fn blank_line(&mut self) {
        self.comment("");
    }

    pub fn local(&mut self, index: LocalIndex, token: Token) {
        self.push(Op::Local { index, token });
    }

    pub fn ldlr(&mut self, index: LocalIndex, token: Token) {
        self.push(Op::Ldlr { index, token });
    }

    /// Append a general operation.
    pub fn op(&mut self, opcode: Opcode, operand: impl Into<Operand>) {
        assert!(
            !opcode.is_structural(),
            "`{opcode}` has its own operation variant"
        );
        self.push(Op::Other {
            opcode,
            operand: operand.into(),
        });
    }

    /// Open a nested scope at the end of this one and return it for appending.
    pub fn push_scope(&mut self) -> &mut AsScope {
        self.ops.push(Op::Scope(AsScope::new()));
        match self.ops.last_mut() {
            Some(Op::Scope(scope)) => scope,
            _ => unreachable!(),
        }
    }

    /// Visit every operation of this scope and its nested scopes in
    /// rendering order. A nested scope is visited before its contents.
    pub fn walk<'s>(&'s self, op: &mut impl FnMut(&'s Op)) {
        for o in &self.ops {
            op(o);
            if let Op::Scope(child) = o {
                child.walk(op);
            }
        }
    }
}
