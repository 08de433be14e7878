use sil_util::{Fallible, Text, bail, typedvec::TypedVec};

use crate::scope::AsScope;

sil_util::typed_index! {
    /// Position of a local slot in its function's local table.
    pub struct LocalIndex
}

/// A typed, index-addressable storage location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalSlot {
    /// Name shown in debug output.
    pub name: Text,

    /// Display name of the slot's type.
    pub ty: Text,
}

/// A compiled function: its local slots and its root scope.
#[derive(Clone, Debug)]
pub struct AsFun {
    name: Text,
    locals: TypedVec<LocalIndex, LocalSlot>,
    scope: AsScope,
}

impl AsFun {
    pub fn new(name: impl Into<Text>) -> Self {
        Self {
            name: name.into(),
            locals: TypedVec::new(),
            scope: AsScope::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local slots in declaration order.
    pub fn locals(&self) -> &TypedVec<LocalIndex, LocalSlot> {
        &self.locals
    }

    /// The slot at `index`.
    ///
    /// Panics if the index is out of range: operations must only refer to
    /// slots the code generator declared.
    pub fn local(&self, index: LocalIndex) -> &LocalSlot {
        match self.locals.get(index) {
            Some(slot) => slot,
            None => panic!(
                "local #{index} is out of range in `{}` ({} locals)",
                self.name,
                self.locals.len()
            ),
        }
    }

    /// Declare a new local slot; slots are addressed by the returned index.
    pub fn add_local(&mut self, name: impl Into<Text>, ty: impl Into<Text>) -> LocalIndex {
        self.locals.push(LocalSlot {
            name: name.into(),
            ty: ty.into(),
        })
    }

    pub fn scope(&self) -> &AsScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut AsScope {
        &mut self.scope
    }

    /// Check that every operation refers to a declared local slot.
    pub fn check_locals(&self) -> Fallible<()> {
        let mut bad = None;
        self.scope.walk(&mut |op| {
            if bad.is_none() {
                bad = op
                    .local_index()
                    .filter(|&index| !self.locals.contains_index(index))
                    .map(|index| (op.opcode(), index));
            }
        });
        if let Some((opcode, index)) = bad {
            bail!(
                "`{opcode}` in `{}` refers to local #{index}, but only {} locals are declared",
                self.name,
                self.locals.len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sil_source::Token;

    use super::*;
    use crate::{Opcode, Operand};

    #[test]
    fn locals_are_indexed_in_declaration_order() {
        let mut fun = AsFun::new("f");
        let a = fun.add_local("a", "int");
        let b = fun.add_local("b", "str");
        assert_eq!(a.as_usize(), 0);
        assert_eq!(b.as_usize(), 1);
        assert_eq!(&*fun.local(b).ty, "str");
    }

    #[test]
    fn check_locals_accepts_valid_tree() {
        let mut fun = AsFun::new("f");
        let a = fun.add_local("a", "int");
        let scope = fun.scope_mut();
        scope.local(a, Token::synthetic("a"));
        scope.push_scope().ldlr(a, Token::synthetic("a"));
        scope.op(Opcode::Ret, Operand::None);
        assert!(fun.check_locals().is_ok());
    }

    #[test]
    fn check_locals_finds_nested_bad_index() {
        let mut fun = AsFun::new("f");
        fun.add_local("a", "int");
        fun.scope_mut()
            .push_scope()
            .push_scope()
            .ldlr(LocalIndex::from(3usize), Token::synthetic("x"));
        let err = fun.check_locals().unwrap_err();
        assert!(err.to_string().contains("local #3"), "{err}");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn local_out_of_range_panics() {
        let fun = AsFun::new("f");
        fun.local(LocalIndex::from(0usize));
    }

    #[test]
    #[should_panic(expected = "has its own operation variant")]
    fn structural_opcode_is_not_general() {
        AsFun::new("f").scope_mut().op(Opcode::Local, Operand::None);
    }
}
