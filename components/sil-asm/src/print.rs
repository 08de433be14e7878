//! Text dump of functions.
//!
//! ```text
//!
//! fun Add
//!   a #0 int
//!   b #1 int
//!   {
//!     local #0 a int
//!
//!     // done
//!     ret
//!   }
//! ```
//!
//! Golden tests diff this output byte for byte. Two spaces per level;
//! a scope's braces sit at its depth and its operations one level deeper.
//! The root scope is at depth 1. Lines end with `\n`.

use std::fmt::{self, Write};

use crate::{fun::AsFun, scope::AsScope, scope::Op};

/// Render `fun` into `out`.
pub fn render_fun(fun: &AsFun, out: &mut impl Write) -> fmt::Result {
    Printer { fun, out }.write_fun()
}

/// Render each of `funs` into `out`, ordered by function name.
pub fn render_funs<'f>(
    funs: impl IntoIterator<Item = &'f AsFun>,
    out: &mut impl Write,
) -> fmt::Result {
    let mut funs: Vec<&AsFun> = funs.into_iter().collect();
    funs.sort_by(|a, b| a.name().cmp(b.name()));
    for fun in funs {
        render_fun(fun, out)?;
    }
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(fun = fun.name()))]
pub fn fun_to_string(fun: &AsFun) -> String {
    render_to_string(|text| render_fun(fun, text))
}

pub fn funs_to_string<'f>(funs: impl IntoIterator<Item = &'f AsFun>) -> String {
    render_to_string(|text| render_funs(funs, text))
}

fn render_to_string(render: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut text = String::new();
    // Writing to a `String` cannot fail.
    let _ = render(&mut text);
    text
}

/// The text of a single non-scope operation, without indentation.
///
/// Returns `None` for [`Op::Scope`], which has no line of its own, and an
/// empty string for a blank-line comment. A comment spanning several lines
/// gives one `//` line per line of text, joined by `\n`.
pub fn op_text(fun: &AsFun, op: &Op) -> Option<String> {
    let text = match op {
        Op::Scope(_) => return None,
        Op::Comment(comment) if comment.is_empty() => String::new(),
        Op::Comment(comment) => comment
            .split('\n')
            .map(|line| match line {
                "" => "//".to_string(),
                _ => format!("// {line}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Op::Local { index, token } | Op::Ldlr { index, token } => {
            let slot = fun.local(*index);
            format!("{} #{index} {token} {}", op.opcode(), slot.ty)
        }
        Op::Other { opcode, operand } if operand.is_none() => opcode.to_string(),
        Op::Other { opcode, operand } => format!("{opcode} {operand}"),
    };
    Some(text)
}

struct Printer<'f, W: Write> {
    fun: &'f AsFun,
    out: &'f mut W,
}

impl<W: Write> Printer<'_, W> {
    fn write_fun(&mut self) -> fmt::Result {
        writeln!(self.out)?;
        writeln!(self.out, "fun {}", self.fun.name())?;
        for (index, slot) in self.fun.locals().iter_enumerated() {
            self.indent_line(1, format_args!("{} #{index} {}", slot.name, slot.ty))?;
        }
        self.write_scope(self.fun.scope(), 1)
    }

    fn write_scope(&mut self, scope: &AsScope, depth: usize) -> fmt::Result {
        self.indent_line(depth, format_args!("{{"))?;
        for op in scope.ops() {
            match op {
                Op::Scope(child) => self.write_scope(child, depth + 1)?,
                Op::Comment(comment) if comment.is_empty() => writeln!(self.out)?,
                _ => {
                    let text = op_text(self.fun, op).unwrap_or_default();
                    for line in text.split('\n') {
                        self.indent_line(depth + 1, format_args!("{line}"))?;
                    }
                }
            }
        }
        self.indent_line(depth, format_args!("}}"))
    }

    fn indent_line(&mut self, depth: usize, line: fmt::Arguments<'_>) -> fmt::Result {
        writeln!(self.out, "{:width$}{line}", "", width = depth * 2)
    }
}

#[cfg(test)]
mod tests {
    use sil_source::Token;

    use super::*;
    use crate::{LocalIndex, Opcode, Operand};

    fn add_fun() -> AsFun {
        let mut fun = AsFun::new("Add");
        let a = fun.add_local("a", "int");
        fun.add_local("b", "int");
        let scope = fun.scope_mut();
        scope.local(a, Token::synthetic("a"));
        scope.blank_line();
        fun
    }

    #[test]
    fn renders_add_example() {
        assert_eq!(
            fun_to_string(&add_fun()),
            "\nfun Add\n  a #0 int\n  b #1 int\n  {\n    local #0 a int\n\n  }\n"
        );
    }

    #[test]
    fn nested_scopes_indent_two_per_level() {
        let mut fun = AsFun::new("Loop");
        let i = fun.add_local("i", "i32");
        let scope = fun.scope_mut();
        scope.comment("outer");
        let inner = scope.push_scope();
        inner.ldlr(i, Token::synthetic("i"));
        inner
            .push_scope()
            .op(Opcode::Br, Operand::Symbol("top".into()));
        scope.op(Opcode::Ret, Operand::None);

        let expected = "
fun Loop
  i #0 i32
  {
    // outer
    {
      ldlr #0 i i32
      {
        br top
      }
    }
    ret
  }
";
        assert_eq!(fun_to_string(&fun), expected);
    }

    #[test]
    fn general_operands_render() {
        let mut fun = AsFun::new("Ops");
        let scope = fun.scope_mut();
        scope.op(Opcode::Ldc, 42i64);
        scope.op(Opcode::Ldc, 2.5f64);
        scope.op(Opcode::Ldstr, Operand::Str("say \"hi\"".to_string()));
        scope.op(Opcode::Call, Operand::Symbol("Console.Log".into()));
        scope.op(Opcode::Nop, Operand::None);
        let text = fun_to_string(&fun);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[3..8],
            [
                "    ldc 42",
                "    ldc 2.5",
                "    ldstr \"say \\\"hi\\\"\"",
                "    call Console.Log",
                "    nop",
            ]
        );
    }

    #[test]
    fn multi_line_comment_keeps_indentation() {
        let mut fun = AsFun::new("f");
        fun.scope_mut().push_scope().comment("first\n\nthird");
        let expected = "
fun f
  {
    {
      // first
      //
      // third
    }
  }
";
        assert_eq!(fun_to_string(&fun), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let fun = add_fun();
        assert_eq!(fun_to_string(&fun), fun_to_string(&fun));
    }

    #[test]
    fn functions_ordered_by_name() {
        let b = AsFun::new("b");
        let a = AsFun::new("a");
        let text = funs_to_string([&b, &a]);
        assert_eq!(text, "\nfun a\n  {\n  }\n\nfun b\n  {\n  }\n");
    }

    #[test]
    fn op_text_cross_references_local_type() {
        let mut fun = AsFun::new("f");
        fun.add_local("x", "bool");
        let y = fun.add_local("y", "str");
        let op = Op::Ldlr {
            index: y,
            token: Token::synthetic("y"),
        };
        assert_eq!(op_text(&fun, &op).as_deref(), Some("ldlr #1 y str"));
        assert_eq!(op_text(&fun, &Op::Scope(AsScope::new())), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn bad_local_index_fails_loudly() {
        let mut fun = AsFun::new("f");
        fun.scope_mut()
            .ldlr(LocalIndex::from(0usize), Token::synthetic("ghost"));
        fun_to_string(&fun);
    }
}
