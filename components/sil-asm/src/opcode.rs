use ordered_float::OrderedFloat;
use sil_util::Text;

/// Opcode tags. Only the tags are defined here; what each one computes is
/// up to the backend that consumes the IR.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    // Structure
    Scope,
    Comment,
    Local,
    Ldlr,

    // General
    Nop,
    Ldc,
    Ldstr,
    Ldarg,
    Ldlv,
    Stlv,
    Ldfld,
    Stfld,
    Dup,
    Pop,
    Call,
    Callv,
    Ret,
    Br,
    Brif,
    Brnif,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Conv,
    Newobj,
}

impl Opcode {
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Scope => "scope",
            Opcode::Comment => "comment",
            Opcode::Local => "local",
            Opcode::Ldlr => "ldlr",
            Opcode::Nop => "nop",
            Opcode::Ldc => "ldc",
            Opcode::Ldstr => "ldstr",
            Opcode::Ldarg => "ldarg",
            Opcode::Ldlv => "ldlv",
            Opcode::Stlv => "stlv",
            Opcode::Ldfld => "ldfld",
            Opcode::Stfld => "stfld",
            Opcode::Dup => "dup",
            Opcode::Pop => "pop",
            Opcode::Call => "call",
            Opcode::Callv => "callv",
            Opcode::Ret => "ret",
            Opcode::Br => "br",
            Opcode::Brif => "brif",
            Opcode::Brnif => "brnif",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Rem => "rem",
            Opcode::Neg => "neg",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Not => "not",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::Eq => "eq",
            Opcode::Ne => "ne",
            Opcode::Lt => "lt",
            Opcode::Le => "le",
            Opcode::Gt => "gt",
            Opcode::Ge => "ge",
            Opcode::Conv => "conv",
            Opcode::Newobj => "newobj",
        }
    }

    /// Opcodes with a dedicated [`Op`](crate::Op) variant.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Opcode::Scope | Opcode::Comment | Opcode::Local | Opcode::Ldlr
        )
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand of a general operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    None,
    Int(i64),
    Float(OrderedFloat<f64>),
    /// A literal string; rendered quoted and escaped.
    Str(String),
    /// A reference to a named entity (function, field, type, label).
    Symbol(Text),
}

impl Operand {
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Float(OrderedFloat(v))
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(v) => write!(f, "{v}"),
            Operand::Float(v) => write!(f, "{:?}", v.0),
            Operand::Str(s) => write!(f, "{s:?}"),
            Operand::Symbol(s) => write!(f, "{s}"),
        }
    }
}
