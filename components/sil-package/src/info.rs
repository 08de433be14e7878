use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::decimal::SymDecimal;

/// Shape of a compiled type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymTypeInfo {
    pub name: String,
    pub alignment: u32,
    pub size: u32,

    /// Type argument names, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SymFieldInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_fields: Vec<SymFieldInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub const_fields: Vec<SymConstFieldInfo>,

    /// Methods of the type. Packages list methods under their own
    /// flat names instead, so this stays empty inside a package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<SymMethodInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymFieldInfo {
    pub name: String,
    pub type_name: String,
}

/// A constant, held both exactly and as a binary float.
///
/// Neither representation alone is lossless for every constant kind:
/// wide integers and decimal literals need `value`, binary floating
/// literals need `value_float`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymConstFieldInfo {
    pub name: String,
    pub type_name: String,
    pub value: SymDecimal,
    pub value_float: OrderedFloat<f64>,
}

impl SymConstFieldInfo {
    pub fn int(name: impl Into<String>, type_name: impl Into<String>, value: i128) -> Self {
        let value = SymDecimal::from_int(value);
        Self::new(name, type_name, value, value.to_f64())
    }

    pub fn char(name: impl Into<String>, type_name: impl Into<String>, value: char) -> Self {
        let value = SymDecimal::from_char(value);
        Self::new(name, type_name, value, value.to_f64())
    }

    /// A floating constant. The exact value is the float's integer part
    /// when it has no fractional part, and zero otherwise.
    pub fn float(name: impl Into<String>, type_name: impl Into<String>, value: f64) -> Self {
        let exact = if value.fract() == 0.0 && value.abs() < i128::MAX as f64 {
            SymDecimal::from_int(value as i128)
        } else {
            SymDecimal::default()
        };
        Self::new(name, type_name, exact, value)
    }

    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: SymDecimal,
        value_float: f64,
    ) -> Self {
        SymConstFieldInfo {
            name: name.into(),
            type_name: type_name.into(),
            value,
            value_float: OrderedFloat(value_float),
        }
    }
}

/// A function signature. Parameters and returns are positional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymMethodInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<String>,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub returns: Vec<String>,
}

/// A function body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymCodeInfo {
    pub locals: Vec<SymLocalInfo>,

    /// One entry per rendered operation line, unindented.
    pub ops: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymLocalInfo {
    pub name: String,
    pub type_name: String,
}

/// A translatable string and the context it is shown in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SilTrString {
    pub context: String,
    pub text: String,
}
