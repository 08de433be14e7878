use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sil_util::{Context, Fallible, IndexSet, bail, debug};

use crate::info::{SilTrString, SymCodeInfo, SymConstFieldInfo, SymMethodInfo, SymTypeInfo};

/// Which view of a package to build or check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PackageKind {
    /// Interface only: constants, types and function signatures.
    Header,

    /// Header plus function bodies and string pools.
    Object,
}

/// Persisted metadata of a compiled package.
///
/// Absent collections are `None` and are left out of the encoding
/// entirely. A header package never has `code`, `strings` or `tr_strings`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SilJsonPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<BTreeMap<String, SymConstFieldInfo>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<BTreeMap<String, SymTypeInfo>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funcs: Option<BTreeMap<String, SymMethodInfo>>,

    /// Literal pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tr_strings: Option<Vec<SilTrString>>,

    /// Function bodies, keyed like `funcs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<BTreeMap<String, SymCodeInfo>>,
}

impl SilJsonPackage {
    /// True if the package carries no implementation: no code and no string pools.
    pub fn is_header(&self) -> bool {
        is_empty(&self.code) && is_empty(&self.strings) && is_empty(&self.tr_strings)
    }

    /// Check the partition rules for a package of the given kind.
    pub fn check(&self, kind: PackageKind) -> Fallible<()> {
        match kind {
            PackageKind::Header => {
                if !self.is_header() {
                    bail!("header package contains code or string pools");
                }
            }
            PackageKind::Object => {
                let code = self.code.as_ref();
                let missing = self
                    .funcs
                    .iter()
                    .flat_map(|funcs| funcs.keys())
                    .find(|name| code.is_none_or(|code| !code.contains_key(*name)));
                if let Some(name) = missing {
                    bail!("function `{name}` has no code in the object package");
                }
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Fallible<String> {
        serde_json::to_string_pretty(self).context("encoding package")
    }

    pub fn from_json(text: &str) -> Fallible<Self> {
        serde_json::from_str(text).context("decoding package")
    }
}

trait Collection {
    fn len(&self) -> usize;
}

impl<K, V> Collection for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<T> Collection for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

fn is_empty(collection: &Option<impl Collection>) -> bool {
    collection.as_ref().is_none_or(|c| c.len() == 0)
}

fn non_empty<C: Collection + Clone>(collection: &C) -> Option<C> {
    (collection.len() > 0).then(|| collection.clone())
}

/// Collects compiled package data and builds either view of it.
#[derive(Clone, Debug, Default)]
pub struct PackageBuilder {
    constants: BTreeMap<String, SymConstFieldInfo>,
    types: BTreeMap<String, SymTypeInfo>,
    funcs: BTreeMap<String, SymMethodInfo>,
    code: BTreeMap<String, SymCodeInfo>,
    strings: IndexSet<String>,
    tr_strings: IndexSet<SilTrString>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constant(
        &mut self,
        full_name: impl Into<String>,
        info: SymConstFieldInfo,
    ) -> Fallible<()> {
        insert_unique(&mut self.constants, full_name.into(), info, "constant")
    }

    /// Add a type. Its methods are dropped from the record: each method
    /// belongs in the package as a function under its own name.
    pub fn add_type(
        &mut self,
        full_name: impl Into<String>,
        mut info: SymTypeInfo,
    ) -> Fallible<()> {
        if !info.methods.is_empty() {
            debug!("dropping nested methods", info.name, info.methods.len());
            info.methods.clear();
        }
        insert_unique(&mut self.types, full_name.into(), info, "type")
    }

    /// Add a function with its signature and body.
    pub fn add_fun(
        &mut self,
        full_name: impl Into<String>,
        signature: SymMethodInfo,
        code: SymCodeInfo,
    ) -> Fallible<()> {
        let full_name = full_name.into();
        if self.funcs.contains_key(&full_name) {
            bail!("duplicate function `{full_name}`");
        }
        self.funcs.insert(full_name.clone(), signature);
        self.code.insert(full_name, code);
        Ok(())
    }

    /// True if a function named `full_name` has been added.
    pub fn has_fun(&self, full_name: &str) -> bool {
        self.funcs.contains_key(full_name)
    }

    /// Intern `text` in the literal pool, returning its pool index.
    pub fn add_string(&mut self, text: impl Into<String>) -> usize {
        self.strings.insert_full(text.into()).0
    }

    pub fn add_tr_string(&mut self, context: impl Into<String>, text: impl Into<String>) {
        self.tr_strings.insert(SilTrString {
            context: context.into(),
            text: text.into(),
        });
    }

    pub fn build(&self, kind: PackageKind) -> SilJsonPackage {
        match kind {
            PackageKind::Header => self.build_header(),
            PackageKind::Object => self.build_object(),
        }
    }

    /// Constants, types and signatures only.
    pub fn build_header(&self) -> SilJsonPackage {
        SilJsonPackage {
            constants: non_empty(&self.constants),
            types: non_empty(&self.types),
            funcs: non_empty(&self.funcs),
            strings: None,
            tr_strings: None,
            code: None,
        }
    }

    /// Everything collected.
    pub fn build_object(&self) -> SilJsonPackage {
        SilJsonPackage {
            strings: pool(&self.strings),
            tr_strings: pool(&self.tr_strings),
            code: non_empty(&self.code),
            ..self.build_header()
        }
    }
}

fn pool<T: Clone>(set: &IndexSet<T>) -> Option<Vec<T>> {
    (!set.is_empty()).then(|| set.iter().cloned().collect())
}

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    key: String,
    value: V,
    what: &str,
) -> Fallible<()> {
    if map.contains_key(&key) {
        bail!("duplicate {what} `{key}`");
    }
    map.insert(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{SymFieldInfo, SymLocalInfo};

    fn builder() -> PackageBuilder {
        let mut b = PackageBuilder::new();
        let pi = SymConstFieldInfo::float("Pi", "f64", std::f64::consts::PI);
        b.add_constant("Math.Pi", pi).unwrap();
        b.add_type(
            "Geometry.Point",
            SymTypeInfo {
                name: "Point".into(),
                alignment: 8,
                size: 16,
                fields: vec![
                    SymFieldInfo {
                        name: "X".into(),
                        type_name: "f64".into(),
                    },
                    SymFieldInfo {
                        name: "Y".into(),
                        type_name: "f64".into(),
                    },
                ],
                methods: vec![SymMethodInfo {
                    name: "Length".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        )
        .unwrap();
        b.add_fun(
            "Geometry.Point.Length",
            SymMethodInfo {
                name: "Length".into(),
                params: vec!["Geometry.Point".into()],
                returns: vec!["f64".into()],
                ..Default::default()
            },
            SymCodeInfo {
                locals: vec![SymLocalInfo {
                    name: "p".into(),
                    type_name: "Geometry.Point".into(),
                }],
                ops: vec!["ldlr #0 p Geometry.Point".into(), "ret".into()],
            },
        )
        .unwrap();
        b.add_string("hello");
        b.add_tr_string("menu", "Open");
        b
    }

    #[test]
    fn header_has_no_implementation() {
        let header = builder().build_header();
        assert!(header.is_header());
        assert!(header.code.is_none());
        assert!(header.strings.is_none());
        assert!(header.tr_strings.is_none());
        assert_eq!(header.funcs.as_ref().unwrap().len(), 1);
        header.check(PackageKind::Header).unwrap();
    }

    #[test]
    fn object_has_everything() {
        let object = builder().build_object();
        assert!(!object.is_header());
        assert_eq!(object.strings.as_deref(), Some(&["hello".to_string()][..]));
        assert_eq!(object.tr_strings.as_ref().unwrap()[0].context, "menu");
        let funcs = object.funcs.as_ref().unwrap();
        let code = object.code.as_ref().unwrap();
        assert!(funcs.keys().all(|k| code.contains_key(k)));
        object.check(PackageKind::Object).unwrap();
    }

    #[test]
    fn object_fails_header_check() {
        let object = builder().build_object();
        assert!(object.check(PackageKind::Header).is_err());
    }

    #[test]
    fn object_check_finds_missing_code() {
        let mut object = builder().build_object();
        object.code.as_mut().unwrap().clear();
        let err = object.check(PackageKind::Object).unwrap_err();
        assert!(err.to_string().contains("Geometry.Point.Length"));
    }

    #[test]
    fn object_check_requires_code_collection() {
        let mut object = builder().build_object();
        object.code = None;
        assert!(object.check(PackageKind::Object).is_err());
    }

    #[test]
    fn extreme_constant_survives_json() {
        let mut b = PackageBuilder::new();
        let min = SymConstFieldInfo::int("Min", "i128", i128::MIN);
        b.add_constant("Limits.Min", min).unwrap();
        let json = b.build_header().to_json().unwrap();
        let decoded = SilJsonPackage::from_json(&json).unwrap();
        let min = &decoded.constants.unwrap()["Limits.Min"];
        assert_eq!(min.value.to_i128(), Some(i128::MIN));
    }

    #[test]
    fn type_methods_move_out_of_type_record() {
        let header = builder().build_header();
        let point = &header.types.as_ref().unwrap()["Geometry.Point"];
        assert!(point.methods.is_empty());
        assert_eq!(point.fields.len(), 2);
    }

    #[test]
    fn absent_collections_are_omitted_from_json() {
        let json = builder().build_header().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["Constants", "Funcs", "Types"]);

        let empty = PackageBuilder::new().build_object().to_json().unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn constant_keeps_both_values() {
        let json = builder().build_header().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let pi = &value["Constants"]["Math.Pi"];
        assert_eq!(pi["Value"], "0");
        assert_eq!(pi["ValueFloat"], std::f64::consts::PI);
    }

    #[test]
    fn json_decodes_to_same_package() {
        let object = builder().build_object();
        let json = object.to_json().unwrap();
        let decoded = SilJsonPackage::from_json(&json).unwrap();
        assert_eq!(decoded, object);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut b = builder();
        let pi = SymConstFieldInfo::int("Pi", "i32", 3);
        assert!(b.add_constant("Math.Pi", pi).is_err());

        let (signature, code) = (SymMethodInfo::default(), SymCodeInfo::default());
        assert!(b.add_fun("Geometry.Point.Length", signature, code).is_err());
    }

    #[test]
    fn strings_are_interned() {
        let mut b = PackageBuilder::new();
        assert_eq!(b.add_string("a"), 0);
        assert_eq!(b.add_string("b"), 1);
        assert_eq!(b.add_string("a"), 0);
        assert_eq!(b.build_object().strings.unwrap().len(), 2);
    }

    #[test]
    fn tr_strings_keep_first_occurrence_order() {
        let mut b = PackageBuilder::new();
        b.add_tr_string("menu", "Open");
        b.add_tr_string("menu", "Close");
        b.add_tr_string("menu", "Open");
        let texts: Vec<_> = b
            .build_object()
            .tr_strings
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(texts, vec!["Open", "Close"]);
    }
}
