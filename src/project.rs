use sil_asm::{AsFun, AsScope, Op, print::op_text};
use sil_package::{PackageBuilder, SymCodeInfo, SymLocalInfo, SymMethodInfo};
use sil_util::{Fallible, Set, bail};

/// The package body record of `fun`.
///
/// Operation lines are the dump's lines without indentation, one entry per
/// line; nested scopes appear as `{` and `}` lines around their contents.
pub fn project_code(fun: &AsFun) -> SymCodeInfo {
    let locals = fun
        .locals()
        .iter()
        .map(|slot| SymLocalInfo {
            name: slot.name.to_string(),
            type_name: slot.ty.to_string(),
        })
        .collect();
    let mut ops = vec![];
    project_scope(fun, fun.scope(), &mut ops);
    SymCodeInfo { locals, ops }
}

fn project_scope(fun: &AsFun, scope: &AsScope, ops: &mut Vec<String>) {
    for op in scope.ops() {
        match op {
            Op::Scope(child) => {
                ops.push("{".to_string());
                project_scope(fun, child, ops);
                ops.push("}".to_string());
            }
            _ => {
                if let Some(text) = op_text(fun, op) {
                    ops.extend(text.split('\n').map(str::to_string));
                }
            }
        }
    }
}

/// Add each function with its signature to `builder`, keyed by `full_name`.
///
/// The whole batch is validated first: if any function refers to an
/// undeclared local or reuses a name, nothing is added.
#[tracing::instrument(level = "debug", skip_all)]
pub fn project_funs<'f>(
    builder: &mut PackageBuilder,
    funs: impl IntoIterator<Item = (String, SymMethodInfo, &'f AsFun)>,
) -> Fallible<()> {
    let mut names = Set::default();
    let mut projected = vec![];
    for (full_name, signature, fun) in funs {
        fun.check_locals()?;
        if builder.has_fun(&full_name) || !names.insert(full_name.clone()) {
            bail!("duplicate function `{full_name}`");
        }
        projected.push((full_name, signature, project_code(fun)));
    }

    for (full_name, signature, code) in projected {
        tracing::debug!("projecting `{full_name}`");
        builder.add_fun(full_name, signature, code)?;
    }
    Ok(())
}
