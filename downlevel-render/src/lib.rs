//! Python source output for rewritten modules.
//!
//! [`render_module`] prints a tree and places the effects its fixers
//! accumulated. Layout of the result:
//!
//! ```text
//! <header>                  shebang, coding declaration, leading comments
//! <docstring>
//! <from __future__ ...>     required, then those already in the module
//! <import ...>              required
//! <declarations>            required, one per line
//! <body>
//! ```

mod header;
mod printer;

pub use header::{DEFAULT_ENCODING, ModuleHeader, parse_module_header};
pub use printer::{quote_str, unparse_expr, unparse_stmts};

use downlevel_tree::{Constant, Expr, Module, Stmt};
use downlevel_types::{EffectSet, ImportDecl};
use std::collections::BTreeSet;
use tracing::trace;

fn is_docstring(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::Expr {
            value: Expr::Constant {
                value: Constant::Str(_)
            }
        }
    )
}

fn is_future_import(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::ImportFrom { module: Some(m), level: 0, .. } if m == "__future__")
}

/// Feature names the module already imports from `__future__`.
fn imported_features(stmts: &[Stmt]) -> BTreeSet<&str> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::ImportFrom { names, .. } => Some(names.iter().map(|a| a.name.as_str())),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Renders `module` with `effects` placed after its docstring and leading
/// `__future__` imports, prefixed by `header`.
pub fn render_module(module: &Module, effects: &EffectSet, header: &ModuleHeader) -> String {
    let body = module.body.as_slice();
    let doc_len = usize::from(body.first().is_some_and(is_docstring));
    let (docstring, rest) = body.split_at(doc_len);
    let future_len = rest.iter().take_while(|s| is_future_import(s)).count();
    let (futures, rest) = rest.split_at(future_len);

    let present = imported_features(futures);
    let (required_futures, required_imports): (Vec<&ImportDecl>, Vec<&ImportDecl>) = effects
        .required_imports
        .iter()
        .partition(|decl| decl.is_future());

    let mut out = header.text.clone();
    out.push_str(&unparse_stmts(docstring));
    for decl in required_futures {
        if decl
            .member
            .as_deref()
            .is_some_and(|feature| present.contains(feature))
        {
            continue;
        }
        out.push_str(&format!("{decl}\n"));
    }
    out.push_str(&unparse_stmts(futures));
    for decl in required_imports {
        out.push_str(&format!("{decl}\n"));
    }
    for declaration in &effects.module_declarations {
        out.push_str(declaration);
        out.push('\n');
    }
    if !rest.is_empty() && !effects.is_empty() {
        out.push('\n');
    }
    out.push_str(&unparse_stmts(rest));
    trace!(bytes = out.len(), effects = effects.len(), "rendered module");
    out
}
