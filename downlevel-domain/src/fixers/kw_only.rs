use downlevel_pass_api::{FixResult, Fixer, FixerError, Transformer, walk_module, walk_stmt};
use downlevel_pass_catalog::{FixerMeta, INLINE_KW_ONLY_ARGS};
use downlevel_tree::{Arg, Constant, Expr, FunctionDef, Module, Stmt};
use downlevel_types::{BuildConfig, EffectSet};
use std::iter;

/// Moves keyword-only parameters into `**kwargs` lookups.
///
/// ```text
/// def f(a, *, b, c=1):        def f(a, **kwargs):
///     ...                 =>      b = kwargs['b']
///                                 c = kwargs.get('c', 1)
///                                 ...
/// ```
///
/// A default must be an immutable literal: it is evaluated on every call
/// after the rewrite, not once at definition time.
#[derive(Debug, Default)]
pub struct InlineKwOnlyArgsFixer {
    effects: EffectSet,
}

const DEFAULT_KWARG: &str = "kwargs";

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

fn inline_kw_only(mut f: FunctionDef) -> FixResult<FunctionDef> {
    if f.args.kwonlyargs.is_empty() {
        return Ok(f);
    }

    let kwarg = f
        .args
        .kwarg
        .get_or_insert_with(|| Arg::new(DEFAULT_KWARG))
        .arg
        .clone();

    let kwonly = std::mem::take(&mut f.args.kwonlyargs);
    let defaults = std::mem::take(&mut f.args.kw_defaults);
    let mut lookups = Vec::with_capacity(kwonly.len());
    for (arg, default) in kwonly.into_iter().zip(defaults.into_iter().chain(iter::repeat(None))) {
        let name = arg.arg;
        let value = match default {
            None => Expr::subscript(Expr::name(&kwarg), Expr::str(&name)),
            Some(default) if default.is_immutable_literal() => Expr::call(
                Expr::attr(Expr::name(&kwarg), "get"),
                vec![Expr::str(&name), default],
            ),
            Some(default) => {
                return Err(FixerError::unsupported(
                    format!(
                        "keyword-only argument '{name}' of '{}' needs an immutable literal default, found {}",
                        f.name,
                        default.kind()
                    ),
                    default,
                ));
            }
        };
        lookups.push(Stmt::assign(Expr::store(name), value));
    }

    let at = usize::from(f.body.first().is_some_and(is_docstring));
    f.body.splice(at..at, lookups);
    Ok(f)
}

impl Transformer for InlineKwOnlyArgsFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        let stmt = match walk_stmt(self, stmt)? {
            Stmt::FunctionDef(f) => Stmt::FunctionDef(inline_kw_only(f)?),
            Stmt::AsyncFunctionDef(f) => Stmt::AsyncFunctionDef(inline_kw_only(f)?),
            other => other,
        };
        Ok(vec![stmt])
    }
}

impl Fixer for InlineKwOnlyArgsFixer {
    fn meta(&self) -> &'static FixerMeta {
        &INLINE_KW_ONLY_ARGS
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
