use downlevel_pass_api::{
    FixResult, Fixer, FixerError, Transformer, walk_arg, walk_module, walk_stmt,
};
use downlevel_pass_catalog::{FixerMeta, REMOVE_ANN_ASSIGN, REMOVE_FUNCTION_DEF_ANNOTATIONS};
use downlevel_tree::{Arg, Expr, Module, Stmt};
use downlevel_types::{BuildConfig, EffectSet};

/// Drops parameter and return annotations.
#[derive(Debug, Default)]
pub struct RemoveFunctionDefAnnotationsFixer {
    effects: EffectSet,
}

impl Transformer for RemoveFunctionDefAnnotationsFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        let stmt = match walk_stmt(self, stmt)? {
            Stmt::FunctionDef(mut f) => {
                f.returns = None;
                Stmt::FunctionDef(f)
            }
            Stmt::AsyncFunctionDef(mut f) => {
                f.returns = None;
                Stmt::AsyncFunctionDef(f)
            }
            other => other,
        };
        Ok(vec![stmt])
    }

    fn visit_arg(&mut self, arg: Arg) -> FixResult<Arg> {
        let mut arg = walk_arg(self, arg)?;
        arg.annotation = None;
        Ok(arg)
    }
}

impl Fixer for RemoveFunctionDefAnnotationsFixer {
    fn meta(&self) -> &'static FixerMeta {
        &REMOVE_FUNCTION_DEF_ANNOTATIONS
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}

/// `x: T = v` becomes `x = v`; a bare `x: T` becomes `x = None`.
#[derive(Debug, Default)]
pub struct RemoveAnnAssignFixer {
    effects: EffectSet,
}

impl Transformer for RemoveAnnAssignFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        match walk_stmt(self, stmt)? {
            Stmt::AnnAssign { target, value, .. } => {
                if !matches!(target, Expr::Name { .. } | Expr::Attribute { .. }) {
                    return Err(FixerError::unsupported(
                        format!(
                            "annotated assignment to a {} target cannot be rewritten",
                            target.kind()
                        ),
                        target,
                    ));
                }
                Ok(vec![Stmt::Assign {
                    targets: vec![target],
                    value: value.unwrap_or_else(Expr::none),
                }])
            }
            other => Ok(vec![other]),
        }
    }
}

impl Fixer for RemoveAnnAssignFixer {
    fn meta(&self) -> &'static FixerMeta {
        &REMOVE_ANN_ASSIGN
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
