use downlevel_pass_api::{
    FixResult, Fixer, FixerError, Transformer, walk_class_def, walk_module, walk_stmt,
};
use downlevel_pass_catalog::{FixerMeta, NAMED_TUPLE_CLASS_TO_ASSIGN, NEW_STYLE_CLASSES};
use downlevel_tree::{ClassDef, Constant, Expr, Module, Stmt};
use downlevel_types::{BuildConfig, EffectSet};

/// `class A:` becomes `class A(object):`.
#[derive(Debug, Default)]
pub struct NewStyleClassesFixer {
    effects: EffectSet,
}

impl Transformer for NewStyleClassesFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        let stmt = match walk_stmt(self, stmt)? {
            Stmt::ClassDef(mut class) => {
                if class.bases.is_empty() {
                    class.bases.push(Expr::name("object"));
                }
                Stmt::ClassDef(class)
            }
            other => other,
        };
        Ok(vec![stmt])
    }
}

impl Fixer for NewStyleClassesFixer {
    fn meta(&self) -> &'static FixerMeta {
        &NEW_STYLE_CLASSES
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}

/// `class P(NamedTuple): x: int` becomes `P = NamedTuple('P', [('x', int)])`.
///
/// Only classes whose base is `NamedTuple` as imported in this module are
/// rewritten: `from typing import NamedTuple [as N]` or `import typing [as t]`.
#[derive(Debug, Default)]
pub struct NamedTupleClassToAssignFixer {
    typing_module: Option<String>,
    named_tuple: Option<String>,
    effects: EffectSet,
}

impl NamedTupleClassToAssignFixer {
    fn is_named_tuple_base(&self, base: &Expr) -> bool {
        match base {
            Expr::Name { id, .. } => self.named_tuple.as_deref() == Some(id.as_str()),
            Expr::Attribute { value, attr, .. } => {
                attr == "NamedTuple"
                    && self
                        .typing_module
                        .as_deref()
                        .is_some_and(|m| value.is_load_of(m))
            }
            _ => false,
        }
    }

    fn callee(&self) -> Expr {
        match (&self.typing_module, &self.named_tuple) {
            (Some(module), _) => Expr::attr(Expr::name(module), "NamedTuple"),
            (None, Some(name)) => Expr::name(name),
            (None, None) => Expr::name("NamedTuple"),
        }
    }

    fn to_assign(&self, class: ClassDef) -> FixResult<Stmt> {
        let mut fields = Vec::new();
        for member in class.body {
            match member {
                Stmt::AnnAssign {
                    target: Expr::Name { id, .. },
                    annotation,
                    value: None,
                    ..
                } => fields.push(Expr::tuple(vec![Expr::str(id), annotation])),
                Stmt::Pass => {}
                Stmt::Expr {
                    value: Expr::Constant {
                        value: Constant::Str(_),
                    },
                } => {}
                other => {
                    return Err(FixerError::unsupported(
                        format!(
                            "NamedTuple class '{}' may only declare fields without defaults, found {}",
                            class.name,
                            other.kind()
                        ),
                        other,
                    ));
                }
            }
        }
        Ok(Stmt::assign(
            Expr::store(&class.name),
            Expr::call(
                self.callee(),
                vec![Expr::str(&class.name), Expr::list(fields)],
            ),
        ))
    }
}

impl Transformer for NamedTupleClassToAssignFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        match stmt {
            Stmt::Import { ref names } => {
                for alias in names.iter().filter(|a| a.name == "typing") {
                    self.typing_module = Some(alias.bound_name().to_string());
                }
                Ok(vec![stmt])
            }
            Stmt::ImportFrom {
                module: Some(ref module),
                ref names,
                ..
            } if module == "typing" => {
                for alias in names.iter().filter(|a| a.name == "NamedTuple") {
                    self.named_tuple = Some(alias.bound_name().to_string());
                }
                Ok(vec![stmt])
            }
            Stmt::ClassDef(class) => {
                let class = walk_class_def(self, class)?;
                if class.bases.iter().any(|b| self.is_named_tuple_base(b)) {
                    Ok(vec![self.to_assign(class)?])
                } else {
                    Ok(vec![Stmt::ClassDef(class)])
                }
            }
            other => Ok(vec![walk_stmt(self, other)?]),
        }
    }
}

impl Fixer for NamedTupleClassToAssignFixer {
    fn meta(&self) -> &'static FixerMeta {
        &NAMED_TUPLE_CLASS_TO_ASSIGN
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
