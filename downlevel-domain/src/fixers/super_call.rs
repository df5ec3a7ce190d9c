use downlevel_pass_api::{
    FixResult, Fixer, Transformer, walk_class_def, walk_expr, walk_function_def, walk_module,
    walk_stmt,
};
use downlevel_pass_catalog::{FixerMeta, SHORT_TO_LONG_FORM_SUPER};
use downlevel_tree::{Expr, Module, Stmt};
use downlevel_types::{BuildConfig, EffectSet};

/// `super()` inside a method becomes `super(Class, self)`.
///
/// The first parameter of the method is taken as the instance. Methods
/// without parameters are left alone.
#[derive(Debug, Default)]
pub struct ShortToLongFormSuperFixer {
    effects: EffectSet,
}

/// Fills in argument-less `super()` calls within one method.
struct SuperArgs<'a> {
    class_name: &'a str,
    instance: &'a str,
}

impl Transformer for SuperArgs<'_> {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        match stmt {
            // Nested classes were rewritten with their own name.
            class @ Stmt::ClassDef(_) => Ok(vec![class]),
            other => Ok(vec![walk_stmt(self, other)?]),
        }
    }

    fn visit_expr(&mut self, expr: Expr) -> FixResult<Expr> {
        match walk_expr(self, expr)? {
            Expr::Call {
                func,
                args,
                keywords,
            } if func.is_load_of("super") && args.is_empty() && keywords.is_empty() => {
                Ok(Expr::call(
                    *func,
                    vec![Expr::name(self.class_name), Expr::name(self.instance)],
                ))
            }
            other => Ok(other),
        }
    }
}

impl Transformer for ShortToLongFormSuperFixer {
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        let class = match stmt {
            Stmt::ClassDef(class) => class,
            other => return Ok(vec![walk_stmt(self, other)?]),
        };
        let mut class = walk_class_def(self, class)?;
        let class_name = class.name.clone();
        let mut body = Vec::with_capacity(class.body.len());
        for member in class.body {
            let member = match member {
                Stmt::FunctionDef(f) if !f.args.args.is_empty() => {
                    let instance = f.args.args[0].arg.clone();
                    let mut rewriter = SuperArgs {
                        class_name: &class_name,
                        instance: &instance,
                    };
                    Stmt::FunctionDef(walk_function_def(&mut rewriter, f)?)
                }
                Stmt::AsyncFunctionDef(f) if !f.args.args.is_empty() => {
                    let instance = f.args.args[0].arg.clone();
                    let mut rewriter = SuperArgs {
                        class_name: &class_name,
                        instance: &instance,
                    };
                    Stmt::AsyncFunctionDef(walk_function_def(&mut rewriter, f)?)
                }
                other => other,
            };
            body.push(member);
        }
        class.body = body;
        Ok(vec![Stmt::ClassDef(class)])
    }
}

impl Fixer for ShortToLongFormSuperFixer {
    fn meta(&self) -> &'static FixerMeta {
        &SHORT_TO_LONG_FORM_SUPER
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downlevel_tree::{Arg, Arguments, ClassDef, FunctionDef};
    use pretty_assertions::assert_eq;

    fn method(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
        Stmt::FunctionDef(FunctionDef {
            name: name.into(),
            args: Arguments {
                args: params.iter().map(|p| Arg::new(*p)).collect(),
                ..Arguments::default()
            },
            body,
            decorator_list: vec![],
            returns: None,
        })
    }

    fn class(name: &str, body: Vec<Stmt>) -> Stmt {
        Stmt::ClassDef(ClassDef {
            name: name.into(),
            bases: vec![Expr::name("Base")],
            keywords: vec![],
            body,
            decorator_list: vec![],
        })
    }

    fn super_init() -> Stmt {
        Stmt::expr(Expr::call(
            Expr::attr(Expr::call(Expr::name("super"), vec![]), "__init__"),
            vec![],
        ))
    }

    fn long_init(class: &str, instance: &str) -> Stmt {
        Stmt::expr(Expr::call(
            Expr::attr(
                Expr::call(
                    Expr::name("super"),
                    vec![Expr::name(class), Expr::name(instance)],
                ),
                "__init__",
            ),
            vec![],
        ))
    }

    fn run(stmt: Stmt) -> Stmt {
        let mut out = ShortToLongFormSuperFixer::default()
            .fix(&BuildConfig::default(), Module::new(vec![stmt]))
            .unwrap();
        out.body.remove(0)
    }

    #[test]
    fn fills_class_and_instance() {
        let out = run(class("A", vec![method("__init__", &["this"], vec![super_init()])]));
        assert_eq!(
            out,
            class("A", vec![method("__init__", &["this"], vec![long_init("A", "this")])])
        );
    }

    #[test]
    fn nested_class_uses_its_own_name() {
        let inner = class("Inner", vec![method("m", &["self"], vec![super_init()])]);
        let out = run(class("Outer", vec![inner]));
        let expected_inner = class("Inner", vec![method("m", &["self"], vec![long_init("Inner", "self")])]);
        assert_eq!(out, class("Outer", vec![expected_inner]));
    }

    #[test]
    fn leaves_explicit_super_and_static_methods() {
        let explicit = method("a", &["self"], vec![long_init("X", "self")]);
        let bare = method("b", &[], vec![super_init()]);
        let input = class("A", vec![explicit, bare]);
        assert_eq!(run(input.clone()), input);
    }
}
