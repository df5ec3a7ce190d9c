//! Functional-update tree rewriting.
//!
//! A fixer implements [`Transformer`] and overrides only the hooks it needs.
//! Every hook consumes a subtree and returns its replacement; the `walk_*`
//! functions rebuild a node from its rewritten children and are what the
//! default hooks call, so an override can rewrite its children first by
//! calling the matching `walk_*` itself.
//!
//! `Constant` and `Name` are leaves: [`walk_expr`] returns them as-is.
//! Operators and contexts are plain values, never visited.

use crate::error::{FixResult, FixerError};
use downlevel_tree::{
    Arg, Arguments, ClassDef, Comprehension, DictItem, ExceptHandler, Expr, For, FunctionDef,
    Keyword, Module, Stmt, Try, With, WithItem,
};

pub trait Transformer {
    /// Rewrites one statement into one or more statements.
    ///
    /// Returning an empty vector is a contract violation.
    fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
        Ok(vec![walk_stmt(self, stmt)?])
    }

    fn visit_expr(&mut self, expr: Expr) -> FixResult<Expr> {
        walk_expr(self, expr)
    }

    fn visit_arguments(&mut self, args: Arguments) -> FixResult<Arguments> {
        walk_arguments(self, args)
    }

    fn visit_arg(&mut self, arg: Arg) -> FixResult<Arg> {
        walk_arg(self, arg)
    }
}

pub fn walk_module<T: Transformer + ?Sized>(t: &mut T, module: Module) -> FixResult<Module> {
    Ok(Module {
        body: walk_body(t, module.body)?,
    })
}

/// Rewrites a statement list, splicing multi-statement replacements in place.
pub fn walk_body<T: Transformer + ?Sized>(t: &mut T, body: Vec<Stmt>) -> FixResult<Vec<Stmt>> {
    let mut out = Vec::with_capacity(body.len());
    for stmt in body {
        let kind = stmt.kind();
        let replaced = t.visit_stmt(stmt)?;
        if replaced.is_empty() {
            return Err(FixerError::contract(format!(
                "rewrite of a {kind} statement produced no statements"
            )));
        }
        out.extend(replaced);
    }
    Ok(out)
}

fn exprs<T: Transformer + ?Sized>(t: &mut T, exprs: Vec<Expr>) -> FixResult<Vec<Expr>> {
    exprs.into_iter().map(|e| t.visit_expr(e)).collect()
}

fn boxed<T: Transformer + ?Sized>(t: &mut T, expr: Box<Expr>) -> FixResult<Box<Expr>> {
    Ok(Box::new(t.visit_expr(*expr)?))
}

fn opt<T: Transformer + ?Sized>(t: &mut T, expr: Option<Expr>) -> FixResult<Option<Expr>> {
    expr.map(|e| t.visit_expr(e)).transpose()
}

fn opt_boxed<T: Transformer + ?Sized>(
    t: &mut T,
    expr: Option<Box<Expr>>,
) -> FixResult<Option<Box<Expr>>> {
    expr.map(|e| boxed(t, e)).transpose()
}

fn keywords<T: Transformer + ?Sized>(t: &mut T, kws: Vec<Keyword>) -> FixResult<Vec<Keyword>> {
    kws.into_iter()
        .map(|k| {
            Ok(Keyword {
                arg: k.arg,
                value: t.visit_expr(k.value)?,
            })
        })
        .collect()
}

fn generators<T: Transformer + ?Sized>(
    t: &mut T,
    gens: Vec<Comprehension>,
) -> FixResult<Vec<Comprehension>> {
    gens.into_iter()
        .map(|c| {
            Ok(Comprehension {
                target: t.visit_expr(c.target)?,
                iter: t.visit_expr(c.iter)?,
                ifs: exprs(t, c.ifs)?,
                is_async: c.is_async,
            })
        })
        .collect()
}

pub fn walk_function_def<T: Transformer + ?Sized>(
    t: &mut T,
    f: FunctionDef,
) -> FixResult<FunctionDef> {
    Ok(FunctionDef {
        name: f.name,
        args: t.visit_arguments(f.args)?,
        body: walk_body(t, f.body)?,
        decorator_list: exprs(t, f.decorator_list)?,
        returns: opt(t, f.returns)?,
    })
}

pub fn walk_class_def<T: Transformer + ?Sized>(t: &mut T, c: ClassDef) -> FixResult<ClassDef> {
    Ok(ClassDef {
        name: c.name,
        bases: exprs(t, c.bases)?,
        keywords: keywords(t, c.keywords)?,
        body: walk_body(t, c.body)?,
        decorator_list: exprs(t, c.decorator_list)?,
    })
}

fn walk_for<T: Transformer + ?Sized>(t: &mut T, f: For) -> FixResult<For> {
    Ok(For {
        target: t.visit_expr(f.target)?,
        iter: t.visit_expr(f.iter)?,
        body: walk_body(t, f.body)?,
        orelse: walk_body(t, f.orelse)?,
    })
}

fn walk_with<T: Transformer + ?Sized>(t: &mut T, w: With) -> FixResult<With> {
    let items = w
        .items
        .into_iter()
        .map(|item| {
            Ok(WithItem {
                context_expr: t.visit_expr(item.context_expr)?,
                optional_vars: opt(t, item.optional_vars)?,
            })
        })
        .collect::<FixResult<_>>()?;
    Ok(With {
        items,
        body: walk_body(t, w.body)?,
    })
}

fn walk_try<T: Transformer + ?Sized>(t: &mut T, tr: Try) -> FixResult<Try> {
    let body = walk_body(t, tr.body)?;
    let handlers = tr
        .handlers
        .into_iter()
        .map(|h| {
            Ok(ExceptHandler {
                type_: opt(t, h.type_)?,
                name: h.name,
                body: walk_body(t, h.body)?,
            })
        })
        .collect::<FixResult<_>>()?;
    Ok(Try {
        body,
        handlers,
        orelse: walk_body(t, tr.orelse)?,
        finalbody: walk_body(t, tr.finalbody)?,
    })
}

/// Rebuilds `stmt` from rewritten children.
pub fn walk_stmt<T: Transformer + ?Sized>(t: &mut T, stmt: Stmt) -> FixResult<Stmt> {
    Ok(match stmt {
        Stmt::FunctionDef(f) => Stmt::FunctionDef(walk_function_def(t, f)?),
        Stmt::AsyncFunctionDef(f) => Stmt::AsyncFunctionDef(walk_function_def(t, f)?),
        Stmt::ClassDef(c) => Stmt::ClassDef(walk_class_def(t, c)?),
        Stmt::Return { value } => Stmt::Return {
            value: opt(t, value)?,
        },
        Stmt::Delete { targets } => Stmt::Delete {
            targets: exprs(t, targets)?,
        },
        Stmt::Assign { targets, value } => Stmt::Assign {
            targets: exprs(t, targets)?,
            value: t.visit_expr(value)?,
        },
        Stmt::AugAssign { target, op, value } => Stmt::AugAssign {
            target: t.visit_expr(target)?,
            op,
            value: t.visit_expr(value)?,
        },
        Stmt::AnnAssign {
            target,
            annotation,
            value,
            simple,
        } => Stmt::AnnAssign {
            target: t.visit_expr(target)?,
            annotation: t.visit_expr(annotation)?,
            value: opt(t, value)?,
            simple,
        },
        Stmt::For(f) => Stmt::For(walk_for(t, f)?),
        Stmt::AsyncFor(f) => Stmt::AsyncFor(walk_for(t, f)?),
        Stmt::While { test, body, orelse } => Stmt::While {
            test: t.visit_expr(test)?,
            body: walk_body(t, body)?,
            orelse: walk_body(t, orelse)?,
        },
        Stmt::If { test, body, orelse } => Stmt::If {
            test: t.visit_expr(test)?,
            body: walk_body(t, body)?,
            orelse: walk_body(t, orelse)?,
        },
        Stmt::With(w) => Stmt::With(walk_with(t, w)?),
        Stmt::AsyncWith(w) => Stmt::AsyncWith(walk_with(t, w)?),
        Stmt::Raise { exc, cause } => Stmt::Raise {
            exc: opt(t, exc)?,
            cause: opt(t, cause)?,
        },
        Stmt::Try(tr) => Stmt::Try(walk_try(t, tr)?),
        Stmt::Assert { test, msg } => Stmt::Assert {
            test: t.visit_expr(test)?,
            msg: opt(t, msg)?,
        },
        Stmt::Expr { value } => Stmt::Expr {
            value: t.visit_expr(value)?,
        },
        stmt @ (Stmt::Import { .. }
        | Stmt::ImportFrom { .. }
        | Stmt::Global { .. }
        | Stmt::Nonlocal { .. }
        | Stmt::Pass
        | Stmt::Break
        | Stmt::Continue) => stmt,
    })
}

/// Rebuilds `expr` from rewritten children. Leaves come back untouched.
pub fn walk_expr<T: Transformer + ?Sized>(t: &mut T, expr: Expr) -> FixResult<Expr> {
    Ok(match expr {
        leaf @ (Expr::Constant { .. } | Expr::Name { .. }) => leaf,
        Expr::BoolOp { op, values } => Expr::BoolOp {
            op,
            values: exprs(t, values)?,
        },
        Expr::BinOp { left, op, right } => Expr::BinOp {
            left: boxed(t, left)?,
            op,
            right: boxed(t, right)?,
        },
        Expr::UnaryOp { op, operand } => Expr::UnaryOp {
            op,
            operand: boxed(t, operand)?,
        },
        Expr::Lambda { args, body } => Expr::Lambda {
            args: Box::new(t.visit_arguments(*args)?),
            body: boxed(t, body)?,
        },
        Expr::IfExp { test, body, orelse } => Expr::IfExp {
            test: boxed(t, test)?,
            body: boxed(t, body)?,
            orelse: boxed(t, orelse)?,
        },
        Expr::Dict { items } => Expr::Dict {
            items: items
                .into_iter()
                .map(|item| {
                    Ok(DictItem {
                        key: opt(t, item.key)?,
                        value: t.visit_expr(item.value)?,
                    })
                })
                .collect::<FixResult<_>>()?,
        },
        Expr::Set { elts } => Expr::Set {
            elts: exprs(t, elts)?,
        },
        Expr::List { elts, ctx } => Expr::List {
            elts: exprs(t, elts)?,
            ctx,
        },
        Expr::Tuple { elts, ctx } => Expr::Tuple {
            elts: exprs(t, elts)?,
            ctx,
        },
        Expr::ListComp { elt, generators: g } => Expr::ListComp {
            elt: boxed(t, elt)?,
            generators: generators(t, g)?,
        },
        Expr::SetComp { elt, generators: g } => Expr::SetComp {
            elt: boxed(t, elt)?,
            generators: generators(t, g)?,
        },
        Expr::GeneratorExp { elt, generators: g } => Expr::GeneratorExp {
            elt: boxed(t, elt)?,
            generators: generators(t, g)?,
        },
        Expr::DictComp {
            key,
            value,
            generators: g,
        } => Expr::DictComp {
            key: boxed(t, key)?,
            value: boxed(t, value)?,
            generators: generators(t, g)?,
        },
        Expr::Await { value } => Expr::Await {
            value: boxed(t, value)?,
        },
        Expr::Yield { value } => Expr::Yield {
            value: opt_boxed(t, value)?,
        },
        Expr::YieldFrom { value } => Expr::YieldFrom {
            value: boxed(t, value)?,
        },
        Expr::Compare {
            left,
            ops,
            comparators,
        } => Expr::Compare {
            left: boxed(t, left)?,
            ops,
            comparators: exprs(t, comparators)?,
        },
        Expr::Call {
            func,
            args,
            keywords: kws,
        } => Expr::Call {
            func: boxed(t, func)?,
            args: exprs(t, args)?,
            keywords: keywords(t, kws)?,
        },
        Expr::FormattedValue {
            value,
            conversion,
            format_spec,
        } => Expr::FormattedValue {
            value: boxed(t, value)?,
            conversion,
            format_spec: opt_boxed(t, format_spec)?,
        },
        Expr::JoinedStr { values } => Expr::JoinedStr {
            values: exprs(t, values)?,
        },
        Expr::Attribute { value, attr, ctx } => Expr::Attribute {
            value: boxed(t, value)?,
            attr,
            ctx,
        },
        Expr::Subscript { value, slice, ctx } => Expr::Subscript {
            value: boxed(t, value)?,
            slice: boxed(t, slice)?,
            ctx,
        },
        Expr::Starred { value, ctx } => Expr::Starred {
            value: boxed(t, value)?,
            ctx,
        },
        Expr::Slice { lower, upper, step } => Expr::Slice {
            lower: opt_boxed(t, lower)?,
            upper: opt_boxed(t, upper)?,
            step: opt_boxed(t, step)?,
        },
    })
}

pub fn walk_arguments<T: Transformer + ?Sized>(t: &mut T, args: Arguments) -> FixResult<Arguments> {
    Ok(Arguments {
        args: args
            .args
            .into_iter()
            .map(|a| t.visit_arg(a))
            .collect::<FixResult<_>>()?,
        vararg: args.vararg.map(|a| t.visit_arg(a)).transpose()?,
        kwonlyargs: args
            .kwonlyargs
            .into_iter()
            .map(|a| t.visit_arg(a))
            .collect::<FixResult<_>>()?,
        kw_defaults: args
            .kw_defaults
            .into_iter()
            .map(|d| opt(t, d))
            .collect::<FixResult<_>>()?,
        kwarg: args.kwarg.map(|a| t.visit_arg(a)).transpose()?,
        defaults: exprs(t, args.defaults)?,
    })
}

pub fn walk_arg<T: Transformer + ?Sized>(t: &mut T, arg: Arg) -> FixResult<Arg> {
    Ok(Arg {
        arg: arg.arg,
        annotation: opt(t, arg.annotation)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;
    impl Transformer for Identity {}

    #[test]
    fn identity_preserves_tree() {
        let module = Module::new(vec![
            Stmt::assign(Expr::store("x"), Expr::call(Expr::name("f"), vec![Expr::num(1)])),
            Stmt::Pass,
        ]);
        let out = walk_module(&mut Identity, module.clone()).unwrap();
        assert_eq!(out, module);
    }

    struct Dropper;
    impl Transformer for Dropper {
        fn visit_stmt(&mut self, stmt: Stmt) -> FixResult<Vec<Stmt>> {
            match stmt {
                Stmt::Pass => Ok(vec![]),
                other => Ok(vec![walk_stmt(self, other)?]),
            }
        }
    }

    #[test]
    fn empty_replacement_is_contract_violation() {
        let module = Module::new(vec![Stmt::Break, Stmt::Pass]);
        let err = walk_module(&mut Dropper, module).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("Pass statement"));
    }
}
