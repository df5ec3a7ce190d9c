//! Read-only traversal.
//!
//! [`walk`] yields every node of a module breadth-first, the same order as
//! Python's `ast.walk`. Checkers use it for "find the first offending node"
//! scans; rewrites go through the transformer in `downlevel-pass-api`.

use crate::ast::*;
use std::collections::VecDeque;

/// Borrowed view of any node kind.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Module(&'a Module),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Arg(&'a Arg),
    Keyword(&'a Keyword),
    Alias(&'a Alias),
    ExceptHandler(&'a ExceptHandler),
    WithItem(&'a WithItem),
    Comprehension(&'a Comprehension),
}

/// Owned copy of a node, used to point at the offending node in diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Module(Module),
    Stmt(Stmt),
    Expr(Expr),
    Arg(Arg),
    Keyword(Keyword),
    Alias(Alias),
    ExceptHandler(ExceptHandler),
    WithItem(WithItem),
    Comprehension(Comprehension),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Module(_) => "Module",
            Node::Stmt(s) => s.kind(),
            Node::Expr(e) => e.kind(),
            Node::Arg(_) => "arg",
            Node::Keyword(_) => "keyword",
            Node::Alias(_) => "alias",
            Node::ExceptHandler(_) => "ExceptHandler",
            Node::WithItem(_) => "withitem",
            Node::Comprehension(_) => "comprehension",
        }
    }
}

impl From<Stmt> for Node {
    fn from(s: Stmt) -> Self {
        Node::Stmt(s)
    }
}

impl From<Expr> for Node {
    fn from(e: Expr) -> Self {
        Node::Expr(e)
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Module(_) => "Module",
            NodeRef::Stmt(s) => s.kind(),
            NodeRef::Expr(e) => e.kind(),
            NodeRef::Arg(_) => "arg",
            NodeRef::Keyword(_) => "keyword",
            NodeRef::Alias(_) => "alias",
            NodeRef::ExceptHandler(_) => "ExceptHandler",
            NodeRef::WithItem(_) => "withitem",
            NodeRef::Comprehension(_) => "comprehension",
        }
    }

    pub fn to_node(&self) -> Node {
        match *self {
            NodeRef::Module(m) => Node::Module(m.clone()),
            NodeRef::Stmt(s) => Node::Stmt(s.clone()),
            NodeRef::Expr(e) => Node::Expr(e.clone()),
            NodeRef::Arg(a) => Node::Arg(a.clone()),
            NodeRef::Keyword(k) => Node::Keyword(k.clone()),
            NodeRef::Alias(a) => Node::Alias(a.clone()),
            NodeRef::ExceptHandler(h) => Node::ExceptHandler(h.clone()),
            NodeRef::WithItem(w) => Node::WithItem(w.clone()),
            NodeRef::Comprehension(c) => Node::Comprehension(c.clone()),
        }
    }

    /// Direct children in field order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match *self {
            NodeRef::Module(m) => push_stmts(&mut out, &m.body),
            NodeRef::Stmt(s) => stmt_children(&mut out, s),
            NodeRef::Expr(e) => expr_children(&mut out, e),
            NodeRef::Arg(a) => push_opt(&mut out, a.annotation.as_ref()),
            NodeRef::Keyword(k) => out.push(NodeRef::Expr(&k.value)),
            NodeRef::Alias(_) => {}
            NodeRef::ExceptHandler(h) => {
                push_opt(&mut out, h.type_.as_ref());
                push_stmts(&mut out, &h.body);
            }
            NodeRef::WithItem(w) => {
                out.push(NodeRef::Expr(&w.context_expr));
                push_opt(&mut out, w.optional_vars.as_ref());
            }
            NodeRef::Comprehension(c) => {
                out.push(NodeRef::Expr(&c.target));
                out.push(NodeRef::Expr(&c.iter));
                push_exprs(&mut out, &c.ifs);
            }
        }
        out
    }
}

fn push_stmts<'a>(out: &mut Vec<NodeRef<'a>>, stmts: &'a [Stmt]) {
    out.extend(stmts.iter().map(NodeRef::Stmt));
}

fn push_exprs<'a>(out: &mut Vec<NodeRef<'a>>, exprs: &'a [Expr]) {
    out.extend(exprs.iter().map(NodeRef::Expr));
}

fn push_opt<'a>(out: &mut Vec<NodeRef<'a>>, expr: Option<&'a Expr>) {
    if let Some(e) = expr {
        out.push(NodeRef::Expr(e));
    }
}

fn push_arguments<'a>(out: &mut Vec<NodeRef<'a>>, args: &'a Arguments) {
    out.extend(args.args.iter().map(NodeRef::Arg));
    if let Some(v) = &args.vararg {
        out.push(NodeRef::Arg(v));
    }
    out.extend(args.kwonlyargs.iter().map(NodeRef::Arg));
    for d in args.kw_defaults.iter().flatten() {
        out.push(NodeRef::Expr(d));
    }
    if let Some(k) = &args.kwarg {
        out.push(NodeRef::Arg(k));
    }
    push_exprs(out, &args.defaults);
}

fn stmt_children<'a>(out: &mut Vec<NodeRef<'a>>, stmt: &'a Stmt) {
    match stmt {
        Stmt::FunctionDef(f) | Stmt::AsyncFunctionDef(f) => {
            push_arguments(out, &f.args);
            push_stmts(out, &f.body);
            push_exprs(out, &f.decorator_list);
            push_opt(out, f.returns.as_ref());
        }
        Stmt::ClassDef(c) => {
            push_exprs(out, &c.bases);
            out.extend(c.keywords.iter().map(NodeRef::Keyword));
            push_stmts(out, &c.body);
            push_exprs(out, &c.decorator_list);
        }
        Stmt::Return { value } => push_opt(out, value.as_ref()),
        Stmt::Delete { targets } => push_exprs(out, targets),
        Stmt::Assign { targets, value } => {
            push_exprs(out, targets);
            out.push(NodeRef::Expr(value));
        }
        Stmt::AugAssign { target, value, .. } => {
            out.push(NodeRef::Expr(target));
            out.push(NodeRef::Expr(value));
        }
        Stmt::AnnAssign {
            target,
            annotation,
            value,
            ..
        } => {
            out.push(NodeRef::Expr(target));
            out.push(NodeRef::Expr(annotation));
            push_opt(out, value.as_ref());
        }
        Stmt::For(f) | Stmt::AsyncFor(f) => {
            out.push(NodeRef::Expr(&f.target));
            out.push(NodeRef::Expr(&f.iter));
            push_stmts(out, &f.body);
            push_stmts(out, &f.orelse);
        }
        Stmt::While { test, body, orelse } | Stmt::If { test, body, orelse } => {
            out.push(NodeRef::Expr(test));
            push_stmts(out, body);
            push_stmts(out, orelse);
        }
        Stmt::With(w) | Stmt::AsyncWith(w) => {
            out.extend(w.items.iter().map(NodeRef::WithItem));
            push_stmts(out, &w.body);
        }
        Stmt::Raise { exc, cause } => {
            push_opt(out, exc.as_ref());
            push_opt(out, cause.as_ref());
        }
        Stmt::Try(t) => {
            push_stmts(out, &t.body);
            out.extend(t.handlers.iter().map(NodeRef::ExceptHandler));
            push_stmts(out, &t.orelse);
            push_stmts(out, &t.finalbody);
        }
        Stmt::Assert { test, msg } => {
            out.push(NodeRef::Expr(test));
            push_opt(out, msg.as_ref());
        }
        Stmt::Import { names } | Stmt::ImportFrom { names, .. } => {
            out.extend(names.iter().map(NodeRef::Alias));
        }
        Stmt::Expr { value } => out.push(NodeRef::Expr(value)),
        Stmt::Global { .. }
        | Stmt::Nonlocal { .. }
        | Stmt::Pass
        | Stmt::Break
        | Stmt::Continue => {}
    }
}

fn expr_children<'a>(out: &mut Vec<NodeRef<'a>>, expr: &'a Expr) {
    match expr {
        Expr::BoolOp { values, .. } => push_exprs(out, values),
        Expr::BinOp { left, right, .. } => {
            out.push(NodeRef::Expr(left));
            out.push(NodeRef::Expr(right));
        }
        Expr::UnaryOp { operand, .. } => out.push(NodeRef::Expr(operand)),
        Expr::Lambda { args, body } => {
            push_arguments(out, args);
            out.push(NodeRef::Expr(body));
        }
        Expr::IfExp { test, body, orelse } => {
            out.push(NodeRef::Expr(test));
            out.push(NodeRef::Expr(body));
            out.push(NodeRef::Expr(orelse));
        }
        Expr::Dict { items } => {
            for item in items {
                push_opt(out, item.key.as_ref());
                out.push(NodeRef::Expr(&item.value));
            }
        }
        Expr::Set { elts } | Expr::List { elts, .. } | Expr::Tuple { elts, .. } => {
            push_exprs(out, elts)
        }
        Expr::ListComp { elt, generators }
        | Expr::SetComp { elt, generators }
        | Expr::GeneratorExp { elt, generators } => {
            out.push(NodeRef::Expr(elt));
            out.extend(generators.iter().map(NodeRef::Comprehension));
        }
        Expr::DictComp {
            key,
            value,
            generators,
        } => {
            out.push(NodeRef::Expr(key));
            out.push(NodeRef::Expr(value));
            out.extend(generators.iter().map(NodeRef::Comprehension));
        }
        Expr::Await { value } | Expr::YieldFrom { value } => out.push(NodeRef::Expr(value)),
        Expr::Yield { value } => push_opt(out, value.as_deref()),
        Expr::Compare {
            left, comparators, ..
        } => {
            out.push(NodeRef::Expr(left));
            push_exprs(out, comparators);
        }
        Expr::Call {
            func,
            args,
            keywords,
        } => {
            out.push(NodeRef::Expr(func));
            push_exprs(out, args);
            out.extend(keywords.iter().map(NodeRef::Keyword));
        }
        Expr::FormattedValue {
            value, format_spec, ..
        } => {
            out.push(NodeRef::Expr(value));
            push_opt(out, format_spec.as_deref());
        }
        Expr::JoinedStr { values } => push_exprs(out, values),
        Expr::Attribute { value, .. } | Expr::Starred { value, .. } => {
            out.push(NodeRef::Expr(value))
        }
        Expr::Subscript { value, slice, .. } => {
            out.push(NodeRef::Expr(value));
            out.push(NodeRef::Expr(slice));
        }
        Expr::Slice { lower, upper, step } => {
            push_opt(out, lower.as_deref());
            push_opt(out, upper.as_deref());
            push_opt(out, step.as_deref());
        }
        Expr::Constant { .. } | Expr::Name { .. } => {}
    }
}

/// Breadth-first iterator over every node reachable from a root.
pub struct Walk<'a> {
    queue: VecDeque<NodeRef<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        Some(node)
    }
}

/// Every node of `module`, the module itself first.
pub fn walk(module: &Module) -> Walk<'_> {
    walk_from(NodeRef::Module(module))
}

pub fn walk_from(root: NodeRef<'_>) -> Walk<'_> {
    Walk {
        queue: VecDeque::from([root]),
    }
}
