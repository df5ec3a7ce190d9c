//! Shorthand constructors for nodes that passes synthesize.

use crate::ast::*;

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name {
            id: id.into(),
            ctx: ExprContext::Load,
        }
    }

    pub fn store(id: impl Into<String>) -> Self {
        Expr::Name {
            id: id.into(),
            ctx: ExprContext::Store,
        }
    }

    pub fn constant(value: Constant) -> Self {
        Expr::Constant { value }
    }

    pub fn str(s: impl Into<String>) -> Self {
        Expr::Constant {
            value: Constant::Str(s.into()),
        }
    }

    pub fn num(n: impl ToString) -> Self {
        Expr::Constant {
            value: Constant::Num(n.to_string()),
        }
    }

    pub fn none() -> Self {
        Expr::Constant {
            value: Constant::None,
        }
    }

    pub fn attr(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
            ctx: ExprContext::Load,
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn call_kw(func: Expr, args: Vec<Expr>, keywords: Vec<Keyword>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords,
        }
    }

    pub fn list(elts: Vec<Expr>) -> Self {
        Expr::List {
            elts,
            ctx: ExprContext::Load,
        }
    }

    pub fn tuple(elts: Vec<Expr>) -> Self {
        Expr::Tuple {
            elts,
            ctx: ExprContext::Load,
        }
    }

    pub fn set(elts: Vec<Expr>) -> Self {
        Expr::Set { elts }
    }

    pub fn dict(items: Vec<DictItem>) -> Self {
        Expr::Dict { items }
    }

    pub fn starred(value: Expr) -> Self {
        Expr::Starred {
            value: Box::new(value),
            ctx: ExprContext::Load,
        }
    }

    pub fn binop(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn subscript(value: Expr, slice: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
            ctx: ExprContext::Load,
        }
    }
}

impl Keyword {
    pub fn named(arg: impl Into<String>, value: Expr) -> Self {
        Self {
            arg: Some(arg.into()),
            value,
        }
    }

    /// `**value`
    pub fn spread(value: Expr) -> Self {
        Self { arg: None, value }
    }

    pub fn is_spread(&self) -> bool {
        self.arg.is_none()
    }
}

impl DictItem {
    pub fn pair(key: Expr, value: Expr) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }

    /// `**value`
    pub fn spread(value: Expr) -> Self {
        Self { key: None, value }
    }

    pub fn is_spread(&self) -> bool {
        self.key.is_none()
    }
}

impl Arg {
    pub fn new(arg: impl Into<String>) -> Self {
        Self {
            arg: arg.into(),
            annotation: None,
        }
    }
}

impl Alias {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asname: None,
        }
    }

    pub fn aliased(name: impl Into<String>, asname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asname: Some(asname.into()),
        }
    }

    /// Name bound in the importing scope.
    pub fn bound_name(&self) -> &str {
        self.asname.as_deref().unwrap_or(&self.name)
    }
}

impl Stmt {
    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            value,
        }
    }
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}
