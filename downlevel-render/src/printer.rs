//! Tree to Python source.
//!
//! Output is normalized: four-space indentation, single quotes unless the
//! text contains one, parentheses only where binding strength needs them
//! (tuples are always parenthesized).

use downlevel_tree::{
    Alias, Arg, Arguments, BoolOperator, CmpOperator, Comprehension, Constant, DictItem,
    ExceptHandler, Expr, FunctionDef, Keyword, Operator, Stmt, UnaryOperator, WithItem,
};
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Tuple,
    Yield,
    Test,
    Or,
    And,
    Not,
    Cmp,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Arith,
    Term,
    Factor,
    Power,
    Await,
    Atom,
}

impl Prec {
    fn next(self) -> Self {
        match self {
            Prec::Tuple => Prec::Yield,
            Prec::Yield => Prec::Test,
            Prec::Test => Prec::Or,
            Prec::Or => Prec::And,
            Prec::And => Prec::Not,
            Prec::Not => Prec::Cmp,
            Prec::Cmp => Prec::BitOr,
            Prec::BitOr => Prec::BitXor,
            Prec::BitXor => Prec::BitAnd,
            Prec::BitAnd => Prec::Shift,
            Prec::Shift => Prec::Arith,
            Prec::Arith => Prec::Term,
            Prec::Term => Prec::Factor,
            Prec::Factor => Prec::Power,
            Prec::Power => Prec::Await,
            Prec::Await | Prec::Atom => Prec::Atom,
        }
    }
}

fn binary_operator(op: Operator) -> (&'static str, Prec) {
    match op {
        Operator::Add => ("+", Prec::Arith),
        Operator::Sub => ("-", Prec::Arith),
        Operator::Mult => ("*", Prec::Term),
        Operator::MatMult => ("@", Prec::Term),
        Operator::Div => ("/", Prec::Term),
        Operator::Mod => ("%", Prec::Term),
        Operator::FloorDiv => ("//", Prec::Term),
        Operator::Pow => ("**", Prec::Power),
        Operator::LShift => ("<<", Prec::Shift),
        Operator::RShift => (">>", Prec::Shift),
        Operator::BitOr => ("|", Prec::BitOr),
        Operator::BitXor => ("^", Prec::BitXor),
        Operator::BitAnd => ("&", Prec::BitAnd),
    }
}

fn compare_operator(op: CmpOperator) -> &'static str {
    match op {
        CmpOperator::Eq => "==",
        CmpOperator::NotEq => "!=",
        CmpOperator::Lt => "<",
        CmpOperator::LtE => "<=",
        CmpOperator::Gt => ">",
        CmpOperator::GtE => ">=",
        CmpOperator::Is => "is",
        CmpOperator::IsNot => "is not",
        CmpOperator::In => "in",
        CmpOperator::NotIn => "not in",
    }
}

fn precedence(expr: &Expr) -> Prec {
    match expr {
        Expr::BoolOp {
            op: BoolOperator::Or,
            ..
        } => Prec::Or,
        Expr::BoolOp {
            op: BoolOperator::And,
            ..
        } => Prec::And,
        Expr::BinOp { op, .. } => binary_operator(*op).1,
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            ..
        } => Prec::Not,
        Expr::UnaryOp { .. } => Prec::Factor,
        Expr::Lambda { .. } | Expr::IfExp { .. } => Prec::Test,
        Expr::Await { .. } => Prec::Await,
        Expr::Yield { .. } | Expr::YieldFrom { .. } => Prec::Yield,
        Expr::Compare { .. } => Prec::Cmp,
        Expr::Constant {
            value: Constant::Num(n),
        } if n.starts_with('-') => Prec::Factor,
        _ => Prec::Atom,
    }
}

/// Python literal for a text string.
pub fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    escape_into(&mut out, s, quote);
    out.push(quote);
    out
}

fn escape_into(out: &mut String, s: &str, quote: char) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let cp = u32::from(c);
                let _ = match cp {
                    0..=0xff => write!(out, "\\x{cp:02x}"),
                    0x100..=0xffff => write!(out, "\\u{cp:04x}"),
                    _ => write!(out, "\\U{cp:08x}"),
                };
            }
            c => out.push(c),
        }
    }
}

fn quote_bytes(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    let mut out = String::from("b");
    out.push(char::from(quote));
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7e => out.push(char::from(b)),
            b => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(char::from(quote));
    out
}

/// One piece of an f-string body before the quote is chosen.
enum FPiece {
    Literal(String),
    Field(String),
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn start(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn end(&mut self) {
        self.out.push('\n');
    }

    fn line(&mut self, s: &str) {
        self.start();
        self.push(s);
        self.end();
    }

    fn sep(&mut self, first: &mut bool) {
        if !*first {
            self.push(", ");
        }
        *first = false;
    }

    fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        let mut first = true;
        for item in items {
            self.sep(&mut first);
            each(self, item);
        }
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    fn expr(&mut self, expr: &Expr, ctx: Prec) {
        let paren = precedence(expr) < ctx;
        if paren {
            self.push("(");
        }
        self.expr_inner(expr);
        if paren {
            self.push(")");
        }
    }

    fn element(&mut self, expr: &Expr) {
        self.expr(expr, Prec::Test);
    }

    fn expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::BoolOp { op, values } => {
                let (word, own) = match op {
                    BoolOperator::And => (" and ", Prec::And),
                    BoolOperator::Or => (" or ", Prec::Or),
                };
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.push(word);
                    }
                    self.expr(value, own.next());
                }
            }
            Expr::BinOp { left, op, right } => {
                let (symbol, own) = binary_operator(*op);
                let (left_prec, right_prec) = if *op == Operator::Pow {
                    (own.next(), own)
                } else {
                    (own, own.next())
                };
                self.expr(left, left_prec);
                self.push(" ");
                self.push(symbol);
                self.push(" ");
                self.expr(right, right_prec);
            }
            Expr::UnaryOp { op, operand } => {
                let (symbol, own) = match op {
                    UnaryOperator::Not => ("not ", Prec::Not),
                    UnaryOperator::Invert => ("~", Prec::Factor),
                    UnaryOperator::UAdd => ("+", Prec::Factor),
                    UnaryOperator::USub => ("-", Prec::Factor),
                };
                self.push(symbol);
                self.expr(operand, own);
            }
            Expr::Lambda { args, body } => {
                self.push("lambda");
                if !is_empty_arguments(args) {
                    self.push(" ");
                    self.arguments(args);
                }
                self.push(": ");
                self.expr(body, Prec::Test);
            }
            Expr::IfExp { test, body, orelse } => {
                self.expr(body, Prec::Test.next());
                self.push(" if ");
                self.expr(test, Prec::Test.next());
                self.push(" else ");
                self.expr(orelse, Prec::Test);
            }
            Expr::Dict { items } => {
                self.push("{");
                self.comma_list(items, |p, item: &DictItem| match &item.key {
                    Some(key) => {
                        p.element(key);
                        p.push(": ");
                        p.element(&item.value);
                    }
                    None => {
                        p.push("**");
                        p.expr(&item.value, Prec::BitOr);
                    }
                });
                self.push("}");
            }
            Expr::Set { elts } if elts.is_empty() => self.push("set()"),
            Expr::Set { elts } => {
                self.push("{");
                self.comma_list(elts, Self::element);
                self.push("}");
            }
            Expr::List { elts, .. } => {
                self.push("[");
                self.comma_list(elts, Self::element);
                self.push("]");
            }
            Expr::Tuple { elts, .. } => {
                self.push("(");
                self.tuple_elements(elts);
                self.push(")");
            }
            Expr::ListComp { elt, generators } => {
                self.push("[");
                self.element(elt);
                self.comprehensions(generators);
                self.push("]");
            }
            Expr::SetComp { elt, generators } => {
                self.push("{");
                self.element(elt);
                self.comprehensions(generators);
                self.push("}");
            }
            Expr::DictComp {
                key,
                value,
                generators,
            } => {
                self.push("{");
                self.element(key);
                self.push(": ");
                self.element(value);
                self.comprehensions(generators);
                self.push("}");
            }
            Expr::GeneratorExp { elt, generators } => {
                self.push("(");
                self.element(elt);
                self.comprehensions(generators);
                self.push(")");
            }
            Expr::Await { value } => {
                self.push("await ");
                self.expr(value, Prec::Atom);
            }
            Expr::Yield { value } => match value {
                Some(value) => {
                    self.push("yield ");
                    self.expr(value, Prec::Tuple);
                }
                None => self.push("yield"),
            },
            Expr::YieldFrom { value } => {
                self.push("yield from ");
                self.expr(value, Prec::Test);
            }
            Expr::Compare {
                left,
                ops,
                comparators,
            } => {
                self.expr(left, Prec::Cmp.next());
                for (op, right) in ops.iter().zip(comparators) {
                    self.push(" ");
                    self.push(compare_operator(*op));
                    self.push(" ");
                    self.expr(right, Prec::Cmp.next());
                }
            }
            Expr::Call {
                func,
                args,
                keywords,
            } => {
                self.expr(func, Prec::Atom);
                self.push("(");
                let mut first = true;
                for arg in args {
                    self.sep(&mut first);
                    self.element(arg);
                }
                for keyword in keywords {
                    self.sep(&mut first);
                    self.keyword(keyword);
                }
                self.push(")");
            }
            Expr::FormattedValue { .. } | Expr::JoinedStr { .. } => self.fstring(expr),
            Expr::Constant { value } => self.constant(value),
            Expr::Attribute { value, attr, .. } => {
                let bare_int = matches!(
                    value.as_ref(),
                    Expr::Constant { value: Constant::Num(n) } if n.bytes().all(|b| b.is_ascii_digit())
                );
                if bare_int {
                    self.push("(");
                    self.expr_inner(value);
                    self.push(")");
                } else {
                    self.expr(value, Prec::Atom);
                }
                self.push(".");
                self.push(attr);
            }
            Expr::Subscript { value, slice, .. } => {
                self.expr(value, Prec::Atom);
                self.push("[");
                match slice.as_ref() {
                    Expr::Tuple { elts, .. } if !elts.is_empty() => self.tuple_elements(elts),
                    other => self.expr(other, Prec::Tuple),
                }
                self.push("]");
            }
            Expr::Starred { value, .. } => {
                self.push("*");
                self.expr(value, Prec::BitOr);
            }
            Expr::Name { id, .. } => self.push(id),
            Expr::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    self.element(lower);
                }
                self.push(":");
                if let Some(upper) = upper {
                    self.element(upper);
                }
                if let Some(step) = step {
                    self.push(":");
                    self.element(step);
                }
            }
        }
    }

    fn tuple_elements(&mut self, elts: &[Expr]) {
        self.comma_list(elts, Self::element);
        if elts.len() == 1 {
            self.push(",");
        }
    }

    fn keyword(&mut self, keyword: &Keyword) {
        match &keyword.arg {
            Some(name) => {
                self.push(name);
                self.push("=");
                self.element(&keyword.value);
            }
            None => {
                self.push("**");
                self.expr(&keyword.value, Prec::BitOr);
            }
        }
    }

    fn comprehensions(&mut self, generators: &[Comprehension]) {
        for comp in generators {
            self.push(if comp.is_async {
                " async for "
            } else {
                " for "
            });
            self.expr(&comp.target, Prec::Tuple);
            self.push(" in ");
            self.expr(&comp.iter, Prec::Test.next());
            for cond in &comp.ifs {
                self.push(" if ");
                self.expr(cond, Prec::Test.next());
            }
        }
    }

    fn constant(&mut self, value: &Constant) {
        match value {
            Constant::None => self.push("None"),
            Constant::Bool(true) => self.push("True"),
            Constant::Bool(false) => self.push("False"),
            Constant::Num(n) => self.push(n),
            Constant::Str(s) => {
                let literal = quote_str(s);
                self.push(&literal);
            }
            Constant::Bytes(b) => {
                let literal = quote_bytes(b);
                self.push(&literal);
            }
            Constant::Ellipsis => self.push("..."),
        }
    }

    fn fstring(&mut self, expr: &Expr) {
        let mut pieces = Vec::new();
        f_pieces(expr, &mut pieces);
        let quote = ["'", "\"", "'''", "\"\"\""]
            .into_iter()
            .find(|q| {
                pieces
                    .iter()
                    .all(|p| !matches!(p, FPiece::Field(f) if f.contains(q)))
            })
            .unwrap_or("'''");
        let quote_char = if quote.starts_with('"') { '"' } else { '\'' };
        self.push("f");
        self.push(quote);
        for piece in pieces {
            match piece {
                FPiece::Literal(text) => escape_into(&mut self.out, &text, quote_char),
                FPiece::Field(field) => self.push(&field),
            }
        }
        self.push(quote);
    }

    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    fn arg(&mut self, arg: &Arg) {
        self.push(&arg.arg);
        if let Some(annotation) = &arg.annotation {
            self.push(": ");
            self.element(annotation);
        }
    }

    fn arguments(&mut self, args: &Arguments) {
        let mut first = true;
        let plain = args.args.len().saturating_sub(args.defaults.len());
        for (i, arg) in args.args.iter().enumerate() {
            self.sep(&mut first);
            self.arg(arg);
            if let Some(default) = i.checked_sub(plain).and_then(|d| args.defaults.get(d)) {
                self.push("=");
                self.element(default);
            }
        }
        if let Some(vararg) = &args.vararg {
            self.sep(&mut first);
            self.push("*");
            self.arg(vararg);
        } else if !args.kwonlyargs.is_empty() {
            self.sep(&mut first);
            self.push("*");
        }
        for (i, arg) in args.kwonlyargs.iter().enumerate() {
            self.sep(&mut first);
            self.arg(arg);
            if let Some(Some(default)) = args.kw_defaults.get(i) {
                self.push("=");
                self.element(default);
            }
        }
        if let Some(kwarg) = &args.kwarg {
            self.sep(&mut first);
            self.push("**");
            self.arg(kwarg);
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    fn suite(&mut self, body: &[Stmt]) {
        self.depth += 1;
        if body.is_empty() {
            self.line("pass");
        }
        for stmt in body {
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    fn else_suite(&mut self, orelse: &[Stmt]) {
        if !orelse.is_empty() {
            self.line("else:");
            self.suite(orelse);
        }
    }

    fn header(&mut self, keyword: &str, expr: &Expr) {
        self.start();
        self.push(keyword);
        self.expr(expr, Prec::Tuple);
        self.push(":");
        self.end();
    }

    fn decorators(&mut self, decorators: &[Expr]) {
        for decorator in decorators {
            self.start();
            self.push("@");
            self.element(decorator);
            self.end();
        }
    }

    fn function_def(&mut self, def: &FunctionDef, is_async: bool) {
        self.decorators(&def.decorator_list);
        self.start();
        self.push(if is_async { "async def " } else { "def " });
        self.push(&def.name);
        self.push("(");
        self.arguments(&def.args);
        self.push(")");
        if let Some(returns) = &def.returns {
            self.push(" -> ");
            self.element(returns);
        }
        self.push(":");
        self.end();
        self.suite(&def.body);
    }

    fn aliases(&mut self, names: &[Alias]) {
        self.comma_list(names, |p, alias| {
            p.push(&alias.name);
            if let Some(asname) = &alias.asname {
                p.push(" as ");
                p.push(asname);
            }
        });
    }

    fn with_items(&mut self, items: &[WithItem]) {
        self.comma_list(items, |p, item| {
            p.element(&item.context_expr);
            if let Some(vars) = &item.optional_vars {
                p.push(" as ");
                p.element(vars);
            }
        });
    }

    fn handler(&mut self, handler: &ExceptHandler) {
        self.start();
        self.push("except");
        if let Some(type_) = &handler.type_ {
            self.push(" ");
            self.element(type_);
            if let Some(name) = &handler.name {
                self.push(" as ");
                self.push(name);
            }
        }
        self.push(":");
        self.end();
        self.suite(&handler.body);
    }

    fn if_chain(&mut self, keyword: &str, test: &Expr, body: &[Stmt], orelse: &[Stmt]) {
        self.header(keyword, test);
        self.suite(body);
        match orelse {
            [
                Stmt::If {
                    test,
                    body,
                    orelse,
                },
            ] => self.if_chain("elif ", test, body, orelse),
            other => self.else_suite(other),
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(def) => self.function_def(def, false),
            Stmt::AsyncFunctionDef(def) => self.function_def(def, true),
            Stmt::ClassDef(class) => {
                self.decorators(&class.decorator_list);
                self.start();
                self.push("class ");
                self.push(&class.name);
                if !class.bases.is_empty() || !class.keywords.is_empty() {
                    self.push("(");
                    let mut first = true;
                    for base in &class.bases {
                        self.sep(&mut first);
                        self.element(base);
                    }
                    for keyword in &class.keywords {
                        self.sep(&mut first);
                        self.keyword(keyword);
                    }
                    self.push(")");
                }
                self.push(":");
                self.end();
                self.suite(&class.body);
            }
            Stmt::Return { value } => {
                self.start();
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(value, Prec::Tuple);
                }
                self.end();
            }
            Stmt::Delete { targets } => {
                self.start();
                self.push("del ");
                self.comma_list(targets, Self::element);
                self.end();
            }
            Stmt::Assign { targets, value } => {
                self.start();
                for target in targets {
                    self.expr(target, Prec::Tuple);
                    self.push(" = ");
                }
                self.expr(value, Prec::Tuple);
                self.end();
            }
            Stmt::AugAssign { target, op, value } => {
                self.start();
                self.expr(target, Prec::Tuple);
                self.push(" ");
                self.push(binary_operator(*op).0);
                self.push("= ");
                self.expr(value, Prec::Tuple);
                self.end();
            }
            Stmt::AnnAssign {
                target,
                annotation,
                value,
                simple,
            } => {
                self.start();
                let wrap = !simple && matches!(target, Expr::Name { .. });
                if wrap {
                    self.push("(");
                }
                self.expr(target, Prec::Tuple);
                if wrap {
                    self.push(")");
                }
                self.push(": ");
                self.element(annotation);
                if let Some(value) = value {
                    self.push(" = ");
                    self.expr(value, Prec::Tuple);
                }
                self.end();
            }
            Stmt::For(for_) | Stmt::AsyncFor(for_) => {
                self.start();
                if matches!(stmt, Stmt::AsyncFor(_)) {
                    self.push("async ");
                }
                self.push("for ");
                self.expr(&for_.target, Prec::Tuple);
                self.push(" in ");
                self.expr(&for_.iter, Prec::Tuple);
                self.push(":");
                self.end();
                self.suite(&for_.body);
                self.else_suite(&for_.orelse);
            }
            Stmt::While { test, body, orelse } => {
                self.header("while ", test);
                self.suite(body);
                self.else_suite(orelse);
            }
            Stmt::If { test, body, orelse } => self.if_chain("if ", test, body, orelse),
            Stmt::With(with) | Stmt::AsyncWith(with) => {
                self.start();
                if matches!(stmt, Stmt::AsyncWith(_)) {
                    self.push("async ");
                }
                self.push("with ");
                self.with_items(&with.items);
                self.push(":");
                self.end();
                self.suite(&with.body);
            }
            Stmt::Raise { exc, cause } => {
                self.start();
                self.push("raise");
                if let Some(exc) = exc {
                    self.push(" ");
                    self.element(exc);
                }
                if let Some(cause) = cause {
                    self.push(" from ");
                    self.element(cause);
                }
                self.end();
            }
            Stmt::Try(try_) => {
                self.line("try:");
                self.suite(&try_.body);
                for handler in &try_.handlers {
                    self.handler(handler);
                }
                self.else_suite(&try_.orelse);
                if !try_.finalbody.is_empty() {
                    self.line("finally:");
                    self.suite(&try_.finalbody);
                }
            }
            Stmt::Assert { test, msg } => {
                self.start();
                self.push("assert ");
                self.element(test);
                if let Some(msg) = msg {
                    self.push(", ");
                    self.element(msg);
                }
                self.end();
            }
            Stmt::Import { names } => {
                self.start();
                self.push("import ");
                self.aliases(names);
                self.end();
            }
            Stmt::ImportFrom {
                module,
                names,
                level,
            } => {
                self.start();
                self.push("from ");
                for _ in 0..*level {
                    self.push(".");
                }
                if let Some(module) = module {
                    self.push(module);
                }
                self.push(" import ");
                self.aliases(names);
                self.end();
            }
            Stmt::Global { names } | Stmt::Nonlocal { names } => {
                self.start();
                self.push(if matches!(stmt, Stmt::Global { .. }) {
                    "global "
                } else {
                    "nonlocal "
                });
                self.push(&names.join(", "));
                self.end();
            }
            Stmt::Expr { value } => {
                self.start();
                self.expr(value, Prec::Tuple);
                self.end();
            }
            Stmt::Pass => self.line("pass"),
            Stmt::Break => self.line("break"),
            Stmt::Continue => self.line("continue"),
        }
    }

    /// Top-level statements, with a blank line around definitions.
    fn module_body(&mut self, body: &[Stmt]) {
        let mut prev_def = false;
        for stmt in body {
            let is_def = matches!(
                stmt,
                Stmt::FunctionDef(_) | Stmt::AsyncFunctionDef(_) | Stmt::ClassDef(_)
            );
            if (is_def || prev_def) && !self.out.is_empty() {
                self.end();
            }
            self.stmt(stmt);
            prev_def = is_def;
        }
    }
}

fn is_empty_arguments(args: &Arguments) -> bool {
    args.args.is_empty()
        && args.vararg.is_none()
        && args.kwonlyargs.is_empty()
        && args.kwarg.is_none()
}

fn f_pieces(expr: &Expr, pieces: &mut Vec<FPiece>) {
    match expr {
        Expr::JoinedStr { values } => {
            for value in values {
                f_pieces(value, pieces);
            }
        }
        Expr::Constant {
            value: Constant::Str(s),
        } => pieces.push(FPiece::Literal(s.replace('{', "{{").replace('}', "}}"))),
        Expr::FormattedValue {
            value,
            conversion,
            format_spec,
        } => {
            let inner = unparse_expr(value);
            let mut field = String::from("{");
            if inner.starts_with('{') {
                field.push(' ');
            }
            field.push_str(&inner);
            if let Some(conversion) = conversion {
                field.push('!');
                field.push(*conversion);
            }
            if let Some(spec) = format_spec {
                field.push(':');
                let mut spec_pieces = Vec::new();
                f_pieces(spec, &mut spec_pieces);
                for piece in spec_pieces {
                    match piece {
                        FPiece::Literal(text) | FPiece::Field(text) => field.push_str(&text),
                    }
                }
            }
            field.push('}');
            pieces.push(FPiece::Field(field));
        }
        other => {
            let inner = unparse_expr(other);
            pieces.push(FPiece::Field(format!("{{{inner}}}")));
        }
    }
}

/// Source text of one expression.
pub fn unparse_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr, Prec::Tuple);
    printer.out
}

/// Source text of a statement list at top level, newline-terminated.
pub fn unparse_stmts(body: &[Stmt]) -> String {
    let mut printer = Printer::default();
    printer.module_body(body);
    printer.out
}
