//! Generalized unpacking normalizer.
//!
//! Older dialects accept at most one `*` spread, as the last positional
//! argument, and at most one `**` spread, as the last keyword. This fixer
//! rewrites every call, display and dict literal with a non-trailing spread
//! so that at most a single trailing spread remains:
//!
//! ```text
//! f(*a, *[1, 2], z)       =>  f(*(list(a) + [1, 2, z]))
//! [*[1, 2], 3, *[4, 5]]   =>  [1, 2, 3, 4, 5]
//! {**a, **b, 'x': 1}      =>  dict(itertools.chain(a.items(), b.items(), {'x': 1}.items()))
//! {**{'a': 1}, **{'b': 2}} => {'a': 1, 'b': 2}
//! ```
//!
//! Rewrites apply bottom-up, so an operand is already normalized when its
//! parent is inspected. Output never has a non-trailing spread, which makes
//! the fixer idempotent.
//!
//! When several spread mappings provide the same key, the last one applied
//! wins at run time, exactly as for the generated `itertools.chain`. The
//! rewrite does not try to decide it.
//!
//! A display whose only spread is trailing (`[1, *a]`, `{'x': 1, **m}`) is
//! left as written, although dialects before 3.5 reject any spread inside a
//! display.

use downlevel_pass_api::{FixResult, Fixer, Transformer, walk_expr, walk_module};
use downlevel_pass_catalog::{FixerMeta, UNPACKING_GENERALIZATIONS};
use downlevel_tree::{DictItem, Expr, ExprContext, Keyword, Module, Operator};
use downlevel_types::{BuildConfig, EffectSet, ImportDecl};
use tracing::trace;

#[derive(Debug, Default)]
pub struct UnpackingGeneralizationsFixer {
    effects: EffectSet,
}

/// A piece of the flattened element sequence.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Elements known statically.
    Literal(Vec<Expr>),
    /// `list(x)` for a spread operand of unknown length.
    Materialized(Expr),
}

impl Segment {
    fn into_expr(self) -> Expr {
        match self {
            Segment::Literal(elts) => Expr::list(elts),
            Segment::Materialized(expr) => expr,
        }
    }
}

/// A spread that is not the last element.
fn has_interleaved_spread<T>(items: &[T], is_spread: impl Fn(&T) -> bool) -> bool {
    items.iter().rev().skip(1).any(is_spread)
}

#[derive(Default)]
struct Segments {
    done: Vec<Segment>,
    open: Vec<Expr>,
}

impl Segments {
    fn push(&mut self, elt: Expr) {
        match elt {
            Expr::Starred { value, .. } => match *value {
                Expr::List { elts, .. } | Expr::Tuple { elts, .. } | Expr::Set { elts } => {
                    for inner in elts {
                        self.push(inner);
                    }
                }
                operand => {
                    if !self.open.is_empty() {
                        self.done
                            .push(Segment::Literal(std::mem::take(&mut self.open)));
                    }
                    self.done.push(Segment::Materialized(Expr::call(
                        Expr::name("list"),
                        vec![operand],
                    )));
                }
            },
            plain => self.open.push(plain),
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        if !self.open.is_empty() {
            self.done.push(Segment::Literal(self.open));
        }
        self.done
    }
}

fn segments(elts: Vec<Expr>) -> Vec<Segment> {
    let mut acc = Segments::default();
    for elt in elts {
        acc.push(elt);
    }
    acc.finish()
}

/// Result of splitting a spread-bearing element list.
enum Flattened {
    /// All elements known statically; no concatenation needed.
    Elements(Vec<Expr>),
    /// A list-valued expression, concatenating every segment.
    Concat(Expr),
}

fn flatten(elts: Vec<Expr>) -> Flattened {
    let mut segs = segments(elts).into_iter();
    match (segs.next(), segs.len()) {
        (None, _) => Flattened::Elements(Vec::new()),
        (Some(Segment::Literal(elts)), 0) => Flattened::Elements(elts),
        (Some(first), _) => Flattened::Concat(segs.fold(first.into_expr(), |acc, seg| {
            Expr::binop(acc, Operator::Add, seg.into_expr())
        })),
    }
}

/// Value a mapping spread chain is built from.
fn is_plain_dict(expr: &Expr) -> bool {
    matches!(expr, Expr::Dict { items } if !items.iter().any(DictItem::is_spread))
}

/// Merges runs of adjacent plain dict literals. Keys from later literals
/// follow earlier ones, so they override at run time.
fn collapse(values: Vec<Expr>) -> Vec<Expr> {
    let mut out: Vec<Expr> = Vec::with_capacity(values.len());
    for value in values {
        if is_plain_dict(&value) && out.last().is_some_and(is_plain_dict) {
            if let (Some(Expr::Dict { items: prev }), Expr::Dict { items }) = (out.last_mut(), value)
            {
                prev.extend(items);
            }
            continue;
        }
        out.push(value);
    }
    out
}

#[derive(Debug, Clone, Copy)]
enum Display {
    List,
    Tuple,
    Set,
}

impl Display {
    fn rebuild(self, elts: Vec<Expr>) -> Expr {
        match self {
            Display::List => Expr::list(elts),
            Display::Tuple => Expr::tuple(elts),
            Display::Set => Expr::set(elts),
        }
    }

    /// Converts a list-valued expression into this display's type.
    fn from_list(self, list: Expr) -> Expr {
        match self {
            Display::List => list,
            Display::Tuple => Expr::call(Expr::name("tuple"), vec![list]),
            Display::Set => Expr::call(Expr::name("set"), vec![list]),
        }
    }
}

fn is_dict_call(expr: &Expr) -> bool {
    expr.is_call_to("dict")
}

impl UnpackingGeneralizationsFixer {
    /// `dict(itertools.chain(v1.items(), v2.items(), ...))`
    fn chain(&mut self, values: Vec<Expr>) -> Expr {
        self.effects.require_import(ImportDecl::module("itertools"));
        let items = values
            .into_iter()
            .map(|v| Expr::call(Expr::attr(v, "items"), vec![]))
            .collect();
        Expr::call(
            Expr::name("dict"),
            vec![Expr::call(
                Expr::attr(Expr::name("itertools"), "chain"),
                items,
            )],
        )
    }

    fn normalize_display(&self, expr: Expr) -> Expr {
        // Store and Del contexts are unpacking targets, which keep their shape.
        let (kind, elts) = match expr {
            Expr::List {
                elts,
                ctx: ExprContext::Load,
            } => (Display::List, elts),
            Expr::Tuple {
                elts,
                ctx: ExprContext::Load,
            } => (Display::Tuple, elts),
            Expr::Set { elts } => (Display::Set, elts),
            other => return other,
        };
        if !has_interleaved_spread(&elts, Expr::is_starred) {
            return kind.rebuild(elts);
        }
        trace!(?kind, "flattening display spreads");
        match flatten(elts) {
            Flattened::Elements(elts) => kind.rebuild(elts),
            Flattened::Concat(list) => kind.from_list(list),
        }
    }

    fn normalize_dict(&mut self, items: Vec<DictItem>) -> Expr {
        if !has_interleaved_spread(&items, DictItem::is_spread) {
            return Expr::dict(items);
        }
        trace!("collapsing dict spreads");
        let values = items
            .into_iter()
            .map(|item| match item.key {
                Some(key) => Expr::dict(vec![DictItem::pair(key, item.value)]),
                None => item.value,
            })
            .collect();
        let mut values = collapse(values);
        match values.len() {
            1 => values.remove(0),
            _ => self.chain(values),
        }
    }

    fn normalize_call(&mut self, func: Expr, mut args: Vec<Expr>, keywords: Vec<Keyword>) -> Expr {
        if has_interleaved_spread(&args, Expr::is_starred) {
            trace!("flattening call argument spreads");
            args = match flatten(args) {
                Flattened::Elements(elts) => elts,
                Flattened::Concat(list) => vec![Expr::starred(list)],
            };
        }

        if !has_interleaved_spread(&keywords, Keyword::is_spread) {
            return Expr::call_kw(func, args, keywords);
        }
        trace!("collapsing keyword spreads");
        let values = keywords
            .into_iter()
            .map(|kw| match kw.arg {
                Some(name) => Expr::dict(vec![DictItem::pair(Expr::str(name), kw.value)]),
                None => kw.value,
            })
            .collect();
        let mut values = collapse(values);
        if values.len() == 1 {
            let value = values.remove(0);
            if func.is_load_of("dict") && args.is_empty() {
                return value;
            }
            return Expr::call_kw(func, args, vec![Keyword::spread(value)]);
        }
        let mapping = self.chain(values);
        Expr::call_kw(func, args, vec![Keyword::spread(mapping)])
    }

    fn normalize(&mut self, expr: Expr) -> Expr {
        let expr = match expr {
            Expr::Call {
                func,
                args,
                keywords,
            } => self.normalize_call(*func, args, keywords),
            Expr::Dict { items } => self.normalize_dict(items),
            seq @ (Expr::List { .. } | Expr::Tuple { .. } | Expr::Set { .. }) => {
                self.normalize_display(seq)
            }
            other => other,
        };
        collapse_dict_spread(expr)
    }
}

/// `dict(**X)` is `X` when `X` is a dict literal or another `dict(...)` call.
fn collapse_dict_spread(expr: Expr) -> Expr {
    match expr {
        Expr::Call {
            func,
            args,
            mut keywords,
        } if func.is_load_of("dict")
            && args.is_empty()
            && keywords.len() == 1
            && keywords[0].is_spread()
            && (is_dict_call(&keywords[0].value)
                || matches!(keywords[0].value, Expr::Dict { .. })) =>
        {
            keywords.remove(0).value
        }
        other => other,
    }
}

impl Transformer for UnpackingGeneralizationsFixer {
    fn visit_expr(&mut self, expr: Expr) -> FixResult<Expr> {
        let expr = walk_expr(self, expr)?;
        Ok(self.normalize(expr))
    }
}

impl Fixer for UnpackingGeneralizationsFixer {
    fn meta(&self) -> &'static FixerMeta {
        &UNPACKING_GENERALIZATIONS
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
