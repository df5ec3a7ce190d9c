//! Property tests: the unpacking normalizer reaches a fixed point in one run.

use downlevel_domain::fixers::UnpackingGeneralizationsFixer;
use downlevel_pass_api::Fixer;
use downlevel_tree::{DictItem, Expr, Keyword, Module, Stmt};
use downlevel_types::BuildConfig;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (0i64..100).prop_map(Expr::num),
        prop::sample::select(vec!["a", "b", "xs"]).prop_map(Expr::name),
    ]
}

fn element() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::starred),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|e| Expr::starred(Expr::list(e))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Expr::list),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Expr::tuple),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|args| Expr::call(Expr::name("f"), args)),
            prop::collection::vec((any::<bool>(), inner), 0..4).prop_map(|items| {
                Expr::dict(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, (spread, value))| {
                            if spread {
                                DictItem::spread(value)
                            } else {
                                DictItem::pair(Expr::str(format!("k{i}")), value)
                            }
                        })
                        .collect(),
                )
            }),
        ]
    })
}

fn call_with_keywords() -> impl Strategy<Value = Expr> {
    (
        prop::collection::vec(element(), 0..4),
        prop::collection::vec((any::<bool>(), leaf()), 0..4),
    )
        .prop_map(|(args, kws)| {
            let keywords = kws
                .into_iter()
                .enumerate()
                .map(|(i, (spread, value))| {
                    if spread {
                        Keyword::spread(value)
                    } else {
                        Keyword::named(format!("k{i}"), value)
                    }
                })
                .collect();
            Expr::call_kw(Expr::name("g"), args, keywords)
        })
}

fn run(module: Module) -> Module {
    UnpackingGeneralizationsFixer::default()
        .fix(&BuildConfig::default(), module)
        .unwrap()
}

/// True when no spread anywhere in the tree is followed by a sibling.
fn only_trailing_spreads(expr: &Expr) -> bool {
    fn trailing<T>(items: &[T], is_spread: impl Fn(&T) -> bool) -> bool {
        !items.iter().rev().skip(1).any(is_spread)
    }
    let own = match expr {
        Expr::List { elts, .. } | Expr::Tuple { elts, .. } | Expr::Set { elts } => {
            trailing(elts, Expr::is_starred)
        }
        Expr::Dict { items } => trailing(items, DictItem::is_spread),
        Expr::Call { args, keywords, .. } => {
            trailing(args, Expr::is_starred) && trailing(keywords, Keyword::is_spread)
        }
        _ => true,
    };
    own && children(expr).iter().all(|c| only_trailing_spreads(c))
}

fn children(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::List { elts, .. } | Expr::Tuple { elts, .. } | Expr::Set { elts } => {
            elts.iter().collect()
        }
        Expr::Dict { items } => items
            .iter()
            .flat_map(|i| i.key.iter().chain(std::iter::once(&i.value)))
            .collect(),
        Expr::Call {
            func,
            args,
            keywords,
        } => std::iter::once(func.as_ref())
            .chain(args)
            .chain(keywords.iter().map(|k| &k.value))
            .collect(),
        Expr::Starred { value, .. } | Expr::Attribute { value, .. } => vec![value.as_ref()],
        Expr::BinOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        _ => Vec::new(),
    }
}

proptest! {
    #[test]
    fn second_run_changes_nothing(
        exprs in prop::collection::vec(prop_oneof![element(), call_with_keywords()], 1..4)
    ) {
        let module = Module::new(exprs.into_iter().map(Stmt::expr).collect());
        let once = run(module);
        let twice = run(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_has_only_trailing_spreads(expr in prop_oneof![element(), call_with_keywords()]) {
        let out = run(Module::new(vec![Stmt::expr(expr)]));
        let Stmt::Expr { value } = &out.body[0] else {
            panic!("expected expression statement");
        };
        prop_assert!(only_trailing_spreads(value));
    }
}
