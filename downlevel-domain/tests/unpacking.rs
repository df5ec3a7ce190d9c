//! End-to-end behavior of the generalized unpacking normalizer.

use downlevel_domain::fixers::UnpackingGeneralizationsFixer;
use downlevel_pass_api::Fixer;
use downlevel_tree::{DictItem, Expr, Keyword, Module, Operator, Stmt};
use downlevel_types::{BuildConfig, ImportDecl};
use pretty_assertions::assert_eq;

fn n(i: i64) -> Expr {
    Expr::num(i)
}

fn star(e: Expr) -> Expr {
    Expr::starred(e)
}

fn list_of(e: Expr) -> Expr {
    Expr::call(Expr::name("list"), vec![e])
}

fn items_of(e: Expr) -> Expr {
    Expr::call(Expr::attr(e, "items"), vec![])
}

/// Runs the fixer over a module holding one expression statement.
fn fix(expr: Expr) -> (Expr, UnpackingGeneralizationsFixer) {
    let mut fixer = UnpackingGeneralizationsFixer::default();
    let out = fixer
        .fix(&BuildConfig::default(), Module::new(vec![Stmt::expr(expr)]))
        .unwrap();
    let [Stmt::Expr { value }] = <[Stmt; 1]>::try_from(out.body).unwrap() else {
        panic!("expected a single expression statement");
    };
    (value, fixer)
}

#[test]
fn single_trailing_spread_is_left_alone() {
    let cases = vec![
        Expr::call(Expr::name("f"), vec![n(1), star(Expr::name("a"))]),
        Expr::call_kw(
            Expr::name("f"),
            vec![],
            vec![Keyword::named("x", n(1)), Keyword::spread(Expr::name("m"))],
        ),
        Expr::call_kw(
            Expr::name("f"),
            vec![star(Expr::name("a"))],
            vec![Keyword::spread(Expr::name("m"))],
        ),
        Expr::list(vec![n(1), star(Expr::name("a"))]),
        Expr::dict(vec![
            DictItem::pair(Expr::str("x"), n(1)),
            DictItem::spread(Expr::name("m")),
        ]),
    ];
    for input in cases {
        let (out, fixer) = fix(input.clone());
        assert_eq!(out, input);
        assert!(fixer.effects().is_empty());
    }
}

#[test]
fn literal_spreads_flatten_into_the_display() {
    let input = Expr::list(vec![
        star(Expr::list(vec![n(1), n(2)])),
        n(3),
        star(Expr::list(vec![n(4), n(5)])),
    ]);
    let (out, fixer) = fix(input);
    assert_eq!(out, Expr::list(vec![n(1), n(2), n(3), n(4), n(5)]));
    assert!(fixer.effects().is_empty());
}

#[test]
fn mixed_dynamic_call_concatenates_into_one_spread() {
    let input = Expr::call(
        Expr::name("f"),
        vec![
            star(Expr::name("a")),
            star(Expr::list(vec![n(1), n(2)])),
            Expr::name("z"),
        ],
    );
    let (out, _) = fix(input);
    let concat = Expr::binop(
        list_of(Expr::name("a")),
        Operator::Add,
        Expr::list(vec![n(1), n(2), Expr::name("z")]),
    );
    assert_eq!(out, Expr::call(Expr::name("f"), vec![star(concat)]));
}

#[test]
fn call_keywords_are_kept_when_positionals_are_flattened() {
    let input = Expr::call_kw(
        Expr::name("f"),
        vec![star(Expr::name("a")), n(1)],
        vec![Keyword::named("k", n(2))],
    );
    let (out, _) = fix(input);
    let concat = Expr::binop(list_of(Expr::name("a")), Operator::Add, Expr::list(vec![n(1)]));
    assert_eq!(
        out,
        Expr::call_kw(
            Expr::name("f"),
            vec![star(concat)],
            vec![Keyword::named("k", n(2))],
        )
    );
}

#[test]
fn tuple_and_set_displays_wrap_the_concatenation() {
    let (tuple, _) = fix(Expr::tuple(vec![star(Expr::name("a")), n(1)]));
    let concat = Expr::binop(list_of(Expr::name("a")), Operator::Add, Expr::list(vec![n(1)]));
    assert_eq!(tuple, Expr::call(Expr::name("tuple"), vec![concat.clone()]));

    let (set, _) = fix(Expr::set(vec![star(Expr::name("a")), n(1)]));
    assert_eq!(set, Expr::call(Expr::name("set"), vec![concat]));
}

#[test]
fn dynamic_mapping_spreads_use_the_chain_helper() {
    let input = Expr::dict(vec![
        DictItem::spread(Expr::name("a")),
        DictItem::spread(Expr::name("b")),
        DictItem::pair(Expr::str("x"), n(1)),
    ]);
    let (out, fixer) = fix(input);
    let chain = Expr::call(
        Expr::attr(Expr::name("itertools"), "chain"),
        vec![
            items_of(Expr::name("a")),
            items_of(Expr::name("b")),
            items_of(Expr::dict(vec![DictItem::pair(Expr::str("x"), n(1))])),
        ],
    );
    assert_eq!(out, Expr::call(Expr::name("dict"), vec![chain]));
    assert!(
        fixer
            .effects()
            .required_imports
            .contains(&ImportDecl::module("itertools"))
    );
}

#[test]
fn literal_mapping_spreads_merge_without_import() {
    let input = Expr::dict(vec![
        DictItem::spread(Expr::dict(vec![DictItem::pair(Expr::str("a"), n(1))])),
        DictItem::spread(Expr::dict(vec![DictItem::pair(Expr::str("b"), n(2))])),
    ]);
    let (out, fixer) = fix(input);
    assert_eq!(
        out,
        Expr::dict(vec![
            DictItem::pair(Expr::str("a"), n(1)),
            DictItem::pair(Expr::str("b"), n(2)),
        ])
    );
    assert!(fixer.effects().is_empty());
}

#[test]
fn keyword_spreads_become_one_trailing_mapping() {
    let input = Expr::call_kw(
        Expr::name("f"),
        vec![],
        vec![
            Keyword::spread(Expr::name("a")),
            Keyword::named("x", n(1)),
        ],
    );
    let (out, fixer) = fix(input);
    let chain = Expr::call(
        Expr::attr(Expr::name("itertools"), "chain"),
        vec![
            items_of(Expr::name("a")),
            items_of(Expr::dict(vec![DictItem::pair(Expr::str("x"), n(1))])),
        ],
    );
    assert_eq!(
        out,
        Expr::call_kw(
            Expr::name("f"),
            vec![],
            vec![Keyword::spread(Expr::call(Expr::name("dict"), vec![chain]))],
        )
    );
    assert_eq!(fixer.effects().len(), 1);
}

#[test]
fn dict_call_over_literal_keywords_collapses_to_the_literal() {
    let input = Expr::call_kw(
        Expr::name("dict"),
        vec![],
        vec![
            Keyword::spread(Expr::dict(vec![DictItem::pair(Expr::str("a"), n(1))])),
            Keyword::named("b", n(2)),
        ],
    );
    let (out, fixer) = fix(input);
    assert_eq!(
        out,
        Expr::dict(vec![
            DictItem::pair(Expr::str("a"), n(1)),
            DictItem::pair(Expr::str("b"), n(2)),
        ])
    );
    assert!(fixer.effects().is_empty());
}

#[test]
fn unpacking_targets_keep_their_shape() {
    let target = Expr::Tuple {
        elts: vec![star(Expr::store("a")), Expr::store("b")],
        ctx: downlevel_tree::ExprContext::Store,
    };
    let stmt = Stmt::assign(target, Expr::name("xs"));
    let mut fixer = UnpackingGeneralizationsFixer::default();
    let out = fixer
        .fix(&BuildConfig::default(), Module::new(vec![stmt.clone()]))
        .unwrap();
    assert_eq!(out.body, vec![stmt]);
}

#[test]
fn nested_operands_are_normalized_first() {
    // f(*[*[1], 2], *a)
    let inner = Expr::list(vec![star(Expr::list(vec![n(1)])), n(2)]);
    let input = Expr::call(Expr::name("f"), vec![star(inner), star(Expr::name("a"))]);
    let (out, _) = fix(input);
    let concat = Expr::binop(
        Expr::list(vec![n(1), n(2)]),
        Operator::Add,
        list_of(Expr::name("a")),
    );
    assert_eq!(out, Expr::call(Expr::name("f"), vec![star(concat)]));
}

#[test]
fn trailing_display_spreads_are_kept_as_written() {
    let cases = vec![
        Expr::tuple(vec![n(1), star(Expr::name("a"))]),
        Expr::set(vec![star(Expr::name("a"))]),
        Expr::dict(vec![DictItem::spread(Expr::name("m"))]),
    ];
    for input in cases {
        let (out, fixer) = fix(input.clone());
        assert_eq!(out, input);
        assert!(fixer.effects().is_empty());
    }
}
