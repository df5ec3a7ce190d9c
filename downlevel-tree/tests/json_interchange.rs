//! The JSON form external parsers hand to the pipeline.

use downlevel_tree::{
    Constant, DictItem, Expr, ExprContext, Keyword, Module, Stmt, walk,
};
use pretty_assertions::assert_eq;

#[test]
fn reads_minimal_module() {
    let module: Module = serde_json::from_str(
        r#"{
            "body": [
                { "node": "Expr", "value": {
                    "node": "Call",
                    "func": { "node": "Name", "id": "f" },
                    "args": [
                        { "node": "Starred", "value": { "node": "Name", "id": "a" } },
                        { "node": "Constant", "value": { "kind": "num", "value": "1" } }
                    ],
                    "keywords": [ { "value": { "node": "Name", "id": "kw" } } ]
                } }
            ]
        }"#,
    )
    .unwrap();

    let expected = Module::new(vec![Stmt::expr(Expr::call_kw(
        Expr::name("f"),
        vec![Expr::starred(Expr::name("a")), Expr::num(1)],
        vec![Keyword::spread(Expr::name("kw"))],
    ))]);
    assert_eq!(module, expected);
}

#[test]
fn defaults_context_and_optional_fields() {
    let module: Module = serde_json::from_str(
        r#"{ "body": [
            { "node": "Assign",
              "targets": [ { "node": "Name", "id": "x", "ctx": "Store" } ],
              "value": { "node": "Dict", "items": [
                  { "value": { "node": "Name", "id": "base" } },
                  { "key": { "node": "Constant", "value": { "kind": "str", "value": "k" } },
                    "value": { "node": "Constant", "value": { "kind": "none" } } }
              ] } },
            { "node": "Pass" }
        ] }"#,
    )
    .unwrap();

    let Stmt::Assign { targets, value } = &module.body[0] else {
        panic!("expected assignment");
    };
    assert_eq!(
        targets[0],
        Expr::Name {
            id: "x".into(),
            ctx: ExprContext::Store
        }
    );
    assert_eq!(
        value,
        &Expr::dict(vec![
            DictItem::spread(Expr::name("base")),
            DictItem::pair(Expr::str("k"), Expr::constant(Constant::None)),
        ])
    );
    assert_eq!(module.body[1], Stmt::Pass);
}

#[test]
fn serialization_is_stable() {
    let module = Module::new(vec![Stmt::assign(
        Expr::store("x"),
        Expr::list(vec![Expr::num(1), Expr::str("two")]),
    )]);
    let json = serde_json::to_string(&module).unwrap();
    let back: Module = serde_json::from_str(&json).unwrap();
    assert_eq!(back, module);
    assert_eq!(walk(&back).count(), 6);
}
