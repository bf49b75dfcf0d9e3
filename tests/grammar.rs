//! Tests for grammar plugins

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use esparse::ast::{tag, Expression, Literal, LiteralValue, Statement};
use esparse::{parse_with_grammar, EcmaVersion, Grammar, Options};

#[test]
fn test_plugin_wraps_statement_rule() {
    let count = Rc::new(RefCell::new(0usize));
    let seen = Rc::clone(&count);
    let grammar = Grammar::base().extend(|mut g| {
        let inherited = Rc::clone(&g.statement);
        g.statement = Rc::new(move |g, p| {
            *seen.borrow_mut() += 1;
            inherited(g, p)
        });
        g
    });
    let prog = parse_with_grammar(
        "a; if (b) { c; }",
        Options::new(EcmaVersion::Latest),
        Rc::new(grammar),
    )
    .unwrap();
    assert_eq!(prog.body.len(), 2);
    // Statements nested in the `if` also go through the rule.
    assert_eq!(*count.borrow(), 4);
}

#[test]
fn test_plugin_rewrites_atoms() {
    let grammar = Grammar::base().extend(|mut g| {
        let inherited = Rc::clone(&g.expr_atom);
        g.expr_atom = Rc::new(move |g, p| {
            let expr = inherited(g, p)?;
            Ok(match expr {
                Expression::Identifier(id) if id.name == "answer" => {
                    Expression::Literal(Literal {
                        node_type: tag::Literal,
                        span: id.span,
                        value: LiteralValue::Num(42.0),
                        raw: "42".to_string(),
                        regex: None,
                        bigint: None,
                    })
                }
                other => other,
            })
        });
        g
    });
    let prog = parse_with_grammar(
        "x + answer;",
        Options::new(EcmaVersion::Latest),
        Rc::new(grammar),
    )
    .unwrap();
    let Statement::ExpressionStatement(es) = &prog.body[0] else {
        panic!("expected expression statement");
    };
    let Expression::BinaryExpression(add) = es.expression.as_ref() else {
        panic!("expected binary expression");
    };
    assert!(matches!(
        add.right.as_ref(),
        Expression::Literal(lit) if matches!(lit.value, LiteralValue::Num(n) if n == 42.0)
    ));
}

#[test]
fn test_plugins_chain_like_super_calls() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::clone(&order);
    let second = Rc::clone(&order);
    let grammar = Grammar::base()
        .extend(|mut g| {
            let inherited = Rc::clone(&g.statement);
            g.statement = Rc::new(move |g, p| {
                first.borrow_mut().push("inner");
                inherited(g, p)
            });
            g
        })
        .extend(|mut g| {
            let inherited = Rc::clone(&g.statement);
            g.statement = Rc::new(move |g, p| {
                second.borrow_mut().push("outer");
                inherited(g, p)
            });
            g
        });
    parse_with_grammar("a;", Options::new(EcmaVersion::Latest), Rc::new(grammar)).unwrap();
    // The most recently applied plugin runs first and defers inward.
    assert_eq!(*order.borrow(), ["outer", "inner"]);
}
