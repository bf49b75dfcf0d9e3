//! Tests for the parser
//!
//! These tests drive the public `parse` API and inspect the resulting
//! tree, covering statement forms, expression precedence, version
//! gating, and the error cases the grammar is required to reject.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use esparse::ast::{
    Expression, ExportDefaultKind, ForTarget, FunctionBody, ImportSpecifierItem, LiteralValue,
    ClassElement, MethodKind, ObjectMember, Pattern, Program, PropertyValue, Statement, VarKind,
};
use esparse::{parse, EcmaVersion, Options, SyntaxError};

#[allow(clippy::unwrap_used)]
fn parse_with(source: &str, options: Options) -> Program {
    parse(source, options).unwrap()
}

#[allow(clippy::unwrap_used)]
fn parse_latest(source: &str) -> Program {
    parse_with(source, Options::new(EcmaVersion::Latest))
}

#[allow(clippy::unwrap_used)]
fn parse_err(source: &str, ecma: EcmaVersion) -> SyntaxError {
    parse(source, Options::new(ecma)).unwrap_err()
}

fn expression(program: &Program, index: usize) -> &Expression {
    match program.body.get(index) {
        Some(Statement::ExpressionStatement(es)) => es.expression.as_ref(),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_binary_precedence() {
    // Multiplication binds tighter than addition.
    let prog = parse_with("1+2*3", Options::new(EcmaVersion::Es2020));
    let Expression::BinaryExpression(add) = expression(&prog, 0) else {
        panic!("expected binary expression at the root");
    };
    assert_eq!(add.operator, "+");
    assert_eq!(add.span.start, 0);
    assert_eq!(add.span.end, 5);
    let Expression::BinaryExpression(mul) = add.right.as_ref() else {
        panic!("expected * as the right operand");
    };
    assert_eq!(mul.operator, "*");
}

#[test]
fn test_let_declaration_gated_below_es2015() {
    let err = parse("let x = 1", Options::new(EcmaVersion::Es5)).unwrap_err();
    assert!(err.message.contains("Unexpected token"), "{}", err.message);
    let prog = parse_latest("let x = 1");
    let Statement::VariableDeclaration(decl) = &prog.body[0] else {
        panic!("expected variable declaration");
    };
    assert_eq!(decl.kind, VarKind::Let);
}

#[test]
fn test_automatic_semicolon_insertion() {
    let prog = parse_latest("a\nb");
    assert_eq!(prog.body.len(), 2);
    assert!(matches!(&prog.body[0], Statement::ExpressionStatement(_)));
    assert!(matches!(&prog.body[1], Statement::ExpressionStatement(_)));
}

#[test]
fn test_on_inserted_semicolon_hook() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let options = Options::new(EcmaVersion::Latest)
        .with_on_inserted_semicolon(Box::new(move |pos, _loc| sink.borrow_mut().push(pos)));
    parse("a\nb", options).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 3]);
}

#[test]
fn test_comment_hook_and_literal_position() {
    let comments = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&comments);
    let options = Options::new(EcmaVersion::Latest).with_on_comment(Box::new(move |c| {
        sink.borrow_mut().push((c.block, c.text.clone(), c.start, c.end));
    }));
    let prog = parse("/* c */ 42", options).unwrap();
    let collected = comments.borrow();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0], (true, " c ".to_string(), 0, 7));
    let Expression::Literal(lit) = expression(&prog, 0) else {
        panic!("expected literal");
    };
    assert_eq!(lit.span.start, 8);
}

#[test]
fn test_program_span_covers_whole_source() {
    let prog = parse_latest("  1;  ");
    assert_eq!(prog.span.start, 0);
    assert_eq!(prog.span.end, 6);
}

// ============ VERSION GATES ============

#[test]
fn test_exponentiation_gate() {
    assert!(parse("a ** b", Options::new(EcmaVersion::Es2015)).is_err());
    let prog = parse_with("a ** b ** c", Options::new(EcmaVersion::Es2016));
    // Right-associative.
    let Expression::BinaryExpression(outer) = expression(&prog, 0) else {
        panic!("expected **");
    };
    assert!(matches!(outer.left.as_ref(), Expression::Identifier(id) if id.name == "a"));
    assert!(matches!(outer.right.as_ref(), Expression::BinaryExpression(_)));
}

#[test]
fn test_nullish_and_optional_chaining_gates() {
    assert!(parse("a ?? b", Options::new(EcmaVersion::Es2019)).is_err());
    assert!(parse("a ?? b", Options::new(EcmaVersion::Es2020)).is_ok());
    assert!(parse("a?.b", Options::new(EcmaVersion::Es2019)).is_err());
    let prog = parse_with("a?.b.c", Options::new(EcmaVersion::Es2020));
    assert!(matches!(expression(&prog, 0), Expression::ChainExpression(_)));
}

#[test]
fn test_coalesce_mixing_requires_parens() {
    // Both orders are rejected without parentheses.
    let err = parse_err("a ?? b || c", EcmaVersion::Latest);
    assert!(err.message.contains("cannot be mixed"), "{}", err.message);
    let err = parse_err("a ?? b && c", EcmaVersion::Latest);
    assert!(err.message.contains("cannot be mixed"), "{}", err.message);
    let err = parse_err("a || b ?? c", EcmaVersion::Latest);
    assert!(err.message.contains("cannot be mixed"), "{}", err.message);
    assert!(parse("(a ?? b) || c", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("a ?? (b || c)", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("a ?? b ?? c", Options::new(EcmaVersion::Latest)).is_ok());
}

#[test]
fn test_trailing_comma_in_calls() {
    assert!(parse("f(a,)", Options::new(EcmaVersion::Es2016)).is_err());
    assert!(parse("f(a,)", Options::new(EcmaVersion::Es2017)).is_ok());
}

#[test]
fn test_on_trailing_comma_hook() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let options = Options::new(EcmaVersion::Latest)
        .with_on_trailing_comma(Box::new(move |pos, _loc| sink.borrow_mut().push(pos)));
    parse("f(a,)", options).unwrap();
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn test_object_spread_gate() {
    assert!(parse("({...a})", Options::new(EcmaVersion::Es2017)).is_err());
    assert!(parse("({...a})", Options::new(EcmaVersion::Es2018)).is_ok());
}

#[test]
fn test_optional_catch_binding_gate() {
    assert!(parse("try {} catch {}", Options::new(EcmaVersion::Es2018)).is_err());
    let prog = parse_with("try {} catch {}", Options::new(EcmaVersion::Es2019));
    let Statement::TryStatement(t) = &prog.body[0] else {
        panic!("expected try statement");
    };
    assert!(t.handler.as_ref().is_some_and(|h| h.param.is_none()));
}

#[test]
fn test_logical_assignment_gate() {
    assert!(parse("a ||= b", Options::new(EcmaVersion::Es2020)).is_err());
    let prog = parse_with("a ||= b", Options::new(EcmaVersion::Es2021));
    let Expression::AssignmentExpression(assign) = expression(&prog, 0) else {
        panic!("expected assignment");
    };
    assert_eq!(assign.operator, "||=");
}

#[test]
fn test_bigint_literal() {
    assert!(parse("10n", Options::new(EcmaVersion::Es2019)).is_err());
    let prog = parse_with("10n", Options::new(EcmaVersion::Es2020));
    let Expression::Literal(lit) = expression(&prog, 0) else {
        panic!("expected literal");
    };
    assert_eq!(lit.bigint.as_deref(), Some("10"));
    assert_eq!(lit.raw, "10n");
}

// ============ FUNCTIONS & ARROWS ============

#[test]
fn test_function_declaration() {
    let prog = parse_latest("function add(a, b) { return a + b; }");
    let Statement::FunctionDeclaration(f) = &prog.body[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(f.id.as_ref().map(|id| id.name.as_str()), Some("add"));
    assert_eq!(f.params.len(), 2);
    assert!(!f.generator && !f.is_async);
}

#[test]
fn test_arrow_concise_body() {
    let prog = parse_latest("const f = x => x + 1;");
    let Statement::VariableDeclaration(decl) = &prog.body[0] else {
        panic!("expected declaration");
    };
    let init = decl.declarations[0].init.as_ref().unwrap();
    let Expression::ArrowFunctionExpression(f) = init.as_ref() else {
        panic!("expected arrow");
    };
    assert!(f.expression);
    assert!(matches!(&f.body, FunctionBody::Expression(_)));
}

#[test]
fn test_arrow_with_defaults_and_rest() {
    let prog = parse_latest("(a, b = 1, ...rest) => a;");
    let Expression::ArrowFunctionExpression(f) = expression(&prog, 0) else {
        panic!("expected arrow");
    };
    assert_eq!(f.params.len(), 3);
    assert!(matches!(&f.params[1], Pattern::AssignmentPattern(_)));
    assert!(matches!(&f.params[2], Pattern::RestElement(_)));
}

#[test]
fn test_async_arrow_vs_async_call() {
    let prog = parse_latest("async (a) => a; async(a);");
    assert!(matches!(
        expression(&prog, 0),
        Expression::ArrowFunctionExpression(f) if f.is_async
    ));
    assert!(matches!(expression(&prog, 1), Expression::CallExpression(_)));
}

#[test]
fn test_async_identifier_arrow() {
    let prog = parse_latest("async x => x;");
    assert!(matches!(
        expression(&prog, 0),
        Expression::ArrowFunctionExpression(f) if f.is_async && f.params.len() == 1
    ));
}

#[test]
fn test_await_only_in_async_functions() {
    assert!(parse("async function f() { await g(); }", Options::new(EcmaVersion::Latest)).is_ok());
    // In a plain function `await` is an identifier.
    let prog = parse_latest("function f(await) { return await; }");
    assert_eq!(prog.body.len(), 1);
}

#[test]
fn test_generator_yield() {
    let prog = parse_latest("function* g() { yield 1; yield* h(); yield; }");
    let Statement::FunctionDeclaration(f) = &prog.body[0] else {
        panic!("expected generator");
    };
    assert!(f.generator);
    let FunctionBody::Block(block) = &f.body else {
        panic!("expected block body");
    };
    assert_eq!(block.body.len(), 3);
}

#[test]
fn test_async_generator_gated_below_es2018() {
    let src = "async function* g() { yield 1; }";
    assert!(parse(src, Options::new(EcmaVersion::Es2017)).is_err());
    let prog = parse_with(src, Options::new(EcmaVersion::Es2018));
    let Statement::FunctionDeclaration(f) = &prog.body[0] else {
        panic!("expected function declaration");
    };
    assert!(f.is_async && f.generator);
}

#[test]
fn test_yield_as_identifier_rejected_in_generator() {
    let err = parse_err("function* g() { var yield = 1; }", EcmaVersion::Latest);
    assert!(err.message.contains("yield"), "{}", err.message);
}

#[test]
fn test_strict_directive_with_non_simple_params() {
    let err = parse_err("function f(a = 1) { 'use strict'; }", EcmaVersion::Latest);
    assert!(err.message.contains("non-simple"), "{}", err.message);
}

#[test]
fn test_return_outside_function() {
    assert!(parse("return 1", Options::new(EcmaVersion::Latest)).is_err());
    let mut options = Options::new(EcmaVersion::Latest);
    options.allow_return_outside_function = true;
    assert!(parse("return 1", options).is_ok());
}

// ============ CLASSES ============

#[test]
fn test_class_methods_and_accessors() {
    let prog = parse_latest(
        "class A extends B { constructor() { super(); } get x() { return 1; } set x(v) {} static m() {} *gen() {} async go() {} }",
    );
    let Statement::ClassDeclaration(class) = &prog.body[0] else {
        panic!("expected class");
    };
    assert!(class.super_class.is_some());
    let kinds: Vec<_> = class
        .body
        .body
        .iter()
        .map(|el| match el {
            ClassElement::Method(m) => m.kind,
            other => panic!("expected methods, got {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            MethodKind::Constructor,
            MethodKind::Get,
            MethodKind::Set,
            MethodKind::Method,
            MethodKind::Method,
            MethodKind::Method,
        ]
    );
}

#[test]
fn test_duplicate_constructor() {
    let err = parse_err("class A { constructor() {} constructor() {} }", EcmaVersion::Latest);
    assert!(err.message.contains("Duplicate constructor"), "{}", err.message);
}

#[test]
fn test_class_fields_and_static_block() {
    assert!(parse("class A { x = 1; }", Options::new(EcmaVersion::Es2021)).is_err());
    let prog = parse_with(
        "class A { x = 1; static y; #z = 2; static { init(); } }",
        Options::new(EcmaVersion::Es2022),
    );
    let Statement::ClassDeclaration(class) = &prog.body[0] else {
        panic!("expected class");
    };
    assert_eq!(class.body.body.len(), 4);
    assert!(matches!(&class.body.body[3], ClassElement::StaticBlock(_)));
}

#[test]
fn test_private_member_access_and_in_check() {
    let prog = parse_latest("class A { #x; has(o) { return #x in o && this.#x; } }");
    assert_eq!(prog.body.len(), 1);
    let err = parse_err("class A { m() { delete this.#x; } }", EcmaVersion::Latest);
    assert!(err.message.contains("Private fields"), "{}", err.message);
}

#[test]
fn test_methods_named_like_modifiers() {
    let prog = parse_latest("class A { static() {} get() {} set() {} async() {} }");
    let Statement::ClassDeclaration(class) = &prog.body[0] else {
        panic!("expected class");
    };
    assert_eq!(class.body.body.len(), 4);
    for el in &class.body.body {
        let ClassElement::Method(m) = el else {
            panic!("expected method");
        };
        assert_eq!(m.kind, MethodKind::Method);
    }
}

// ============ OBJECTS & DESTRUCTURING ============

#[test]
fn test_object_literal_forms() {
    let prog = parse_latest("({ a: 1, b, c() {}, get d() { return 1; }, ['e']: 2, ...rest });");
    let Expression::ObjectExpression(obj) = expression(&prog, 0) else {
        panic!("expected object");
    };
    assert_eq!(obj.properties.len(), 6);
    assert!(matches!(&obj.properties[5], ObjectMember::Spread(_)));
}

#[test]
fn test_proto_redefinition() {
    let err = parse_err("({ __proto__: a, __proto__: b });", EcmaVersion::Latest);
    assert!(err.message.contains("__proto__"), "{}", err.message);
    // Shorthand does not define the prototype.
    assert!(parse("({ __proto__, __proto__: a });", Options::new(EcmaVersion::Latest)).is_ok());
}

#[test]
fn test_destructuring_declaration() {
    let prog = parse_latest("var [a, , {b = 1, ...rest}] = c;");
    let Statement::VariableDeclaration(decl) = &prog.body[0] else {
        panic!("expected declaration");
    };
    let Pattern::ArrayPattern(arr) = &decl.declarations[0].id else {
        panic!("expected array pattern");
    };
    assert_eq!(arr.elements.len(), 3);
    assert!(arr.elements[1].is_none());
    assert!(matches!(arr.elements[2], Some(Pattern::ObjectPattern(_))));
}

#[test]
fn test_destructuring_assignment() {
    let prog = parse_latest("({x = 1, y: [z]} = obj);");
    let Expression::AssignmentExpression(assign) = expression(&prog, 0) else {
        panic!("expected assignment");
    };
    assert!(matches!(assign.left.as_ref(), Pattern::ObjectPattern(_)));
}

#[test]
fn test_shorthand_assign_outside_pattern_rejected() {
    let err = parse_err("({x = 1});", EcmaVersion::Latest);
    assert!(err.message.contains("destructuring"), "{}", err.message);
}

#[test]
fn test_member_target_in_assignment_pattern() {
    // Member expressions are valid assignment targets, not bindings.
    assert!(parse("[a.b] = c;", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("var [a.b] = c;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_getter_setter_arity() {
    assert!(parse("({ get x(a) {} });", Options::new(EcmaVersion::Latest)).is_err());
    assert!(parse("({ set x() {} });", Options::new(EcmaVersion::Latest)).is_err());
}

// ============ LOOPS ============

#[test]
fn test_for_classic() {
    let prog = parse_latest("for (var i = 0; i < 10; i++) f(i);");
    assert!(matches!(&prog.body[0], Statement::ForStatement(_)));
}

#[test]
fn test_for_in_and_of() {
    let prog = parse_latest("for (const k in o) f(k);\nfor (const v of xs) f(v);");
    assert!(matches!(&prog.body[0], Statement::ForInStatement(_)));
    let Statement::ForOfStatement(fo) = &prog.body[1] else {
        panic!("expected for-of");
    };
    assert!(!fo.is_await);
    assert!(matches!(&fo.left, ForTarget::Declaration(d) if d.kind == VarKind::Const));
}

#[test]
fn test_for_await_of() {
    let prog = parse_latest("async function f() { for await (const x of xs) g(x); }");
    let Statement::FunctionDeclaration(f) = &prog.body[0] else {
        panic!("expected function");
    };
    let FunctionBody::Block(block) = &f.body else {
        panic!("expected block");
    };
    assert!(matches!(&block.body[0], Statement::ForOfStatement(fo) if fo.is_await));
    assert!(parse("for await (const x of xs) g(x);", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_expression_for_in_target() {
    let prog = parse_latest("for (a.b in c) d();");
    let Statement::ForInStatement(fi) = &prog.body[0] else {
        panic!("expected for-in");
    };
    assert!(matches!(&fi.left, ForTarget::Pattern(Pattern::Member(_))));
}

#[test]
fn test_in_operator_suppressed_in_for_head() {
    // `in` inside the init must not terminate it once parenthesized,
    // and is an operator again inside brackets.
    assert!(parse("for (var x = ('a' in b); x; ) f();", Options::new(EcmaVersion::Latest)).is_ok());
}

#[test]
fn test_const_requires_initializer() {
    assert!(parse("const x;", Options::new(EcmaVersion::Latest)).is_err());
    assert!(parse("for (const x of xs) f(x);", Options::new(EcmaVersion::Latest)).is_ok());
}

// ============ MODULES ============

#[test]
fn test_import_forms() {
    let options = || Options::new(EcmaVersion::Latest).module();
    let prog = parse_with(
        "import d, { a, b as c, \"x y\" as z } from 'mod';\nimport * as ns from 'mod';\nimport 'side-effect';",
        options(),
    );
    let Statement::ImportDeclaration(first) = &prog.body[0] else {
        panic!("expected import");
    };
    assert_eq!(first.specifiers.len(), 4);
    assert!(matches!(&first.specifiers[0], ImportSpecifierItem::Default(_)));
    let Statement::ImportDeclaration(second) = &prog.body[1] else {
        panic!("expected import");
    };
    assert!(matches!(&second.specifiers[0], ImportSpecifierItem::Namespace(_)));
    let Statement::ImportDeclaration(third) = &prog.body[2] else {
        panic!("expected import");
    };
    assert!(third.specifiers.is_empty());
}

#[test]
fn test_import_requires_module() {
    let err = parse_err("import x from 'mod';", EcmaVersion::Latest);
    assert!(err.message.contains("sourceType: module"), "{}", err.message);
}

#[test]
fn test_export_forms() {
    let prog = parse_with(
        "export const a = 1;\nexport default function () {}\nexport { a, a as b };\nexport * as ns from 'mod';",
        Options::new(EcmaVersion::Latest).module(),
    );
    assert!(matches!(&prog.body[0], Statement::ExportNamedDeclaration(e) if e.declaration.is_some()));
    let Statement::ExportDefaultDeclaration(d) = &prog.body[1] else {
        panic!("expected export default");
    };
    assert!(matches!(&d.declaration, ExportDefaultKind::Function(_)));
    assert!(matches!(&prog.body[2], Statement::ExportNamedDeclaration(e) if e.specifiers.len() == 2));
    assert!(matches!(&prog.body[3], Statement::ExportAllDeclaration(e) if e.exported.is_some()));
}

#[test]
fn test_dynamic_import_and_import_meta() {
    // Dynamic import works in scripts.
    let prog = parse_with("import('mod');", Options::new(EcmaVersion::Es2020));
    assert!(matches!(expression(&prog, 0), Expression::ImportExpression(_)));
    let prog = parse_with("import.meta.url;", Options::new(EcmaVersion::Latest).module());
    assert_eq!(prog.body.len(), 1);
    assert!(parse("import.meta;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_module_code_is_strict() {
    let err = parse("with (a) {}", Options::new(EcmaVersion::Latest).module()).unwrap_err();
    assert!(err.message.contains("'with' in strict mode"), "{}", err.message);
}

// ============ OTHER EXPRESSIONS ============

#[test]
fn test_new_expressions() {
    let prog = parse_latest("new A; new A(); new a.b.C(1); new (f())();");
    assert_eq!(prog.body.len(), 4);
    let Expression::NewExpression(n) = expression(&prog, 2) else {
        panic!("expected new");
    };
    assert_eq!(n.arguments.len(), 1);
    assert!(matches!(n.callee.as_ref(), Expression::MemberExpression(_)));
}

#[test]
fn test_new_target() {
    assert!(parse("function f() { return new.target; }", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("new.target;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_template_literals() {
    let prog = parse_latest("`a${b + 1}c${d}`;");
    let Expression::TemplateLiteral(tpl) = expression(&prog, 0) else {
        panic!("expected template");
    };
    assert_eq!(tpl.quasis.len(), 3);
    assert_eq!(tpl.expressions.len(), 2);
    assert!(tpl.quasis[2].tail);
    assert_eq!(tpl.quasis[0].value.cooked.as_deref(), Some("a"));
}

#[test]
fn test_tagged_template_tolerates_bad_escape() {
    // Invalid escapes cook to None under a tag but are errors when untagged.
    let prog = parse_latest("tag`\\u`;");
    let Expression::TaggedTemplateExpression(t) = expression(&prog, 0) else {
        panic!("expected tagged template");
    };
    assert!(t.quasi.quasis[0].value.cooked.is_none());
    assert!(parse("`\\u`;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_regex_literal() {
    let prog = parse_latest("x = a / b; y = /ab+c/gi;");
    let Expression::AssignmentExpression(assign) = expression(&prog, 1) else {
        panic!("expected assignment");
    };
    let Expression::Literal(lit) = assign.right.as_ref() else {
        panic!("expected regex literal");
    };
    let regex = lit.regex.as_ref().unwrap();
    assert_eq!(regex.pattern, "ab+c");
    assert_eq!(regex.flags, "gi");
    assert!(matches!(lit.value, LiteralValue::Null));
}

#[test]
fn test_sequence_and_conditional() {
    let prog = parse_latest("a, b ? c : d, e;");
    let Expression::SequenceExpression(seq) = expression(&prog, 0) else {
        panic!("expected sequence");
    };
    assert_eq!(seq.expressions.len(), 3);
    assert!(matches!(&seq.expressions[1], Expression::ConditionalExpression(_)));
}

#[test]
fn test_update_target_validation() {
    assert!(parse("a++; ++a.b;", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("1++;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_unary_before_exponent_rejected() {
    let err = parse_err("-a ** 2", EcmaVersion::Latest);
    assert!(err.message.contains("exponentiation"), "{}", err.message);
    assert!(parse("(-a) ** 2", Options::new(EcmaVersion::Latest)).is_ok());
}

#[test]
fn test_postfix_update_blocked_by_newline() {
    // ASI separates `a` and `++b`.
    let prog = parse_latest("a\n++b");
    assert_eq!(prog.body.len(), 2);
    assert!(matches!(expression(&prog, 1), Expression::UpdateExpression(u) if u.prefix));
}

#[test]
fn test_shorthand_property_value() {
    let prog = parse_latest("({a, b: c});");
    let Expression::ObjectExpression(obj) = expression(&prog, 0) else {
        panic!("expected object");
    };
    let ObjectMember::Property(p) = &obj.properties[0] else {
        panic!("expected property");
    };
    assert!(p.shorthand);
    assert!(matches!(&p.value, PropertyValue::Expression(e)
        if matches!(e.as_ref(), Expression::Identifier(id) if id.name == "a")));
}

#[test]
fn test_error_reports_offset_and_location() {
    let err = parse_err("var x = ;", EcmaVersion::Latest);
    assert_eq!(err.pos, 8);
    let loc = err.loc.unwrap();
    assert_eq!(loc.line, 1);
    assert_eq!(loc.column, 8);
}

#[test]
fn test_hash_bang() {
    assert!(parse("#!/usr/bin/env node\n1;", Options::new(EcmaVersion::Es2023)).is_ok());
    assert!(parse("#!/usr/bin/env node\n1;", Options::new(EcmaVersion::Es2022)).is_err());
    let mut options = Options::new(EcmaVersion::Es2022);
    options.allow_hash_bang = Some(true);
    assert!(parse("#!/usr/bin/env node\n1;", options).is_ok());
}

#[test]
fn test_reserved_word_handling() {
    assert!(parse("var enum = 1;", Options::new(EcmaVersion::Latest)).is_err());
    // `static` is only reserved in strict mode.
    assert!(parse("var static = 1;", Options::new(EcmaVersion::Latest)).is_ok());
    assert!(parse("'use strict'; var static = 1;", Options::new(EcmaVersion::Latest)).is_err());
}

#[test]
fn test_keyword_property_names() {
    assert!(parse("a.new; a.class; ({ if: 1, for: 2 });", Options::new(EcmaVersion::Latest)).is_ok());
}

#[test]
fn test_parse_expression_at() {
    let expr = esparse::parse_expression_at("var x = a + b;", 8, Options::new(EcmaVersion::Latest))
        .unwrap();
    let Expression::BinaryExpression(add) = expr else {
        panic!("expected binary expression");
    };
    assert_eq!(add.span.start, 8);
    assert_eq!(add.span.end, 13);
}
