//! Tests for ESTree JSON serialization
//!
//! The tree must serialize to the ESTree interchange shape: `type`
//! discriminators, flat `start`/`end`, optional `loc`/`range`, and the
//! renamed keyword fields (`async`, `await`, `static`).

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use serde_json::{json, Value};

use esparse::{parse, EcmaVersion, Options};

fn to_json(source: &str, options: Options) -> Value {
    serde_json::to_value(parse(source, options).unwrap()).unwrap()
}

fn json_latest(source: &str) -> Value {
    to_json(source, Options::new(EcmaVersion::Latest))
}

#[test]
fn test_basic_shape() {
    let v = json_latest("a + 1;");
    assert_eq!(v["type"], "Program");
    assert_eq!(v["sourceType"], "script");
    assert_eq!(v["start"], 0);
    assert_eq!(v["end"], 6);
    let expr = &v["body"][0]["expression"];
    assert_eq!(expr["type"], "BinaryExpression");
    assert_eq!(expr["operator"], "+");
    assert_eq!(expr["left"]["type"], "Identifier");
    assert_eq!(expr["left"]["name"], "a");
    assert_eq!(expr["right"]["type"], "Literal");
    assert_eq!(expr["right"]["value"], json!(1.0));
    assert_eq!(expr["right"]["raw"], "1");
}

#[test]
fn test_loc_and_range_opt_in() {
    let v = json_latest("a;");
    assert!(v.get("loc").is_none());
    assert!(v.get("range").is_none());

    let v = to_json(
        "a;\nb;",
        Options::new(EcmaVersion::Latest).with_locations().with_ranges(),
    );
    let second = &v["body"][1];
    assert_eq!(second["loc"]["start"]["line"], 2);
    assert_eq!(second["loc"]["start"]["column"], 0);
    assert_eq!(second["loc"]["end"]["line"], 2);
    assert_eq!(second["range"], json!([3, 5]));
}

#[test]
fn test_source_file_in_loc() {
    let mut options = Options::new(EcmaVersion::Latest).with_locations();
    options.source_file = Some("input.js".to_string());
    let v = to_json("a;", options);
    assert_eq!(v["loc"]["source"], "input.js");
}

#[test]
fn test_renamed_keyword_fields() {
    let v = json_latest("async function f() { for await (const x of xs) {} }");
    let f = &v["body"][0];
    assert_eq!(f["type"], "FunctionDeclaration");
    assert_eq!(f["async"], true);
    assert_eq!(f["generator"], false);
    let inner = &f["body"]["body"][0];
    assert_eq!(inner["type"], "ForOfStatement");
    assert_eq!(inner["await"], true);

    let v = json_latest("class A { static m() {} }");
    let m = &v["body"][0]["body"]["body"][0];
    assert_eq!(m["type"], "MethodDefinition");
    assert_eq!(m["static"], true);
    assert_eq!(m["kind"], "method");
}

#[test]
fn test_module_source_type() {
    let v = to_json("export {};", Options::new(EcmaVersion::Latest).module());
    assert_eq!(v["sourceType"], "module");
    assert_eq!(v["body"][0]["type"], "ExportNamedDeclaration");
}

#[test]
fn test_literal_variants() {
    let v = json_latest("null; true; 'hi'; /ab/g; 10n;");
    let lit = |i: usize| v["body"][i]["expression"].clone();
    assert_eq!(lit(0)["value"], Value::Null);
    assert_eq!(lit(1)["value"], true);
    assert_eq!(lit(2)["value"], "hi");
    let re = lit(3);
    assert_eq!(re["value"], Value::Null);
    assert_eq!(re["regex"]["pattern"], "ab");
    assert_eq!(re["regex"]["flags"], "g");
    let big = lit(4);
    assert_eq!(big["value"], Value::Null);
    assert_eq!(big["bigint"], "10");
}

#[test]
fn test_directive_field() {
    let v = json_latest("'use strict';\n'also part of the prologue';\n1;");
    assert_eq!(v["body"][0]["directive"], "use strict");
    assert_eq!(v["body"][1]["directive"], "also part of the prologue");
    assert!(v["body"][2].get("directive").is_none());
}

#[test]
fn test_template_literal_shape() {
    let v = json_latest("`a${b}`;");
    let tpl = &v["body"][0]["expression"];
    assert_eq!(tpl["type"], "TemplateLiteral");
    assert_eq!(tpl["quasis"][0]["value"]["raw"], "a");
    assert_eq!(tpl["quasis"][0]["value"]["cooked"], "a");
    assert_eq!(tpl["quasis"][0]["tail"], false);
    assert_eq!(tpl["quasis"][1]["tail"], true);
    assert_eq!(tpl["expressions"][0]["name"], "b");
}

#[test]
fn test_preserve_parens() {
    let v = json_latest("(a);");
    assert_eq!(v["body"][0]["expression"]["type"], "Identifier");

    let v = to_json("(a);", Options::new(EcmaVersion::Latest).with_preserve_parens());
    let expr = &v["body"][0]["expression"];
    assert_eq!(expr["type"], "ParenthesizedExpression");
    assert_eq!(expr["expression"]["type"], "Identifier");
    assert_eq!(expr["start"], 0);
    assert_eq!(expr["end"], 3);
}

#[test]
fn test_paren_free_spans_are_inner() {
    // Without preserveParens the node keeps the inner span.
    let v = json_latest("(a + b);");
    let expr = &v["body"][0]["expression"];
    assert_eq!(expr["start"], 1);
    assert_eq!(expr["end"], 6);
}

#[test]
fn test_pattern_shapes() {
    let v = json_latest("var {a, b: [c] = [], ...rest} = o;");
    let id = &v["body"][0]["declarations"][0]["id"];
    assert_eq!(id["type"], "ObjectPattern");
    let props = id["properties"].as_array().unwrap();
    assert_eq!(props[0]["type"], "Property");
    assert_eq!(props[0]["shorthand"], true);
    assert_eq!(props[1]["value"]["type"], "AssignmentPattern");
    assert_eq!(props[1]["value"]["left"]["type"], "ArrayPattern");
    assert_eq!(props[2]["type"], "RestElement");
}

#[test]
fn test_chain_expression_shape() {
    let v = to_json("a?.b(c)?.[d];", Options::new(EcmaVersion::Es2020));
    let chain = &v["body"][0]["expression"];
    assert_eq!(chain["type"], "ChainExpression");
    let member = &chain["expression"];
    assert_eq!(member["type"], "MemberExpression");
    assert_eq!(member["computed"], true);
    assert_eq!(member["optional"], true);
    assert_eq!(member["object"]["type"], "CallExpression");
}

#[test]
fn test_holes_serialize_as_null() {
    let v = json_latest("[1, , 3];");
    let elements = &v["body"][0]["expression"]["elements"];
    assert_eq!(elements[1], Value::Null);
}
