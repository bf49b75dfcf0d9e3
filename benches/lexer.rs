//! Lexer benchmarks
//!
//! Run with: cargo bench --bench lexer

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use esparse::lexer::Lexer;
use esparse::{EcmaVersion, TokenType};

/// Simple expression
const SIMPLE_EXPR: &str = "1 + 2 * 3 - 4 / 5";

/// Variable declarations
const VARIABLES: &str = r#"
let x = 1;
const y = 2;
var z = 3;
let a = x + y + z;
const b = a * 2;
"#;

/// String literals with escapes
const STRINGS: &str = r#"
const hello = "Hello, World!";
const escaped = "Line1\nLine2\tTabbed";
const unicode = "\u{1F600} emoji A";
const template = `Hello ${name}!`;
"#;

/// Operators stress test
const OPERATORS: &str = r#"
a + b - c * d / e % f ** g;
x === y !== z == w != v;
a && b || c;
e ?? d;
a & b | c ^ d;
a << 2 >> 3 >>> 4;
a += 1;
a **= g;
a ??= d;
x++; --y;
a?.b ?? b;
"#;

/// Regex-or-divide disambiguation
const REGEXES: &str = r#"
const re = /ab+c/gi;
const ratio = total / count / 2;
if (x) /tail/.test(s);
const slices = `${a / b}${/c/.source}`;
"#;

fn lex_all(source: &str) -> usize {
    let mut lexer = Lexer::new(source, EcmaVersion::Latest, false, false, None);
    let mut count = 0;
    loop {
        match lexer.next_token() {
            Ok(token) => {
                count += 1;
                if token.token_type == TokenType::Eof {
                    return count;
                }
            }
            Err(_) => return count,
        }
    }
}

fn bench_snippets(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    for (name, source) in [
        ("simple_expr", SIMPLE_EXPR),
        ("variables", VARIABLES),
        ("strings", STRINGS),
        ("operators", OPERATORS),
        ("regexes", REGEXES),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| b.iter(|| lex_all(black_box(source))));
    }
    group.finish();
}

fn bench_large_input(c: &mut Criterion) {
    // A synthetic module large enough to amortize setup costs.
    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!(
            "function f{i}(a, b) {{ return a * {i} + b / (a ?? 1); }}\n"
        ));
    }
    let mut group = c.benchmark_group("lexer_large");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions_500", |b| b.iter(|| lex_all(black_box(&source))));
    group.finish();
}

criterion_group!(benches, bench_snippets, bench_large_input);
criterion_main!(benches);
