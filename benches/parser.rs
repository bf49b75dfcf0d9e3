//! Parser benchmarks
//!
//! Run with: cargo bench --bench parser

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use esparse::{parse, EcmaVersion, Options};

/// Mixed statement forms
const STATEMENTS: &str = r#"
let total = 0;
for (let i = 0; i < 100; i++) {
    if (i % 3 === 0) continue;
    total += i;
}
switch (total) {
    case 0: break;
    default: total = -1;
}
try { risky(); } catch (e) { report(e); } finally { done(); }
"#;

/// Expression-heavy code
const EXPRESSIONS: &str = r#"
const result = items
    .filter(x => x.active && !x.hidden)
    .map(({ id, name = "unknown", ...rest }) => ({ id, name, meta: rest }))
    .reduce((acc, item) => acc + (item.weight ?? 1) * factor ** 2, 0);
"#;

/// Class with modern member forms
const CLASSES: &str = r#"
class Registry extends Base {
    #entries = new Map();
    static shared = new Registry();
    static { Registry.shared.freeze(); }
    constructor(...args) { super(...args); }
    get size() { return this.#entries.size; }
    async load(key) { return await this.fetch(`/registry/${key}`); }
    *[Symbol.iterator]() { yield* this.#entries.values(); }
}
"#;

/// Module with import/export forms
const MODULES: &str = r#"
import def, { a, b as c } from './mod.js';
import * as ns from './ns.js';
export const x = def(a, c);
export default function run() { return ns.go(x); }
export { x as y };
export * from './other.js';
"#;

fn bench_snippets(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    let cases = [
        ("statements", STATEMENTS, false),
        ("expressions", EXPRESSIONS, false),
        ("classes", CLASSES, false),
        ("modules", MODULES, true),
    ];
    for (name, source, module) in cases {
        let options = || {
            let base = Options::new(EcmaVersion::Latest);
            if module { base.module() } else { base }
        };
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| parse(black_box(source), options()))
        });
    }
    group.finish();
}

fn bench_large_input(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..300 {
        source.push_str(&format!(
            "function f{i}(a, b = {i}) {{ const [x, y = a] = b; return x ?? y; }}\n"
        ));
    }
    let mut group = c.benchmark_group("parser_large");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions_300", |b| {
        b.iter(|| parse(black_box(&source), Options::new(EcmaVersion::Latest)))
    });
    group.finish();
}

fn bench_with_locations(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_options");
    group.bench_function("plain", |b| {
        b.iter(|| parse(black_box(STATEMENTS), Options::new(EcmaVersion::Latest)))
    });
    group.bench_function("locations_and_ranges", |b| {
        b.iter(|| {
            parse(
                black_box(STATEMENTS),
                Options::new(EcmaVersion::Latest).with_locations().with_ranges(),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_snippets, bench_large_input, bench_with_locations);
criterion_main!(benches);
