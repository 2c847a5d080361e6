// Lexer throughput benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cortecs_syntax::Lexer;

const PARITY: &str = r#"
function isEven(n) {
    if (n == 0) { return true }
    return isOdd(n - 1)
}

function isOdd(n) {
    if (n == 0) { return false }
    return isEven(n - 1)
}
"#;

fn bench_simple_expression(c: &mut Criterion) {
    let source = "let x = 42 + 10ub * 5.0d";

    c.bench_function("lex_simple_expression", |b| {
        b.iter(|| Lexer::new(black_box(source)).lex().unwrap())
    });
}

fn bench_functions(c: &mut Criterion) {
    c.bench_function("lex_mutual_recursion", |b| {
        b.iter(|| Lexer::new(black_box(PARITY)).lex().unwrap())
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex_scaling");
    for copies in [1usize, 10, 100] {
        let source = PARITY.repeat(copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &source, |b, src| {
            b.iter(|| Lexer::new(black_box(src)).lex().unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simple_expression, bench_functions, bench_scaling);
criterion_main!(benches);
