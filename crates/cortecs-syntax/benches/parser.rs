// Parser throughput benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cortecs_syntax::{parse_expression, parse_program};

fn bench_expression(c: &mut Criterion) {
    let source = "f(a, {name: b, age: 3ub}).name + -x * (y - 1) == z && !done";

    c.bench_function("parse_expression", |b| {
        b.iter(|| parse_expression(black_box(source)).unwrap())
    });
}

fn bench_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_program");
    for functions in [1usize, 10, 100] {
        let source: String = (0..functions)
            .map(|i| {
                format!(
                    "function f{i}(a: I32, b) -> I32 {{\n    let c = a + b\n    if (c > 0) {{ return c }}\n    return f{i}(c - 1, b)\n}}\n"
                )
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(functions), &source, |b, src| {
            b.iter(|| parse_program(black_box(src)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_expression, bench_program);
criterion_main!(benches);
