// Type inference benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cortecs_syntax::parse_program;
use cortecs_typecheck::{Checker, Session};

const PARITY: &str = "function isEven(n) {
    if (n == 0) { return true }
    return isOdd(n - 1)
}

function isOdd(n: I32) -> Bool {
    if (n == 0) { return false }
    return isEven(n - 1)
}";

fn chain(functions: usize) -> String {
    let mut source = String::from("function f0(a, b) { return {sum: a + b, first: a} }\n");
    for i in 1..functions {
        source.push_str(&format!(
            "function f{i}(x: I32) {{\n    let r = f{prev}(x, 2)\n    let y = r.sum\n    if (y > 0) {{ return r.first }}\n    return y\n}}\n",
            prev = i - 1
        ));
    }
    source
}

fn bench_mutual_recursion(c: &mut Criterion) {
    let program = parse_program(PARITY).unwrap();
    let checker = Checker::default();

    c.bench_function("check_mutual_recursion", |b| {
        b.iter(|| checker.check_program(black_box(&program)).unwrap())
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_chain");
    for functions in [10usize, 100, 500] {
        let program = parse_program(&chain(functions)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(functions), &program, |b, p| {
            let checker = Checker::default();
            b.iter(|| checker.check_program(black_box(p)).unwrap())
        });
    }
    group.finish();
}

fn bench_session_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_single_edit");
    for functions in [10usize, 100, 500] {
        let source = chain(functions);
        let original = parse_program(&source).unwrap();
        let edited = parse_program(&source.replace("f0(x, 2)", "f0(x, 3)")).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(functions), &functions, |b, _| {
            let mut session = Session::new(Checker::default());
            session.check(&original).unwrap();
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let program = if flip { &edited } else { &original };
                session.check(black_box(program)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mutual_recursion, bench_scaling, bench_session_edit);
criterion_main!(benches);
