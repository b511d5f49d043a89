use RustedTrig::symbolic::symbolic_engine::{Expr, Function};
use RustedTrig::symbolic::trigonometric::trig_series::{clear_series_cache, taylor_terms};
use RustedTrig::symbolic::trigonometric::{atan, cos, sin, tan};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_exact_cosines(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact values");
    for q in [5, 8, 12, 15] {
        let angle = Expr::pi() / Expr::integer(q);
        group.bench_function(format!("cos(pi/{})", q), |b| b.iter(|| cos(black_box(angle.clone()))));
    }
    group.bench_function("tan(pi/12)", |b| {
        let angle = Expr::pi() / Expr::integer(12);
        b.iter(|| tan(black_box(angle.clone())))
    });
    group.finish();
}

fn bench_expand_trig(c: &mut Criterion) {
    let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
    let sum = sin(x.clone() + y.clone());
    let triple = tan(Expr::integer(3) * x);
    c.bench_function("sin(x + y) expand_trig", |b| b.iter(|| black_box(&sum).expand_trig()));
    c.bench_function("tan(3x) expand_trig", |b| b.iter(|| black_box(&triple).expand_trig()));
}

fn bench_series(c: &mut Criterion) {
    let x = Expr::symbol("x");
    c.bench_function("tan series, 15 terms, cold cache", |b| {
        b.iter(|| {
            clear_series_cache();
            taylor_terms(Function::tan, black_box(&x), 15)
        })
    });
    c.bench_function("atan of table value", |b| {
        let v = Expr::integer(2) - Expr::integer(3).sqrt();
        b.iter(|| atan(black_box(v.clone())))
    });
}

criterion_group!(benches, bench_exact_cosines, bench_expand_trig, bench_series);
criterion_main!(benches);
