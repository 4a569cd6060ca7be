use adomian_lane_emden::ADM::ADM_solver::{AdmSolver, inverse_operator};
use adomian_lane_emden::symbolic::symbolic_engine::Expr;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn solve(nonlinearity: &str, initial_condition: &str, num_terms: usize) -> Vec<Expr> {
    let f = Expr::parse_expression(nonlinearity).unwrap();
    let u0 = Expr::parse_expression(initial_condition).unwrap();
    let mut solver = AdmSolver::new(num_terms, f, u0).unwrap();
    solver.solve().unwrap().1
}

fn bench_reference_problem(c: &mut Criterion) {
    let mut group = c.benchmark_group("(u^2 - C)^1.5");
    group.sample_size(10);
    for num_terms in [3usize, 5, 7] {
        group.bench_function(format!("{} terms", num_terms), |b| {
            b.iter(|| solve("(u^2 - C)^1.5", "1", black_box(num_terms)))
        });
    }
    group.finish();
}

fn bench_polytropes(c: &mut Criterion) {
    c.bench_function("u^5, 6 terms", |b| b.iter(|| solve("u^5", "1", black_box(6))));
    c.bench_function("exp(u), 6 terms", |b| {
        b.iter(|| solve("exp(u)", "0", black_box(6)))
    });
}

fn bench_inverse_operator(c: &mut Criterion) {
    let f = Expr::parse_expression("1 - xi^2/6 + xi^4/120 - xi^6/5040").unwrap();
    c.bench_function("inverse operator", |b| {
        b.iter(|| inverse_operator(black_box(&f), "xi", "s", "t").unwrap())
    });
}

criterion_group!(
    benches,
    bench_reference_problem,
    bench_polytropes,
    bench_inverse_operator
);
criterion_main!(benches);
