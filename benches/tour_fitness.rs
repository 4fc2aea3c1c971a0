use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use raptor_scaffold::hic::{score_evaluate, GaConfig, GeneticOptimizer, TourOptimizer, TourProblem};

/// Random symmetric contact matrix with contig sizes between 10 kb and 1 Mb
fn random_problem(n: usize, rng: &mut StdRng) -> TourProblem {
    let sizes: Vec<u64> = (0..n).map(|_| rng.gen_range(10_000..1_000_000)).collect();
    let mut matrix = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let v = rng.gen_range(0.0..100.0);
            matrix[[i, j]] = v;
            matrix[[j, i]] = v;
        }
    }
    TourProblem::new(sizes, matrix).unwrap()
}

fn bench_score_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_evaluate");
    let mut rng = StdRng::seed_from_u64(42);

    for n in [50, 200, 500] {
        let problem = random_problem(n, &mut rng);
        let mut tour = problem.initial_tour();
        tour.shuffle(&mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &tour, |b, tour| {
            b.iter(|| {
                black_box(score_evaluate(
                    black_box(tour),
                    problem.tour_sizes(),
                    problem.tour_matrix(),
                ))
            });
        });
    }

    group.finish();
}

fn bench_genetic_optimizer(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let problem = random_problem(60, &mut rng);
    let initial = problem.initial_tour();
    let optimizer = GeneticOptimizer::new(GaConfig {
        ngen: 20,
        ..GaConfig::default()
    });

    c.bench_function("ga_60_contigs_20_generations", |b| {
        b.iter(|| black_box(optimizer.optimize(&problem, &initial, &mut |_| {})))
    });
}

criterion_group!(benches, bench_score_evaluate, bench_genetic_optimizer);
criterion_main!(benches);
