use crate::hic::fitness::Objective;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

/// Reported each time the best tour improves.
#[derive(Debug, Clone)]
pub struct Improvement<'a> {
    pub generation: usize,
    pub tour: &'a [usize],
    pub fitness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedTour {
    pub tour: Vec<usize>,
    pub fitness: f64,
    pub generations: usize,
}

/// Search strategy over tours. The objective is the only coupling to the
/// scoring code.
pub trait TourOptimizer {
    fn optimize(
        &self,
        objective: &dyn Objective,
        initial: &[usize],
        on_improve: &mut dyn FnMut(&Improvement<'_>),
    ) -> OptimizedTour;
}

#[derive(Debug, Clone)]
pub struct GaConfig {
    pub npop: usize,
    pub ngen: usize,
    /// Crossover probability per mating pair
    pub cxpb: f64,
    /// Mutation probability per individual
    pub mutpb: f64,
    pub tournament: usize,
    /// Stop after this many generations without improvement
    pub stall: usize,
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            npop: 100,
            ngen: 500,
            cxpb: 0.7,
            mutpb: 0.2,
            tournament: 3,
            stall: 50,
            seed: 666,
        }
    }
}

#[derive(Debug, Clone)]
struct Individual {
    tour: Vec<usize>,
    fitness: Option<f64>,
}

impl Individual {
    fn score(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Permutation GA: tournament selection, partially matched crossover and
/// shuffle-index mutation, with the best tour carried into every generation.
#[derive(Debug, Clone, Default)]
pub struct GeneticOptimizer {
    pub config: GaConfig,
}

impl GeneticOptimizer {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    fn evaluate(population: &mut [Individual], objective: &dyn Objective) {
        population
            .par_iter_mut()
            .filter(|ind| ind.fitness.is_none())
            .for_each(|ind| ind.fitness = Some(objective.evaluate(&ind.tour)));
    }

    fn select(&self, population: &[Individual], rng: &mut StdRng) -> Vec<Individual> {
        (0..population.len())
            .map(|_| {
                let mut best: Option<&Individual> = None;
                for _ in 0..self.config.tournament.max(1) {
                    let aspirant = &population[rng.gen_range(0..population.len())];
                    if best.map_or(true, |b| aspirant.score() > b.score()) {
                        best = Some(aspirant);
                    }
                }
                best.cloned().unwrap_or_else(|| population[0].clone())
            })
            .collect()
    }

    fn fittest(population: &[Individual]) -> &Individual {
        population
            .iter()
            .fold(&population[0], |best, ind| if ind.score() > best.score() { ind } else { best })
    }
}

impl TourOptimizer for GeneticOptimizer {
    fn optimize(
        &self,
        objective: &dyn Objective,
        initial: &[usize],
        on_improve: &mut dyn FnMut(&Improvement<'_>),
    ) -> OptimizedTour {
        let n = initial.len();
        if n < 2 || self.config.npop == 0 {
            let fitness = objective.evaluate(initial);
            on_improve(&Improvement {
                generation: 0,
                tour: initial,
                fitness,
            });
            return OptimizedTour {
                tour: initial.to_vec(),
                fitness,
                generations: 0,
            };
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let indpb = 2.0 / n as f64;

        let mut population: Vec<Individual> = Vec::with_capacity(self.config.npop);
        population.push(Individual {
            tour: initial.to_vec(),
            fitness: None,
        });
        while population.len() < self.config.npop {
            let mut tour = initial.to_vec();
            tour.shuffle(&mut rng);
            population.push(Individual { tour, fitness: None });
        }
        Self::evaluate(&mut population, objective);

        let mut best = Self::fittest(&population).clone();
        on_improve(&Improvement {
            generation: 0,
            tour: &best.tour,
            fitness: best.score(),
        });

        let mut stall = 0;
        let mut generation = 0;
        while generation < self.config.ngen {
            generation += 1;

            let mut offspring = self.select(&population, &mut rng);
            for i in (1..offspring.len()).step_by(2) {
                if rng.gen::<f64>() < self.config.cxpb {
                    let (left, right) = offspring.split_at_mut(i);
                    cx_partially_matched(&mut left[i - 1].tour, &mut right[0].tour, &mut rng);
                    left[i - 1].fitness = None;
                    right[0].fitness = None;
                }
            }
            for ind in offspring.iter_mut() {
                if rng.gen::<f64>() < self.config.mutpb {
                    mut_shuffle_indexes(&mut ind.tour, indpb, &mut rng);
                    ind.fitness = None;
                }
            }
            Self::evaluate(&mut offspring, objective);

            // Elitism: the best-so-far replaces the weakest offspring
            if let Some(worst) = offspring
                .iter_mut()
                .min_by(|a, b| a.score().total_cmp(&b.score()))
            {
                if worst.score() < best.score() {
                    *worst = best.clone();
                }
            }
            population = offspring;

            let champion = Self::fittest(&population);
            if champion.score() > best.score() {
                best = champion.clone();
                stall = 0;
                debug!("generation {}: fitness {:.6}", generation, best.score());
                on_improve(&Improvement {
                    generation,
                    tour: &best.tour,
                    fitness: best.score(),
                });
            } else {
                stall += 1;
                if stall >= self.config.stall {
                    info!("No improvement in {} generations, stopping at {}", stall, generation);
                    break;
                }
            }
        }

        OptimizedTour {
            fitness: best.score(),
            tour: best.tour,
            generations: generation,
        }
    }
}

/// Partially matched crossover on two permutations of `0..n`, in place.
pub fn cx_partially_matched(a: &mut [usize], b: &mut [usize], rng: &mut impl Rng) {
    let size = a.len().min(b.len());
    if size < 2 {
        return;
    }
    let mut pos_a = vec![0; size];
    let mut pos_b = vec![0; size];
    for i in 0..size {
        pos_a[a[i]] = i;
        pos_b[b[i]] = i;
    }

    let mut lo = rng.gen_range(0..=size);
    let mut hi = rng.gen_range(0..size);
    if hi >= lo {
        hi += 1;
    } else {
        std::mem::swap(&mut lo, &mut hi);
    }

    for i in lo..hi {
        let (va, vb) = (a[i], b[i]);
        a[i] = vb;
        a[pos_a[vb]] = va;
        b[i] = va;
        b[pos_b[va]] = vb;
        pos_a.swap(va, vb);
        pos_b.swap(va, vb);
    }
}

/// Swap each position with a random other position with probability `indpb`.
pub fn mut_shuffle_indexes(tour: &mut [usize], indpb: f64, rng: &mut impl Rng) {
    let size = tour.len();
    if size < 2 {
        return;
    }
    for i in 0..size {
        if rng.gen::<f64>() < indpb {
            let mut j = rng.gen_range(0..size - 1);
            if j >= i {
                j += 1;
            }
            tour.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hic::fitness::TourProblem;
    use ndarray::Array2;

    fn is_permutation(tour: &[usize]) -> bool {
        let mut sorted = tour.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// Contigs whose true order is 0..n, presented scrambled.
    fn linear_problem(n: usize) -> TourProblem {
        let m = Array2::from_shape_fn((n, n), |(r, c)| {
            let d = (r as i64 - c as i64).unsigned_abs() as f64;
            if d == 0.0 {
                0.0
            } else {
                100.0 / (d * d)
            }
        });
        TourProblem::new(vec![1000; n], m).unwrap()
    }

    #[test]
    fn test_pmx_keeps_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut a: Vec<usize> = (0..9).collect();
            let mut b: Vec<usize> = (0..9).collect();
            a.shuffle(&mut rng);
            b.shuffle(&mut rng);
            cx_partially_matched(&mut a, &mut b, &mut rng);
            assert!(is_permutation(&a));
            assert!(is_permutation(&b));
        }
    }

    #[test]
    fn test_mutation_keeps_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tour: Vec<usize> = (0..12).collect();
        for _ in 0..50 {
            mut_shuffle_indexes(&mut tour, 0.3, &mut rng);
            assert!(is_permutation(&tour));
        }
    }

    #[test]
    fn test_ga_never_worse_than_initial() {
        let problem = linear_problem(8);
        let initial = vec![3, 6, 0, 7, 2, 5, 1, 4];
        let start = problem.evaluate(&initial);

        let optimizer = GeneticOptimizer::new(GaConfig {
            npop: 40,
            ngen: 200,
            stall: 40,
            ..GaConfig::default()
        });
        let mut improvements = Vec::new();
        let result = optimizer.optimize(&problem, &initial, &mut |imp| improvements.push(imp.fitness));

        assert!(is_permutation(&result.tour));
        assert!(result.fitness >= start);
        assert!((problem.evaluate(&result.tour) - result.fitness).abs() < 1e-12);
        assert!(improvements.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(improvements.last().copied(), Some(result.fitness));
    }

    #[test]
    fn test_ga_is_deterministic_for_seed() {
        let problem = linear_problem(6);
        let initial = vec![5, 1, 3, 0, 4, 2];
        let optimizer = GeneticOptimizer::new(GaConfig {
            npop: 20,
            ngen: 30,
            ..GaConfig::default()
        });
        let first = optimizer.optimize(&problem, &initial, &mut |_| {});
        let second = optimizer.optimize(&problem, &initial, &mut |_| {});
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_contig_tour() {
        let problem = TourProblem::new(vec![500], Array2::zeros((1, 1))).unwrap();
        let result = GeneticOptimizer::default().optimize(&problem, &[0], &mut |_| {});
        assert_eq!(result.tour, vec![0]);
        assert_eq!(result.fitness, 0.0);
        assert_eq!(result.generations, 0);
    }
}
