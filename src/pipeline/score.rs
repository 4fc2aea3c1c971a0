use crate::error::{Result, ScaffoldError};
use crate::hic::{GaConfig, GeneticOptimizer, Objective, TourOptimizer, TourProblem};
use crate::io::create_output;
use crate::io::glm::read_contact_matrix;
use crate::io::ordering::ContigOrdering;
use crate::io::sizes::ContigSizes;
use crate::pipeline::load_orderings;
use ndarray::Array2;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of optimizing one group's contig order.
#[derive(Debug, Clone, Serialize)]
pub struct GroupScore {
    pub group: String,
    pub contigs: usize,
    pub initial_fitness: f64,
    pub fitness: f64,
    pub generations: usize,
    /// Contig names with their strand, in optimized order
    pub tour: Vec<String>,
}

fn tour_labels(ordering: &ContigOrdering, tour: &[usize]) -> Vec<String> {
    tour.iter()
        .map(|&i| {
            let entry = &ordering.entries[i];
            format!("{}{}", entry.contig_name, entry.strand)
        })
        .collect()
}

/// Optimize one ordering against the contact matrix, appending each
/// improvement to `tour_out` as a `>GA-<generation>-<fitness>` record.
pub fn score_group<W: Write>(
    ordering: &ContigOrdering,
    sizes: &ContigSizes,
    matrix: &Array2<f64>,
    optimizer: &dyn TourOptimizer,
    tour_out: &mut W,
) -> Result<GroupScore> {
    let order = ordering
        .entries
        .iter()
        .map(|e| sizes.index_of(&e.contig_name))
        .collect::<Result<Vec<usize>>>()?;
    let problem = TourProblem::prepare(&order, sizes.lengths(), matrix)?;
    let initial = problem.initial_tour();
    let initial_fitness = problem.evaluate(&initial);

    let mut write_error: Option<std::io::Error> = None;
    let result = optimizer.optimize(&problem, &initial, &mut |improvement| {
        if write_error.is_some() {
            return;
        }
        let labels = tour_labels(ordering, improvement.tour);
        if let Err(e) = writeln!(
            tour_out,
            ">GA-{}-{}\n{}",
            improvement.generation,
            improvement.fitness,
            labels.join(" ")
        ) {
            write_error = Some(e);
        }
    });
    if let Some(e) = write_error {
        return Err(ScaffoldError::io(e, format!("{}.tour", ordering.name)));
    }

    info!(
        "{}: fitness {:.6} -> {:.6} after {} generations",
        ordering.name, initial_fitness, result.fitness, result.generations
    );

    Ok(GroupScore {
        group: ordering.name.clone(),
        contigs: problem.len(),
        initial_fitness,
        fitness: result.fitness,
        generations: result.generations,
        tour: tour_labels(ordering, &result.tour),
    })
}

/// Score and reorder every group in `ordering_dir`, writing one `.tour` file
/// per group into `outdir`.
pub fn run_score(
    ordering_dir: &Path,
    glm: &Path,
    sizes_path: &Path,
    outdir: &Path,
    config: &GaConfig,
) -> Result<Vec<GroupScore>> {
    let sizes = ContigSizes::from_path(sizes_path)?;
    let orderings = load_orderings(ordering_dir)?;
    let matrix = read_contact_matrix(glm, sizes.len())?;
    info!(
        "Scoring {} groups over {} contigs",
        orderings.len(),
        sizes.len()
    );

    std::fs::create_dir_all(outdir).map_err(|e| ScaffoldError::io(e, outdir))?;
    let optimizer = GeneticOptimizer::new(config.clone());

    let mut scores = Vec::with_capacity(orderings.len());
    for ordering in &orderings {
        if ordering.entries.is_empty() {
            warn!("{}: empty ordering, skipped", ordering.name);
            continue;
        }
        let tour_path = outdir.join(format!("{}.tour", ordering.name));
        let mut writer = create_output(&tour_path)?;
        let score = score_group(ordering, &sizes, &matrix, &optimizer, &mut writer)?;
        writer.flush().map_err(|e| ScaffoldError::io(e, &tour_path))?;
        scores.push(score);
    }
    Ok(scores)
}
