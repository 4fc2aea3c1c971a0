use crate::error::{Result, ScaffoldError};
use ndarray::Array2;

/// Objective maximized by a tour optimizer. Implementations must be pure so
/// a generation can be scored from several threads at once.
pub trait Objective: Sync {
    fn evaluate(&self, tour: &[usize]) -> f64;
}

/// Contact mass between tour members, each pair weighted by the inverse of
/// the genomic distance the tour puts between them.
///
/// `tour` indexes into `tour_sizes` and the rows/columns of `tour_matrix`.
/// The distance between positions `i < j` is `cum[j] - cum[i]`, with `cum` the
/// inclusive prefix sum of sizes in tour order.
pub fn score_evaluate(tour: &[usize], tour_sizes: &[u64], tour_matrix: &Array2<f64>) -> f64 {
    let mut cumulative = Vec::with_capacity(tour.len());
    let mut total = 0u64;
    for &contig in tour {
        total += tour_sizes[contig];
        cumulative.push(total);
    }

    let mut score = 0.0;
    for ia in 0..tour.len() {
        let a = tour[ia];
        for ib in (ia + 1)..tour.len() {
            let links = tour_matrix[[a, tour[ib]]];
            if links != 0.0 {
                score += links / (cumulative[ib] - cumulative[ia]) as f64;
            }
        }
    }
    score
}

/// One scaffold group, re-indexed so that its contigs are `0..N`.
#[derive(Debug, Clone)]
pub struct TourProblem {
    tour_sizes: Vec<u64>,
    tour_matrix: Array2<f64>,
}

impl TourProblem {
    /// Gather the sizes and the `N x N` contact submatrix of the contigs in
    /// `order` (indices into `sizes` and `matrix`).
    pub fn prepare(order: &[usize], sizes: &[u64], matrix: &Array2<f64>) -> Result<Self> {
        let n = sizes.len().min(matrix.nrows()).min(matrix.ncols());
        if let Some(&bad) = order.iter().find(|&&i| i >= n) {
            return Err(ScaffoldError::UnknownContig(format!(
                "contig index {} outside the {} indexed contigs",
                bad, n
            )));
        }

        let tour_sizes: Vec<u64> = order.iter().map(|&i| sizes[i]).collect();
        let tour_matrix = Array2::from_shape_fn((order.len(), order.len()), |(r, c)| {
            matrix[[order[r], order[c]]]
        });
        Self::new(tour_sizes, tour_matrix)
    }

    pub fn new(tour_sizes: Vec<u64>, tour_matrix: Array2<f64>) -> Result<Self> {
        let n = tour_sizes.len();
        if tour_matrix.dim() != (n, n) {
            return Err(ScaffoldError::Config(format!(
                "contact matrix is {:?}, expected ({}, {})",
                tour_matrix.dim(),
                n,
                n
            )));
        }
        if let Some(pos) = tour_sizes.iter().position(|&s| s == 0) {
            return Err(ScaffoldError::InsufficientData(format!(
                "contig at tour position {} has zero length",
                pos
            )));
        }
        Ok(Self {
            tour_sizes,
            tour_matrix,
        })
    }

    /// Identity tour: contigs in the order they were prepared.
    pub fn initial_tour(&self) -> Vec<usize> {
        (0..self.tour_sizes.len()).collect()
    }

    pub fn len(&self) -> usize {
        self.tour_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour_sizes.is_empty()
    }

    pub fn tour_sizes(&self) -> &[u64] {
        &self.tour_sizes
    }

    pub fn tour_matrix(&self) -> &Array2<f64> {
        &self.tour_matrix
    }
}

impl Objective for TourProblem {
    fn evaluate(&self, tour: &[usize]) -> f64 {
        score_evaluate(tour, &self.tour_sizes, &self.tour_matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_three_contig_score() {
        let sizes = [100, 200, 150];
        let m = array![[0.0, 10.0, 5.0], [10.0, 0.0, 20.0], [5.0, 20.0, 0.0]];
        let score = score_evaluate(&[0, 1, 2], &sizes, &m);
        // cumulative sizes 100, 300, 450
        let expected = 10.0 / 200.0 + 5.0 / 350.0 + 20.0 / 150.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_reversal_symmetry_with_uniform_sizes() {
        let sizes = [100; 4];
        let m = array![
            [0.0, 8.0, 3.0, 1.0],
            [8.0, 0.0, 6.0, 2.0],
            [3.0, 6.0, 0.0, 9.0],
            [1.0, 2.0, 9.0, 0.0]
        ];
        let forward = score_evaluate(&[2, 0, 3, 1], &sizes, &m);
        let reversed = score_evaluate(&[1, 3, 0, 2], &sizes, &m);
        assert!((forward - reversed).abs() < 1e-12);
    }

    #[test]
    fn test_prepare_gathers_submatrix() {
        let sizes = [10, 20, 30, 40];
        let m = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let problem = TourProblem::prepare(&[3, 1], &sizes, &m).unwrap();

        assert_eq!(problem.tour_sizes(), &[40, 20]);
        assert_eq!(problem.tour_matrix()[[0, 1]], 13.0);
        assert_eq!(problem.tour_matrix()[[1, 0]], 7.0);
        assert_eq!(problem.initial_tour(), vec![0, 1]);
        assert!((problem.evaluate(&[0, 1]) - 13.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_prepare_rejects_unknown_index() {
        let m = Array2::<f64>::zeros((2, 2));
        assert!(matches!(
            TourProblem::prepare(&[0, 5], &[10, 20], &m),
            Err(ScaffoldError::UnknownContig(_))
        ));
    }

    #[test]
    fn test_zero_length_contig_rejected() {
        let m = Array2::<f64>::zeros((2, 2));
        assert!(TourProblem::new(vec![10, 0], m).is_err());
    }
}
