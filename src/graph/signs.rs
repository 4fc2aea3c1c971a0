use crate::error::{Result, ScaffoldError};
use crate::graph::gap::LinkageEdge;
use crate::strand::Strand;
use ahash::AHashMap;
use ndarray::{Array1, Array2};

/// Assigns a global orientation to every node of a component so that the
/// relative orientations on its edges are satisfied as far as possible.
pub trait SignSolver {
    /// Polarity per node, in the order of `nodes`.
    fn solve(&self, nodes: &[String], edges: &[&LinkageEdge]) -> Result<Vec<Strand>>;
}

/// Signs from the dominant eigenvector of the signed adjacency matrix
/// (`+1` for agreeing edges, `-1` for opposing ones). The first node is
/// always reported as `+`.
#[derive(Debug, Clone)]
pub struct SpectralSignSolver {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for SpectralSignSolver {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-10,
        }
    }
}

impl SpectralSignSolver {
    fn signed_adjacency(nodes: &[String], edges: &[&LinkageEdge]) -> Result<Array2<f64>> {
        let index: AHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();
        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| ScaffoldError::UnknownContig(name.to_string()))
        };

        let n = nodes.len();
        let mut m = Array2::<f64>::zeros((n, n));
        for edge in edges {
            let (a, b) = (lookup(&edge.seq_a)?, lookup(&edge.seq_b)?);
            if a == b {
                continue;
            }
            let w = match edge.orientation {
                Strand::Forward => 1.0,
                Strand::Reverse => -1.0,
            };
            m[[a, b]] += w;
            m[[b, a]] += w;
        }
        Ok(m)
    }

    /// Power iteration on `m + c*I`, where `c` bounds every eigenvalue of `m`
    /// so the shifted spectrum is non-negative.
    fn dominant_eigenvector(&self, m: &Array2<f64>) -> Array1<f64> {
        let n = m.nrows();
        let shift = m
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max);
        let shifted = m + &(Array2::<f64>::eye(n) * shift);

        // Unequal start entries avoid starting orthogonal to the answer
        let mut v = Array1::from_iter((0..n).map(|i| 1.0 / (i as f64 + 1.0)));
        v /= v.dot(&v).sqrt();

        for _ in 0..self.max_iter {
            let mut next = shifted.dot(&v);
            let norm = next.dot(&next).sqrt();
            if norm == 0.0 {
                break;
            }
            next /= norm;
            let delta = (&next - &v).mapv(|x| x * x).sum().sqrt();
            v = next;
            if delta < self.tolerance {
                break;
            }
        }
        v
    }
}

impl SignSolver for SpectralSignSolver {
    fn solve(&self, nodes: &[String], edges: &[&LinkageEdge]) -> Result<Vec<Strand>> {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }
        let m = Self::signed_adjacency(nodes, edges)?;
        let v = self.dominant_eigenvector(&m);

        let orient = if v[0] < 0.0 { -1.0 } else { 1.0 };
        Ok(v.iter()
            .map(|&x| if x * orient >= 0.0 { Strand::Forward } else { Strand::Reverse })
            .collect())
    }
}
