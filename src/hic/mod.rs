//! Hi-C contact scoring: tour fitness, tour search and heatmap binning.

pub mod bins;
pub mod fitness;
pub mod optimizer;

pub use bins::{binned_matrix, make_bins, BinConfig, ContactBins};
pub use fitness::{score_evaluate, Objective, TourProblem};
pub use optimizer::{GaConfig, GeneticOptimizer, Improvement, OptimizedTour, TourOptimizer};
