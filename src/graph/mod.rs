//! Contig linkage graph: gap consensus, components and orientation.

pub mod components;
pub mod gap;
pub mod signs;

pub use components::{connected_components, LinkageComponent};
pub use gap::{estimate_edges, EdgeSet, GapConfig, GapEstimate, LinkageEdge};
pub use signs::{SignSolver, SpectralSignSolver};
