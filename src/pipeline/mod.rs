//! End-to-end runs behind each subcommand.

pub mod agp;
pub mod bundle;
pub mod heatmap;
pub mod score;

use crate::error::{Result, ScaffoldError};
use crate::io::ordering::{find_ordering_files, ContigOrdering};
use std::path::Path;
use tracing::info;

/// Read every `.ordering` file in `dir`, in natural file order.
pub fn load_orderings(dir: &Path) -> Result<Vec<ContigOrdering>> {
    let files = find_ordering_files(dir)?;
    if files.is_empty() {
        return Err(ScaffoldError::Config(format!(
            "no .ordering files found in {}",
            dir.display()
        )));
    }
    let orderings = files
        .iter()
        .map(|path| ContigOrdering::from_path(path))
        .collect::<Result<Vec<_>>>()?;
    info!("Loaded {} orderings from {}", orderings.len(), dir.display());
    Ok(orderings)
}
