use crate::error::Result;
use crate::io::agp::{build_agp, write_agp, AgpConfig, AgpLine};
use crate::io::sizes::ContigSizes;
use crate::pipeline::load_orderings;
use std::path::Path;
use tracing::info;

/// Write an AGP with one object per ordering plus unplaced contigs.
/// Returns the number of lines written.
pub fn run_agp(ordering_dir: &Path, sizes_path: &Path, output: &Path, config: &AgpConfig) -> Result<usize> {
    let sizes = ContigSizes::from_path(sizes_path)?;
    let orderings = load_orderings(ordering_dir)?;
    let lines = build_agp(&orderings, &sizes, config)?;

    let singletons = lines
        .iter()
        .filter(|l| matches!(l, AgpLine::Component { orientation: '?', .. }))
        .count();
    write_agp(output, &lines)?;
    info!(
        "Wrote {} AGP lines ({} unplaced contigs) to {}",
        lines.len(),
        singletons,
        output.display()
    );
    Ok(lines.len())
}
