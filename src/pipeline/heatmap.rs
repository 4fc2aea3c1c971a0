use crate::error::Result;
use crate::hic::{binned_matrix, make_bins, BinConfig};
use crate::io::glm::read_contacts;
use crate::io::sizes::ContigSizes;
use crate::pipeline::load_orderings;
use crate::visualize::plot_contact_heatmap;
use std::path::Path;
use tracing::info;

/// Bin the contacts of all ordered contigs and draw them as a PNG.
/// Returns the matrix dimension in bins.
pub fn run_heatmap(
    ordering_dir: &Path,
    glm: &Path,
    sizes_path: &Path,
    output: &Path,
    config: &BinConfig,
) -> Result<usize> {
    let sizes = ContigSizes::from_path(sizes_path)?;
    let orderings = load_orderings(ordering_dir)?;
    let groups: Vec<Vec<String>> = orderings.iter().map(|o| o.contig_names()).collect();

    let layout = make_bins(&groups, &sizes, config)?;
    info!(
        "{} groups span {} bins at {} bp resolution",
        groups.len(),
        layout.total_bins,
        config.resolution
    );

    let contacts = read_contacts(glm)?;
    let matrix = binned_matrix(&contacts, &sizes, &layout);

    let title = format!("Resolution = {} bp", config.resolution);
    plot_contact_heatmap(&matrix, &layout.breaks, &title, output)?;
    info!("Heatmap written to {}", output.display());
    Ok(layout.total_bins)
}
