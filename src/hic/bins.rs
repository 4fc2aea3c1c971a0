use crate::error::{Result, ScaffoldError};
use crate::io::glm::ContactRecord;
use crate::io::sizes::ContigSizes;
use ahash::AHashMap;
use ndarray::{s, Array2};

#[derive(Debug, Clone)]
pub struct BinConfig {
    /// Bin width in bases
    pub resolution: u64,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self { resolution: 100_000 }
    }
}

/// Contig to bin-interval layout across all groups.
#[derive(Debug, Clone, Default)]
pub struct ContactBins {
    pub total_bins: usize,
    /// Half-open `[start, end)` bin range per contig name
    pub bins: AHashMap<String, (usize, usize)>,
    /// Offset after each group; the last entry equals `total_bins`
    pub breaks: Vec<usize>,
}

/// Number of bins covering `length` bases.
pub fn bin_count(length: u64, resolution: u64) -> usize {
    ((length + resolution - 1) / resolution) as usize
}

/// Lay the contigs of each group end to end in bin space, in group order.
pub fn make_bins(groups: &[Vec<String>], sizes: &ContigSizes, config: &BinConfig) -> Result<ContactBins> {
    if config.resolution == 0 {
        return Err(ScaffoldError::Config("bin resolution must be positive".to_string()));
    }

    let mut layout = ContactBins::default();
    let mut start = 0;
    for group in groups {
        for name in group {
            let end = start + bin_count(sizes.get_size(name)?, config.resolution);
            layout.bins.insert(name.clone(), (start, end));
            start = end;
        }
        layout.breaks.push(start);
    }
    layout.total_bins = start;
    Ok(layout)
}

/// Paint each contact over its two contigs' bin rectangle, then apply
/// `log10(x + 1)`.
///
/// Contacts refer to contigs by index into `sizes`; contacts touching a contig
/// that has no bins are skipped.
pub fn binned_matrix(contacts: &[ContactRecord], sizes: &ContigSizes, layout: &ContactBins) -> Array2<f64> {
    let mut m = Array2::<f64>::zeros((layout.total_bins, layout.total_bins));
    let bins_of = |index: usize| sizes.name(index).and_then(|name| layout.bins.get(name)).copied();

    for c in contacts {
        let (Some((xs, xe)), Some((ys, ye))) = (bins_of(c.x), bins_of(c.y)) else {
            continue;
        };
        m.slice_mut(s![xs..xe, ys..ye]).fill(c.count);
    }

    m.mapv_inplace(|v| (v + 1.0).log10());
    m
}
