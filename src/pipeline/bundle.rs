use crate::error::Result;
use crate::graph::{connected_components, estimate_edges, GapConfig, LinkageEdge, SignSolver};
use crate::io::bed::BedReader;
use crate::io::links::{write_components_json, write_links_file, ComponentRecord, OrientedContig};
use crate::io::sizes::ContigSizes;
use crate::links::insert_size::estimate;
use crate::links::{adjacent_pairs, AggregationStats, AggregatorConfig, InsertSizeStats, LinkAggregator};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Minimum supporting pairs per edge
    pub links: usize,
    /// Largest accepted hang sum; 0 uses the estimated 99th percentile
    pub cutoff: i64,
    /// Only link contigs sharing the `_`-delimited id prefix
    pub same_prefix: bool,
    pub insert_low: Option<i64>,
    pub insert_high: Option<i64>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            links: 2,
            cutoff: 0,
            same_prefix: false,
            insert_low: None,
            insert_high: None,
        }
    }
}

/// Insert-size bounds used for gap estimation and the hang cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertBounds {
    pub p1: i64,
    pub p2: i64,
    pub max_cutoff: i64,
    /// Present when the bounds were estimated from the alignments
    pub estimate: Option<InsertSizeStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleReport {
    pub insert: InsertBounds,
    pub aggregation: AggregationStats,
    pub skipped_lines: usize,
    pub edges: usize,
    pub below_threshold: usize,
    pub conflicts: usize,
    pub components: usize,
}

#[derive(Debug, Clone)]
pub struct Bundle {
    pub edges: Vec<LinkageEdge>,
    pub components: Vec<ComponentRecord>,
    pub report: BundleReport,
}

/// Work out `p1`, `p2` and the hang cutoff. Both bounds given on the command
/// line skip the estimation pass over the alignments.
pub fn insert_bounds(bed: &Path, config: &BundleConfig) -> Result<InsertBounds> {
    if let (Some(p1), Some(p2)) = (config.insert_low, config.insert_high) {
        let max_cutoff = if config.cutoff > 0 { config.cutoff } else { p2 };
        return Ok(InsertBounds {
            p1,
            p2,
            max_cutoff,
            estimate: None,
        });
    }

    let stats = estimate(adjacent_pairs(BedReader::open(bed)?), config.cutoff)?
        .with_bounds(config.insert_low, config.insert_high);
    Ok(InsertBounds {
        p1: stats.p1,
        p2: stats.p2,
        max_cutoff: stats.max_cutoff(config.cutoff),
        estimate: Some(stats),
    })
}

/// Solve polarity for every connected component of `edges`.
pub fn orient_components(edges: &[LinkageEdge], solver: &dyn SignSolver) -> Result<Vec<ComponentRecord>> {
    connected_components(edges)
        .into_iter()
        .enumerate()
        .map(|(id, component)| {
            let signs = solver.solve(&component.nodes, &component.edges)?;
            let contigs: Vec<OrientedContig> = component
                .nodes
                .iter()
                .zip(signs)
                .map(|(name, strand)| OrientedContig {
                    name: name.clone(),
                    strand,
                })
                .collect();
            debug!(
                "component {}: {}",
                id,
                contigs
                    .iter()
                    .map(|c| format!("{}{}", c.name, c.strand))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            Ok(ComponentRecord {
                id,
                contigs,
                edges: component.edges.into_iter().cloned().collect(),
            })
        })
        .collect()
}

/// Aggregate mate-pair links from a read-name sorted BED file into oriented
/// linkage components.
pub fn bundle(bed: &Path, sizes: &ContigSizes, config: &BundleConfig, solver: &dyn SignSolver) -> Result<Bundle> {
    let insert = insert_bounds(bed, config)?;
    info!(
        "Gap bounds p1={} p2={}, hang cutoff {}",
        insert.p1, insert.p2, insert.max_cutoff
    );

    let mut reader = BedReader::open(bed)?;
    let mut aggregator = LinkAggregator::new(
        sizes,
        AggregatorConfig {
            max_cutoff: insert.max_cutoff,
            same_prefix: config.same_prefix,
        },
    );
    aggregator.consume(adjacent_pairs(&mut reader))?;
    let skipped_lines = reader.skipped();
    let aggregation = aggregator.stats().clone();
    let evidence = aggregator.into_evidence();
    info!(
        "Recorded {} votes over {} contig pairs from {} adjacent pairs",
        evidence.total_votes(),
        evidence.len(),
        aggregation.pairs_seen
    );

    let edge_set = estimate_edges(
        &evidence,
        &GapConfig {
            links: config.links,
            p1: insert.p1,
            p2: insert.p2,
        },
    );
    let components = orient_components(&edge_set.edges, solver)?;

    let report = BundleReport {
        insert,
        aggregation,
        skipped_lines,
        edges: edge_set.edges.len(),
        below_threshold: edge_set.below_threshold,
        conflicts: edge_set.conflicts,
        components: components.len(),
    };

    Ok(Bundle {
        edges: edge_set.edges,
        components,
        report,
    })
}

/// Run [`bundle`] and write the `.links` table plus the component JSON.
pub fn run_bundle(
    bed: &Path,
    sizes_path: &Path,
    links_out: &Path,
    json_out: &Path,
    config: &BundleConfig,
    solver: &dyn SignSolver,
) -> Result<BundleReport> {
    let sizes = ContigSizes::from_path(sizes_path)?;
    info!("Loaded {} contig sizes from {}", sizes.len(), sizes_path.display());

    let bundle = bundle(bed, &sizes, config, solver)?;
    write_links_file(links_out, &bundle.edges)?;
    write_components_json(json_out, &bundle.components)?;
    info!(
        "Wrote {} edges to {} and {} components to {}",
        bundle.edges.len(),
        links_out.display(),
        bundle.components.len(),
        json_out.display()
    );
    Ok(bundle.report)
}
