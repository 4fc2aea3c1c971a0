use crate::error::{Result, ScaffoldError};
use crate::graph::gap::{GapEstimate, LinkageEdge};
use crate::io::create_output;
use crate::strand::Strand;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// A contig with the polarity assigned to it within its component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrientedContig {
    pub name: String,
    pub strand: Strand,
}

/// One connected component of the linkage graph, as written to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentRecord {
    pub id: usize,
    pub contigs: Vec<OrientedContig>,
    pub edges: Vec<LinkageEdge>,
}

fn format_gap(gap: &GapEstimate) -> String {
    match gap {
        GapEstimate::Interval { min, max } => format!("{}\t{}", min, max),
        GapEstimate::Conflict => "conflict\tconflict".to_string(),
    }
}

/// Write edges as tab-separated `seq_a seq_b orientation votes gap_min gap_max`.
pub fn write_links<W: Write>(writer: &mut W, edges: &[LinkageEdge]) -> std::io::Result<()> {
    writeln!(writer, "#seq_a\tseq_b\torientation\tvotes\tgap_min\tgap_max")?;
    for edge in edges {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            edge.seq_a,
            edge.seq_b,
            edge.orientation,
            edge.votes,
            format_gap(&edge.gap)
        )?;
    }
    Ok(())
}

pub fn write_links_file(path: &Path, edges: &[LinkageEdge]) -> Result<()> {
    let mut writer = create_output(path)?;
    write_links(&mut writer, edges)
        .and_then(|_| writer.flush())
        .map_err(|e| ScaffoldError::io(e, path))
}

pub fn write_components_json(path: &Path, components: &[ComponentRecord]) -> Result<()> {
    let mut writer = create_output(path)?;
    serde_json::to_writer_pretty(&mut writer, components)
        .map_err(|e| ScaffoldError::io(e.into(), path))?;
    writer.flush().map_err(|e| ScaffoldError::io(e, path))
}
