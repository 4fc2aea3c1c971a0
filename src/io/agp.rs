use crate::error::{Result, ScaffoldError};
use crate::io::create_output;
use crate::io::ordering::{natural_cmp, ContigOrdering};
use crate::io::sizes::ContigSizes;
use ahash::AHashSet;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Gap length that AGP reserves for gaps of unknown size.
pub const UNKNOWN_GAP_LENGTH: u64 = 100;

#[derive(Debug, Clone)]
pub struct AgpConfig {
    pub gap_size: u64,
    /// AGP column 7 for gaps, e.g. `contig` or `scaffold`
    pub gap_type: String,
    /// Linkage evidence written for non-`contig` gaps
    pub evidence: String,
}

impl Default for AgpConfig {
    fn default() -> Self {
        Self {
            gap_size: UNKNOWN_GAP_LENGTH,
            gap_type: "contig".to_string(),
            evidence: "map".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgpLine {
    Component {
        object: String,
        beg: u64,
        end: u64,
        part: usize,
        component: String,
        length: u64,
        /// `+`, `-` or `?` when unoriented
        orientation: char,
    },
    Gap {
        object: String,
        beg: u64,
        end: u64,
        part: usize,
        length: u64,
        gap_type: String,
        evidence: String,
    },
}

impl fmt::Display for AgpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgpLine::Component {
                object,
                beg,
                end,
                part,
                component,
                length,
                orientation,
            } => write!(
                f,
                "{}\t{}\t{}\t{}\tW\t{}\t1\t{}\t{}",
                object, beg, end, part, component, length, orientation
            ),
            AgpLine::Gap {
                object,
                beg,
                end,
                part,
                length,
                gap_type,
                evidence,
            } => {
                let kind = if *length == UNKNOWN_GAP_LENGTH { 'U' } else { 'N' };
                let (linkage, evidence) = if gap_type == "contig" {
                    ("no", "na")
                } else {
                    ("yes", evidence.as_str())
                };
                write!(
                    f,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    object, beg, end, part, kind, length, gap_type, linkage, evidence
                )
            }
        }
    }
}

/// Lay out each ordering as one AGP object, contigs separated by gaps.
///
/// Contigs in `sizes` that no ordering places become single-component
/// objects, in natural name order, with unknown orientation.
pub fn build_agp(orderings: &[ContigOrdering], sizes: &ContigSizes, config: &AgpConfig) -> Result<Vec<AgpLine>> {
    let mut lines = Vec::new();
    let mut placed: AHashSet<&str> = AHashSet::new();

    for ordering in orderings {
        let mut pos = 0u64;
        let mut part = 0;
        for (i, entry) in ordering.entries.iter().enumerate() {
            if i > 0 && config.gap_size > 0 {
                part += 1;
                lines.push(AgpLine::Gap {
                    object: ordering.name.clone(),
                    beg: pos + 1,
                    end: pos + config.gap_size,
                    part,
                    length: config.gap_size,
                    gap_type: config.gap_type.clone(),
                    evidence: config.evidence.clone(),
                });
                pos += config.gap_size;
            }

            let length = sizes.get_size(&entry.contig_name)?;
            part += 1;
            lines.push(AgpLine::Component {
                object: ordering.name.clone(),
                beg: pos + 1,
                end: pos + length,
                part,
                component: entry.contig_name.clone(),
                length,
                orientation: entry.strand.as_char(),
            });
            pos += length;
            placed.insert(entry.contig_name.as_str());
        }
    }

    let mut singletons: Vec<(&str, u64)> = sizes
        .iter()
        .filter(|(name, _)| !placed.contains(name))
        .collect();
    singletons.sort_by(|a, b| natural_cmp(a.0, b.0));

    for (name, length) in singletons {
        lines.push(AgpLine::Component {
            object: name.to_string(),
            beg: 1,
            end: length,
            part: 1,
            component: name.to_string(),
            length,
            orientation: '?',
        });
    }

    Ok(lines)
}

pub fn write_agp(path: &Path, lines: &[AgpLine]) -> Result<()> {
    let mut writer = create_output(path)?;
    for line in lines {
        writeln!(writer, "{}", line).map_err(|e| ScaffoldError::io(e, path))?;
    }
    writer.flush().map_err(|e| ScaffoldError::io(e, path))?;
    Ok(())
}
