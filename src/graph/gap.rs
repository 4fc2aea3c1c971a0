use crate::links::aggregate::{ContigPairEvidence, Vote};
use crate::range::ranges_intersect;
use crate::strand::Strand;
use serde::Serialize;
use tracing::{info, warn};

/// Consensus gap between two linked contigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapEstimate {
    /// Intersection of all per-vote intervals. Not necessarily `min <= max`
    /// when it comes from a single vote.
    Interval { min: i64, max: i64 },
    /// Per-vote intervals do not intersect.
    Conflict,
}

impl GapEstimate {
    pub fn is_conflict(&self) -> bool {
        matches!(self, GapEstimate::Conflict)
    }
}

/// Oriented link between two contigs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkageEdge {
    pub seq_a: String,
    pub seq_b: String,
    pub orientation: Strand,
    pub gap: GapEstimate,
    pub votes: usize,
}

#[derive(Debug, Clone)]
pub struct GapConfig {
    /// Minimum votes for a contig pair to become an edge
    pub links: usize,
    /// Lower insert-size percentile
    pub p1: i64,
    /// Upper insert-size percentile
    pub p2: i64,
}

/// Edges plus bookkeeping from one emission pass.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    pub edges: Vec<LinkageEdge>,
    pub below_threshold: usize,
    pub conflicts: usize,
}

/// Gap interval implied by one vote: `[max(p1 - hang, 0), p2 - hang]`.
pub fn vote_gap(hang_sum: i64, p1: i64, p2: i64) -> (i64, i64) {
    ((p1 - hang_sum).max(0), p2 - hang_sum)
}

/// `-` when exactly one of the ids carries the reverse marker.
pub fn edge_orientation(seq_a: &str, seq_b: &str) -> Strand {
    if seq_a.ends_with('-') != seq_b.ends_with('-') {
        Strand::Reverse
    } else {
        Strand::Forward
    }
}

pub fn consensus_gap(votes: &[Vote], p1: i64, p2: i64) -> GapEstimate {
    let gaps: Vec<(i64, i64)> = votes.iter().map(|v| vote_gap(v.hang_sum, p1, p2)).collect();
    match ranges_intersect(&gaps) {
        Some((min, max)) => GapEstimate::Interval { min, max },
        None => GapEstimate::Conflict,
    }
}

/// Turn aggregated votes into linkage edges, in canonical key order.
pub fn estimate_edges(evidence: &ContigPairEvidence, config: &GapConfig) -> EdgeSet {
    let mut set = EdgeSet::default();

    for ((seq_a, seq_b), votes) in evidence.iter() {
        if votes.len() < config.links {
            set.below_threshold += 1;
            continue;
        }

        let orientation = edge_orientation(seq_a, seq_b);
        let gap = consensus_gap(votes, config.p1, config.p2);
        let (a, b) = (seq_a.trim_end_matches('-'), seq_b.trim_end_matches('-'));

        if gap.is_conflict() {
            set.conflicts += 1;
            let hangs: Vec<i64> = votes.iter().map(|v| v.hang_sum).collect();
            warn!(
                "{} {} ({}): conflicting gap evidence from hangs {:?}",
                a, b, orientation, hangs
            );
        }

        set.edges.push(LinkageEdge {
            seq_a: a.to_string(),
            seq_b: b.to_string(),
            orientation,
            gap,
            votes: votes.len(),
        });
    }

    info!(
        "Emitted {} edges ({} below {} links, {} conflicting)",
        set.edges.len(),
        set.below_threshold,
        config.links,
        set.conflicts
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(id: &str, hang_sum: i64) -> Vote {
        Vote {
            pair_id: id.to_string(),
            hang_sum,
        }
    }

    fn key(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_vote_gap_clamps_low_end() {
        assert_eq!(vote_gap(300, 200, 800), (0, 500));
        assert_eq!(vote_gap(100, 200, 800), (100, 700));
        // Hang past the upper percentile inverts the interval
        assert_eq!(vote_gap(900, 200, 800), (0, -100));
    }

    #[test]
    fn test_edge_orientation() {
        assert_eq!(edge_orientation("a", "b"), Strand::Forward);
        assert_eq!(edge_orientation("a-", "b-"), Strand::Forward);
        assert_eq!(edge_orientation("a-", "b"), Strand::Reverse);
        assert_eq!(edge_orientation("a", "b-"), Strand::Reverse);
    }

    #[test]
    fn test_estimate_edges() {
        let mut evidence = ContigPairEvidence::new();
        evidence.record(key("ctgA", "ctgB-"), vote("r1/", 200));
        evidence.record(key("ctgA", "ctgB-"), vote("r2/", 250));
        evidence.record(key("ctgA", "ctgC"), vote("r3/", 100));

        let config = GapConfig {
            links: 2,
            p1: 100,
            p2: 600,
        };
        let set = estimate_edges(&evidence, &config);

        assert_eq!(set.edges.len(), 1);
        assert_eq!(set.below_threshold, 1);
        let edge = &set.edges[0];
        assert_eq!((edge.seq_a.as_str(), edge.seq_b.as_str()), ("ctgA", "ctgB"));
        assert_eq!(edge.orientation, Strand::Reverse);
        assert_eq!(edge.votes, 2);
        // [0, 400] ∩ [0, 350]
        assert_eq!(edge.gap, GapEstimate::Interval { min: 0, max: 350 });
    }

    #[test]
    fn test_conflicting_votes_are_reported() {
        let mut evidence = ContigPairEvidence::new();
        evidence.record(key("ctgA", "ctgB"), vote("r1/", 10));
        evidence.record(key("ctgA", "ctgB"), vote("r2/", 700));

        let config = GapConfig {
            links: 2,
            p1: 500,
            p2: 600,
        };
        // [490, 590] vs inverted [0, -100] -> normalized [-100, 0]: disjoint
        let set = estimate_edges(&evidence, &config);
        assert_eq!(set.conflicts, 1);
        assert_eq!(set.edges[0].gap, GapEstimate::Conflict);
    }
}
