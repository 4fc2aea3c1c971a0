//! Mate-pair link aggregation between contigs.

pub mod aggregate;
pub mod insert_size;
pub mod mates;

pub use aggregate::{AggregationStats, AggregatorConfig, ContigPairEvidence, LinkAggregator, PairOutcome, Vote};
pub use insert_size::InsertSizeStats;
pub use mates::{adjacent_pairs, MatePair};
