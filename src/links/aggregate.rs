use crate::error::Result;
use crate::io::bed::AlignmentRecord;
use crate::io::sizes::ContigSizes;
use crate::links::mates::MatePair;
use ahash::AHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One mate pair supporting a contig-pair junction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub pair_id: String,
    pub hang_sum: i64,
}

#[derive(Debug, Clone, Default)]
struct PairVotes {
    votes: Vec<Vote>,
    hangs: AHashSet<i64>,
}

/// Votes per canonical contig pair, iterated in key order.
///
/// A pair never holds two votes with the same `hang_sum`.
#[derive(Debug, Clone, Default)]
pub struct ContigPairEvidence {
    pairs: BTreeMap<(String, String), PairVotes>,
}

impl ContigPairEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_hang(&self, key: &(String, String), hang_sum: i64) -> bool {
        self.pairs
            .get(key)
            .map_or(false, |p| p.hangs.contains(&hang_sum))
    }

    /// Record a vote; returns `false` when the hang was already present.
    pub fn record(&mut self, key: (String, String), vote: Vote) -> bool {
        let entry = self.pairs.entry(key).or_default();
        if !entry.hangs.insert(vote.hang_sum) {
            return false;
        }
        entry.votes.push(vote);
        true
    }

    pub fn votes(&self, a: &str, b: &str) -> Option<&[Vote]> {
        self.pairs
            .get(&(a.to_string(), b.to_string()))
            .map(|p| p.votes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &[Vote])> {
        self.pairs.iter().map(|(k, p)| (k, p.votes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn total_votes(&self) -> usize {
        self.pairs.values().map(|p| p.votes.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Largest `hang_sum` accepted (inclusive)
    pub max_cutoff: i64,
    /// Only link contigs whose ids share the `_`-delimited prefix
    pub same_prefix: bool,
}

/// What happened to one adjacent-record pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Recorded,
    MateMismatch,
    SameSequence,
    ExceedsCutoff(i64),
    Redundant,
    PrefixMismatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub pairs_seen: usize,
    pub mate_mismatch: usize,
    pub same_sequence: usize,
    pub exceeds_cutoff: usize,
    pub redundant: usize,
    pub prefix_mismatch: usize,
    pub recorded: usize,
}

impl AggregationStats {
    fn count(&mut self, outcome: &PairOutcome) {
        self.pairs_seen += 1;
        match outcome {
            PairOutcome::Recorded => self.recorded += 1,
            PairOutcome::MateMismatch => self.mate_mismatch += 1,
            PairOutcome::SameSequence => self.same_sequence += 1,
            PairOutcome::ExceedsCutoff(_) => self.exceeds_cutoff += 1,
            PairOutcome::Redundant => self.redundant += 1,
            PairOutcome::PrefixMismatch => self.prefix_mismatch += 1,
        }
    }
}

/// Accumulates mate-pair votes between contigs.
pub struct LinkAggregator<'a> {
    sizes: &'a ContigSizes,
    config: AggregatorConfig,
    evidence: ContigPairEvidence,
    stats: AggregationStats,
}

impl<'a> LinkAggregator<'a> {
    pub fn new(sizes: &'a ContigSizes, config: AggregatorConfig) -> Self {
        Self::with_evidence(sizes, config, ContigPairEvidence::new())
    }

    /// Continue accumulating into existing evidence.
    pub fn with_evidence(sizes: &'a ContigSizes, config: AggregatorConfig, evidence: ContigPairEvidence) -> Self {
        Self {
            sizes,
            config,
            evidence,
            stats: AggregationStats::default(),
        }
    }

    /// Run one pair through validation, normalization and the vote filters.
    ///
    /// Only lookup failures and the strand invariant are errors; every other
    /// rejection is an outcome.
    pub fn add_pair(&mut self, a: AlignmentRecord, b: AlignmentRecord) -> Result<PairOutcome> {
        let outcome = self.classify(a, b)?;
        self.stats.count(&outcome);
        Ok(outcome)
    }

    fn classify(&mut self, a: AlignmentRecord, b: AlignmentRecord) -> Result<PairOutcome> {
        if a.mate_id() != b.mate_id() {
            return Ok(PairOutcome::MateMismatch);
        }
        if a.seqid == b.seqid {
            return Ok(PairOutcome::SameSequence);
        }

        let mut pair = MatePair::from_records(a, b, self.sizes)?;
        let hang_sum = pair.hang_sum();
        debug!(
            "{} | {} ahang={} bhang={}",
            pair.a, pair.b, pair.ahang, pair.bhang
        );

        if hang_sum > self.config.max_cutoff {
            debug!("invalid link ({}). skipped.", hang_sum);
            return Ok(PairOutcome::ExceedsCutoff(hang_sum));
        }

        pair.canonicalize(self.sizes)?;
        let key = pair.key();

        if self.evidence.has_hang(&key, hang_sum) {
            return Ok(PairOutcome::Redundant);
        }

        if self.config.same_prefix && id_prefix(&key.0) != id_prefix(&key.1) {
            return Ok(PairOutcome::PrefixMismatch);
        }

        self.evidence.record(
            key,
            Vote {
                pair_id: pair.pair_id,
                hang_sum,
            },
        );
        Ok(PairOutcome::Recorded)
    }

    /// Drain a pair stream, stopping at the first error.
    pub fn consume<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<(AlignmentRecord, AlignmentRecord)>>,
    {
        for pair in pairs {
            let (a, b) = pair?;
            self.add_pair(a, b)?;
        }
        debug!("aggregation: {:?}", self.stats);
        Ok(())
    }

    pub fn stats(&self) -> &AggregationStats {
        &self.stats
    }

    pub fn evidence(&self) -> &ContigPairEvidence {
        &self.evidence
    }

    pub fn into_evidence(self) -> ContigPairEvidence {
        self.evidence
    }
}

fn id_prefix(seqid: &str) -> &str {
    seqid.split('_').next().unwrap_or(seqid)
}
