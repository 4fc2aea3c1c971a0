use crate::error::{Result, ScaffoldError};
use crate::io::bed::AlignmentRecord;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};
use tracing::info;

use super::mates::innie_insert_size;

/// Library insert-size summary from same-contig innie pairs.
///
/// `p0` is the median, `p1` and `p2` the 1st and 99th percentiles. `p1`/`p2`
/// bound per-vote gap estimates and `p2` doubles as the default hang cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertSizeStats {
    pub count: usize,
    pub mean: f64,
    pub stdev: f64,
    pub p0: i64,
    pub p1: i64,
    pub p2: i64,
}

impl InsertSizeStats {
    pub fn from_sizes(sizes: &[i64]) -> Result<Self> {
        if sizes.is_empty() {
            return Err(ScaffoldError::InsufficientData(
                "no same-contig innie pairs to estimate the insert size; pass --cutoff and percentiles".to_string(),
            ));
        }

        let values: Vec<f64> = sizes.iter().map(|&s| s as f64).collect();
        let mean = values.iter().mean();
        let stdev = values.iter().population_std_dev();

        let mut data = Data::new(values);
        let p0 = data.percentile(50).round() as i64;
        let p1 = data.percentile(1).round() as i64;
        let p2 = data.percentile(99).round() as i64;

        Ok(Self {
            count: sizes.len(),
            mean,
            stdev,
            p0,
            p1,
            p2,
        })
    }

    /// Hang cutoff: an explicit positive cutoff wins, otherwise `p2`.
    pub fn max_cutoff(&self, cutoff: i64) -> i64 {
        if cutoff > 0 {
            cutoff
        } else {
            self.p2
        }
    }

    /// Replace the percentile bounds with user supplied values.
    pub fn with_bounds(mut self, p1: Option<i64>, p2: Option<i64>) -> Self {
        if let Some(p1) = p1 {
            self.p1 = p1;
        }
        if let Some(p2) = p2 {
            self.p2 = p2;
        }
        self
    }
}

/// Insert sizes of mate pairs placed on a single contig. Sizes above a
/// positive `cutoff` are dropped.
pub fn collect_insert_sizes<I>(pairs: I, cutoff: i64) -> Result<Vec<i64>>
where
    I: IntoIterator<Item = Result<(AlignmentRecord, AlignmentRecord)>>,
{
    let mut sizes = Vec::new();
    for pair in pairs {
        let (a, b) = pair?;
        if a.seqid != b.seqid || a.mate_id() != b.mate_id() {
            continue;
        }
        if let Some(insert) = innie_insert_size(&a, &b) {
            if cutoff <= 0 || insert <= cutoff {
                sizes.push(insert);
            }
        }
    }
    Ok(sizes)
}

pub fn estimate<I>(pairs: I, cutoff: i64) -> Result<InsertSizeStats>
where
    I: IntoIterator<Item = Result<(AlignmentRecord, AlignmentRecord)>>,
{
    let stats = InsertSizeStats::from_sizes(&collect_insert_sizes(pairs, cutoff)?)?;
    info!(
        "Insert size from {} pairs: mean={:.1} stdev={:.1} p0={} p1={} p2={}",
        stats.count, stats.mean, stats.stdev, stats.p0, stats.p1, stats.p2
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(seqid: &str, start0: i64, end: i64, accn: &str, strand: &str) -> AlignmentRecord {
        AlignmentRecord::parse(&format!("{}\t{}\t{}\t{}\t60\t{}", seqid, start0, end, accn, strand)).unwrap()
    }

    #[test]
    fn test_stats_from_sizes() {
        let sizes: Vec<i64> = (1..=100).map(|i| i * 10).collect();
        let stats = InsertSizeStats::from_sizes(&sizes).unwrap();
        assert_eq!(stats.count, 100);
        assert!((stats.mean - 505.0).abs() < 1e-9);
        assert!(stats.p1 <= stats.p0 && stats.p0 <= stats.p2);
        assert!(stats.p1 >= 10 && stats.p1 <= 20);
        assert!(stats.p2 >= 990 && stats.p2 <= 1000);
        assert_eq!(stats.max_cutoff(0), stats.p2);
        assert_eq!(stats.max_cutoff(750), 750);
    }

    #[test]
    fn test_empty_sizes_is_insufficient() {
        assert!(matches!(
            InsertSizeStats::from_sizes(&[]),
            Err(ScaffoldError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_collect_only_same_contig_innies() {
        let pairs = || {
            vec![
                Ok((rec("ctgA", 99, 200, "f1/1", "+"), rec("ctgA", 400, 500, "f1/2", "-"))),
                Ok((rec("ctgA", 99, 200, "f2/1", "+"), rec("ctgB", 400, 500, "f2/2", "-"))),
                Ok((rec("ctgA", 99, 200, "f3/1", "+"), rec("ctgA", 400, 500, "f4/2", "-"))),
                Ok((rec("ctgA", 0, 100, "f5/1", "-"), rec("ctgA", 2000, 2100, "f5/2", "+"))),
            ]
        };
        let sizes = collect_insert_sizes(pairs(), 0).unwrap();
        assert_eq!(sizes, vec![401]);

        let sizes = collect_insert_sizes(pairs(), 400).unwrap();
        assert!(sizes.is_empty());
    }

    #[test]
    fn test_user_bounds_override() {
        let stats = InsertSizeStats::from_sizes(&[300, 400, 500])
            .unwrap()
            .with_bounds(Some(100), None);
        assert_eq!(stats.p1, 100);
        assert_eq!(stats.p2, InsertSizeStats::from_sizes(&[300, 400, 500]).unwrap().p2);
    }
}
