use crate::error::{Result, ScaffoldError};
use crate::io::bed::AlignmentRecord;
use crate::io::sizes::ContigSizes;
use crate::strand::Strand;

/// Overlapping windows over a record stream: `(r0, r1), (r1, r2), ...`.
///
/// The stream must be sorted by read name so that mates sit next to each
/// other; windows that straddle two fragments are rejected later by the
/// mate-id check.
pub struct AdjacentPairs<I> {
    records: I,
    prev: Option<AlignmentRecord>,
}

pub fn adjacent_pairs<I>(records: I) -> AdjacentPairs<I::IntoIter>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
{
    AdjacentPairs {
        records: records.into_iter(),
        prev: None,
    }
}

impl<I> Iterator for AdjacentPairs<I>
where
    I: Iterator<Item = Result<AlignmentRecord>>,
{
    type Item = Result<(AlignmentRecord, AlignmentRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            match self.prev.replace(current.clone()) {
                Some(prev) => return Some(Ok((prev, current))),
                None => continue,
            }
        }
    }
}

/// Bring a pair into innie `+`/`-` order.
///
/// `++` flips the second record, `--` flips the first, and a `-+` pair is
/// swapped. The `+`/`-` postcondition is checked and a failure is reported as
/// [`ScaffoldError::StrandInvariant`].
pub fn normalize_innie(
    mut a: AlignmentRecord,
    mut b: AlignmentRecord,
    sizes: &ContigSizes,
) -> Result<(AlignmentRecord, AlignmentRecord)> {
    if a.strand == b.strand {
        if b.strand == Strand::Forward {
            b.reverse_complement(sizes)?;
        } else {
            a.reverse_complement(sizes)?;
        }
    }

    if b.strand == Strand::Forward {
        std::mem::swap(&mut a, &mut b);
    }

    if a.strand != Strand::Forward || b.strand != Strand::Reverse {
        return Err(ScaffoldError::StrandInvariant {
            pair_id: a.mate_id().to_string(),
            a_strand: a.strand.as_char(),
            b_strand: b.strand.as_char(),
        });
    }
    Ok((a, b))
}

/// A normalized mate pair spanning two contigs.
///
/// ```text
/// ------===----          -----====----
///       |_ahang            bhang_|
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatePair {
    pub pair_id: String,
    pub a: AlignmentRecord,
    pub b: AlignmentRecord,
    pub ahang: i64,
    pub bhang: i64,
}

impl MatePair {
    /// Normalize `a`/`b` and measure the overhangs past the putative junction.
    pub fn from_records(a: AlignmentRecord, b: AlignmentRecord, sizes: &ContigSizes) -> Result<Self> {
        let pair_id = a.mate_id().to_string();
        let (a, b) = normalize_innie(a, b, sizes)?;

        let size = sizes.get_size(&a.seqid)? as i64;
        let ahang = size - a.start + 1;
        let bhang = b.end;

        Ok(Self {
            pair_id,
            a,
            b,
            ahang,
            bhang,
        })
    }

    pub fn hang_sum(&self) -> i64 {
        self.ahang + self.bhang
    }

    pub fn is_canonical(&self) -> bool {
        self.a.seqid <= self.b.seqid
    }

    /// Put the lexicographically smaller contig id first. `(1+, 2-)` and
    /// `(2+, 1-)` describe the same junction, so both records are
    /// reverse-complemented before the swap. The hangs move with their records.
    pub fn canonicalize(&mut self, sizes: &ContigSizes) -> Result<()> {
        if self.is_canonical() {
            return Ok(());
        }
        self.a.reverse_complement(sizes)?;
        self.b.reverse_complement(sizes)?;
        std::mem::swap(&mut self.a, &mut self.b);
        std::mem::swap(&mut self.ahang, &mut self.bhang);
        Ok(())
    }

    pub fn key(&self) -> (String, String) {
        (self.a.seqid.clone(), self.b.seqid.clone())
    }
}

/// Fragment length of an innie pair on a single contig, or `None` when the
/// mates are not facing each other.
pub fn innie_insert_size(a: &AlignmentRecord, b: &AlignmentRecord) -> Option<i64> {
    if a.strand == b.strand {
        return None;
    }
    let (fwd, rev) = if a.strand == Strand::Forward { (a, b) } else { (b, a) };
    let insert = rev.end - fwd.start + 1;
    (insert > 0).then_some(insert)
}
