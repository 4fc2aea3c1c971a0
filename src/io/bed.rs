use crate::error::{Result, ScaffoldError};
use crate::io::open_input;
use crate::io::sizes::ContigSizes;
use crate::strand::Strand;
use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One read placement from a BED6 line.
///
/// `start` is stored 1-based (BED start + 1) and `end` as given, so both are
/// inclusive. A trailing `-` on `seqid` marks a reverse-complemented view of
/// the contig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub seqid: String,
    pub start: i64,
    pub end: i64,
    pub accn: String,
    pub score: String,
    pub strand: Strand,
}

impl AlignmentRecord {
    /// Parse a BED6 line. Returns `None` for lines that lack the needed fields.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 6 {
            return None;
        }
        let start = fields[1].parse::<i64>().ok()?;
        let end = fields[2].parse::<i64>().ok()?;
        let strand = fields[5].parse::<Strand>().ok()?;
        if fields[3].is_empty() {
            return None;
        }

        Some(Self {
            seqid: fields[0].to_string(),
            start: start + 1,
            end,
            accn: fields[3].to_string(),
            score: fields[4].to_string(),
            strand,
        })
    }

    /// Read name without its trailing mate suffix character.
    pub fn mate_id(&self) -> &str {
        match self.accn.char_indices().last() {
            Some((i, _)) => &self.accn[..i],
            None => "",
        }
    }

    /// Contig name with reverse markers stripped.
    pub fn base_seqid(&self) -> &str {
        self.seqid.trim_end_matches('-')
    }

    pub fn is_reversed(&self) -> bool {
        self.seqid.ends_with('-')
    }

    /// Re-express this placement on the reverse complement of its contig.
    ///
    /// Coordinates are mirrored, the strand flips, and the reverse marker on
    /// `seqid` toggles.
    pub fn reverse_complement(&mut self, sizes: &ContigSizes) -> Result<()> {
        let size = sizes.get_size(&self.seqid)? as i64;

        if self.is_reversed() {
            self.seqid.pop();
        } else {
            self.seqid.push('-');
        }

        let start = size - self.end + 1;
        let end = size - self.start + 1;
        self.start = start;
        self.end = end;
        self.strand = self.strand.flip();
        Ok(())
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.start - 1,
            self.end,
            self.accn,
            self.score,
            self.strand
        )
    }
}

/// Streaming BED reader. Malformed lines are skipped and counted.
pub struct BedReader {
    path: PathBuf,
    lines: std::io::Lines<Box<dyn BufRead>>,
    line_no: usize,
    skipped: usize,
}

impl BedReader {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            lines: open_input(path)?.lines(),
            line_no: 0,
            skipped: 0,
        })
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for BedReader {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ScaffoldError::io(e, &self.path))),
            };
            self.line_no += 1;

            if line.is_empty() || line.starts_with('#') || line.starts_with("track") {
                continue;
            }
            match AlignmentRecord::parse(&line) {
                Some(record) => return Some(Ok(record)),
                None => {
                    self.skipped += 1;
                    debug!("{}:{}: malformed BED line skipped", self.path.display(), self.line_no);
                }
            }
        }
    }
}
