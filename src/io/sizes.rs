use crate::error::{Result, ScaffoldError};
use crate::io::open_input;
use ahash::AHashMap;
use bio::io::fasta;
use std::io::BufRead;
use std::path::Path;

/// Contig lengths in input order, with a name index.
///
/// Input order matters: GLM contact files refer to contigs by their position
/// in this table.
#[derive(Debug, Clone, Default)]
pub struct ContigSizes {
    names: Vec<String>,
    lengths: Vec<u64>,
    index: AHashMap<String, usize>,
}

impl ContigSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from FASTA (`>` first byte) or a two-column `name<TAB>length` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = open_input(path)?;
        let is_fasta = reader
            .fill_buf()
            .map_err(|e| ScaffoldError::io(e, path))?
            .first()
            == Some(&b'>');

        if is_fasta {
            Self::read_fasta(reader, path)
        } else {
            Self::read_table(reader, path)
        }
    }

    fn read_fasta(reader: Box<dyn BufRead>, path: &Path) -> Result<Self> {
        let mut sizes = Self::new();
        for record in fasta::Reader::new(reader).records() {
            let record = record.map_err(|e| ScaffoldError::io(e, path))?;
            sizes.insert(record.id(), record.seq().len() as u64);
        }
        Ok(sizes)
    }

    fn read_table(reader: Box<dyn BufRead>, path: &Path) -> Result<Self> {
        let mut sizes = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ScaffoldError::io(e, path))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (name, length) = match (fields.next(), fields.next()) {
                (Some(name), Some(length)) => (name, length),
                _ => return Err(ScaffoldError::parse(path, i + 1, "expected name and length")),
            };
            let length = length
                .parse::<u64>()
                .map_err(|e| ScaffoldError::parse(path, i + 1, e.to_string()))?;
            sizes.insert(name, length);
        }
        Ok(sizes)
    }

    /// Add a contig; a repeated name keeps its first position but takes the new length.
    pub fn insert(&mut self, name: &str, length: u64) {
        match self.index.get(name) {
            Some(&i) => self.lengths[i] = length,
            None => {
                self.index.insert(name.to_string(), self.names.len());
                self.names.push(name.to_string());
                self.lengths.push(length);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ScaffoldError::UnknownContig(name.to_string()))
    }

    /// Length of `name`, ignoring any trailing reverse markers (`-`).
    pub fn get_size(&self, name: &str) -> Result<u64> {
        let i = self.index_of(name.trim_end_matches('-'))?;
        Ok(self.lengths[i])
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.names.iter().map(String::as_str).zip(self.lengths.iter().copied())
    }
}
