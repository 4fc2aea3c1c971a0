use crate::error::{Result, ScaffoldError};
use crate::io::open_input;
use crate::strand::Strand;
use std::cmp::Ordering;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// One contig placement in a LACHESIS `.ordering` file.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingEntry {
    pub contig_id: String,
    pub contig_name: String,
    pub strand: Strand,
    pub orientation_score: String,
    pub gap_after: String,
}

impl OrderingEntry {
    /// Parse `id name[|...] rc score gap`, where `rc` is `0` (forward) or `1`.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(format!("expected 5 fields, found {}", fields.len()));
        }
        let strand = match fields[2] {
            "0" => Strand::Forward,
            "1" => Strand::Reverse,
            other => return Err(format!("contig_rc must be 0 or 1, found '{}'", other)),
        };
        let contig_name = fields[1].split('|').next().unwrap_or(fields[1]);

        Ok(Self {
            contig_id: fields[0].to_string(),
            contig_name: contig_name.to_string(),
            strand,
            orientation_score: fields[3].to_string(),
            gap_after: fields[4].to_string(),
        })
    }
}

/// A single chromosome group's contig ordering.
#[derive(Debug, Clone)]
pub struct ContigOrdering {
    /// Group name, the file stem up to the first `.`
    pub name: String,
    pub entries: Vec<OrderingEntry>,
}

impl ContigOrdering {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = open_input(path)?;
        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ScaffoldError::io(e, path))?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let entry = OrderingEntry::parse(&line)
                .map_err(|message| ScaffoldError::parse(path, i + 1, message))?;
            entries.push(entry);
        }

        Ok(Self {
            name: group_name(path),
            entries,
        })
    }

    pub fn contig_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.contig_name.clone()).collect()
    }

    /// `(name, strand)` pairs in placement order.
    pub fn placements(&self) -> Vec<(String, Strand)> {
        self.entries
            .iter()
            .map(|e| (e.contig_name.clone(), e.strand))
            .collect()
    }
}

fn group_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// All `*.ordering` files in `dir`, in natural order (`group2` before `group10`).
pub fn find_ordering_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ScaffoldError::io(e, dir))? {
        let path = entry.map_err(|e| ScaffoldError::io(e, dir))?.path();
        if path.extension().map_or(false, |ext| ext == "ordering") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
    Ok(files)
}

/// Compare strings treating embedded digit runs as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_number(&mut a);
                let nb = take_number(&mut b);
                let trimmed_a = na.trim_start_matches('0');
                let trimmed_b = nb.trim_start_matches('0');
                let ord = trimmed_a
                    .len()
                    .cmp(&trimmed_b.len())
                    .then_with(|| trimmed_a.cmp(trimmed_b));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_ordering_entry() {
        let entry = OrderingEntry::parse("12\tctg_5|arrow\t1\t0.93\t100").unwrap();
        assert_eq!(entry.contig_id, "12");
        assert_eq!(entry.contig_name, "ctg_5");
        assert_eq!(entry.strand, Strand::Reverse);
        assert_eq!(entry.gap_after, "100");

        assert!(OrderingEntry::parse("12\tctg_5\t2\t0.9\t100").is_err());
        assert!(OrderingEntry::parse("12\tctg_5").is_err());
    }

    #[test]
    fn test_read_ordering_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("group3.ordering");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# ContigOrdering for group3").unwrap();
        writeln!(file, "0\tctgA\t0\t1.0\t100").unwrap();
        writeln!(file, "1\tctgB\t1\t0.5\t100").unwrap();
        drop(file);

        let ordering = ContigOrdering::from_path(&path).unwrap();
        assert_eq!(ordering.name, "group3");
        assert_eq!(ordering.contig_names(), vec!["ctgA", "ctgB"]);
        assert_eq!(ordering.placements()[1].1, Strand::Reverse);
    }

    #[test]
    fn test_ordering_parse_error_has_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("group1.ordering");
        std::fs::write(&path, "#header\n0\tctgA\t0\t1.0\t100\n1\tctgB\n").unwrap();

        assert!(matches!(
            ContigOrdering::from_path(&path),
            Err(ScaffoldError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_natural_order() {
        let mut names = vec!["group10", "group2", "group1", "group02b"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["group1", "group2", "group02b", "group10"]);
    }
}
