use crate::error::{Result, ScaffoldError};
use crate::io::open_input;
use ndarray::Array2;
use std::io::BufRead;
use std::path::Path;

/// One `x y z` row of a LACHESIS `.GLM` contact file: contigs `x` and `y`
/// (indices into the contig size table) with `z` observed links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    pub x: usize,
    pub y: usize,
    pub count: f64,
}

/// Read every contact row. Comment lines and the `X Y Z` header are skipped.
pub fn read_contacts(path: &Path) -> Result<Vec<ContactRecord>> {
    let reader = open_input(path)?;
    let mut contacts = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ScaffoldError::io(e, path))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(ScaffoldError::parse(path, i + 1, "expected 3 fields"));
        }
        if fields[0] == "X" {
            continue;
        }

        let parse_index = |s: &str| {
            s.parse::<usize>()
                .map_err(|e| ScaffoldError::parse(path, i + 1, format!("'{}': {}", s, e)))
        };
        let count = fields[2]
            .parse::<f64>()
            .map_err(|e| ScaffoldError::parse(path, i + 1, format!("'{}': {}", fields[2], e)))?;

        contacts.push(ContactRecord {
            x: parse_index(fields[0])?,
            y: parse_index(fields[1])?,
            count,
        });
    }

    Ok(contacts)
}

/// Dense `n x n` contig contact matrix. Later rows overwrite earlier ones for
/// the same cell; an index outside the table fails.
pub fn read_contact_matrix(path: &Path, n: usize) -> Result<Array2<f64>> {
    let mut matrix = Array2::<f64>::zeros((n, n));
    for c in read_contacts(path)? {
        if c.x >= n || c.y >= n {
            return Err(ScaffoldError::UnknownContig(format!(
                "contact index ({}, {}) outside {} contigs",
                c.x, c.y, n
            )));
        }
        matrix[[c.x, c.y]] = c.count;
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_contact_matrix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "X\tY\tZ").unwrap();
        writeln!(file, "0\t1\t10").unwrap();
        writeln!(file, "1\t0\t10").unwrap();
        writeln!(file, "1\t2\t3").unwrap();

        let m = read_contact_matrix(file.path(), 3).unwrap();
        assert_eq!(m[[0, 1]], 10.0);
        assert_eq!(m[[1, 0]], 10.0);
        assert_eq!(m[[1, 2]], 3.0);
        assert_eq!(m[[2, 1]], 0.0);
    }

    #[test]
    fn test_contact_index_out_of_range() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0\t5\t1").unwrap();
        assert!(matches!(
            read_contact_matrix(file.path(), 3),
            Err(ScaffoldError::UnknownContig(_))
        ));
    }
}
