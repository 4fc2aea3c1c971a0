use std::path::PathBuf;

/// Errors raised while building or scoring scaffolds.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("parse error in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A contig named by the input is absent from the size or matrix index.
    #[error("unknown contig: {0}")]
    UnknownContig(String),

    /// Strand normalization did not produce a `+`/`-` pair. This is a logic
    /// fault, never a data problem.
    #[error("mate pair {pair_id} normalized to {a_strand}{b_strand}, expected +-")]
    StrandInvariant {
        pair_id: String,
        a_strand: char,
        b_strand: char,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("plotting failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    /// Wrap an `io::Error` with the path being read or written.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ScaffoldError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: PathBuf::from("<unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ScaffoldError::parse("groups/g1.ordering", 7, "expected 5 fields");
        assert_eq!(
            err.to_string(),
            "parse error in groups/g1.ordering at line 7: expected 5 fields"
        );

        let err = ScaffoldError::StrandInvariant {
            pair_id: "read42/".to_string(),
            a_strand: '-',
            b_strand: '-',
        };
        assert!(err.to_string().contains("read42/"));
        assert!(err.to_string().contains("--"));
    }
}
