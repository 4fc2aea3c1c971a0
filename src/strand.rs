use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Orientation of a read, a contig placement, or a linkage edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn flip(self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }

    /// Relative orientation of two placements: `+` when they agree.
    pub fn relative(self, other: Strand) -> Strand {
        if self == other {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(format!("invalid strand '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parse_and_flip() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap().flip(), Strand::Forward);
        assert!(".".parse::<Strand>().is_err());
        assert_eq!(Strand::Reverse.relative(Strand::Reverse), Strand::Forward);
        assert_eq!(Strand::Forward.relative(Strand::Reverse), Strand::Reverse);
    }
}
