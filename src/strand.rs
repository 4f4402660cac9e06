//! Strand orientation for genomic features.

use std::fmt;

/// Strand orientation of a genomic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// Parse from GFF3 column 7. "-" is reverse; everything else is forward.
    #[must_use]
    pub fn from_gff3(s: &str) -> Self {
        if s == "-" {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }

    /// Order a coordinate pair the way a feature table prints it:
    /// `(start, stop)` on the forward strand, `(stop, start)` on the reverse.
    #[must_use]
    pub fn oriented(self, start: i64, stop: i64) -> (i64, i64) {
        match self {
            Self::Forward => (start, stop),
            Self::Reverse => (stop, start),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}
