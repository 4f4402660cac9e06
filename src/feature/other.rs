//! Descriptive single-pair features: start and stop codon markers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtherFeatureKind {
    StartCodon,
    StopCodon,
}

impl OtherFeatureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartCodon => "start_codon",
            Self::StopCodon => "stop_codon",
        }
    }
}

impl FromStr for OtherFeatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_codon" => Ok(Self::StartCodon),
            "stop_codon" => Ok(Self::StopCodon),
            _ => Err(Error::Parse(format!("not a codon marker type: {s}"))),
        }
    }
}

impl fmt::Display for OtherFeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A start or stop codon marker attached to a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherFeature {
    pub kind: OtherFeatureKind,
    pub identifier: String,
    pub indices: Interval,
}

impl OtherFeature {
    #[must_use]
    pub fn new(kind: OtherFeatureKind, identifier: String, indices: Interval) -> Self {
        Self {
            kind,
            identifier,
            indices,
        }
    }

    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        self.indices.shift(offset, threshold);
    }
}
