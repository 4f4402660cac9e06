//! Exon segments.

use crate::interval::Interval;
use crate::strand::Strand;

use super::segment::{PairFate, Segments};

/// All exons of one transcript, kept as a single segmented feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Exon {
    pub segments: Segments,
}

impl Exon {
    #[must_use]
    pub fn new(pair: Interval, identifier: String, score: Option<f64>) -> Self {
        Self {
            segments: Segments::new(pair, identifier, score),
        }
    }

    pub fn add_segment(&mut self, pair: Interval, identifier: String, score: Option<f64>) {
        self.segments.push(pair, identifier, score);
    }

    #[must_use]
    pub fn pairs(&self) -> &[Interval] {
        &self.segments.pairs
    }

    /// Spliced transcript sequence, read 5'→3' on `strand`.
    #[must_use]
    pub fn extract_sequence(&self, bases: &[u8], strand: Strand) -> Vec<u8> {
        self.segments.extract(bases, strand)
    }

    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        self.segments.adjust_indices(offset, threshold);
    }

    /// Returns false when no exon pair survives the invalidated window or
    /// the window lands inside an exon.
    pub fn invalidate_region(&mut self, start: i64, stop: i64) -> bool {
        let fates = self.segments.invalidate_region(start, stop);
        !self.segments.is_empty() && !fates.contains(&PairFate::Interrupted)
    }

    #[must_use]
    pub fn num_exons(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn num_introns(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}
