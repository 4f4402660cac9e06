//! Coding segments (CDS).

use crate::interval::Interval;
use crate::strand::Strand;

use super::segment::{PairFate, Segments};

/// The coding region of one transcript, possibly spliced over several pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cds {
    pub strand: Strand,
    pub segments: Segments,
    /// Reading-frame phase per pair; same length as `segments.pairs`.
    pub phases: Vec<Option<u8>>,
}

impl Cds {
    #[must_use]
    pub fn new(
        pair: Interval,
        identifier: String,
        score: Option<f64>,
        phase: Option<u8>,
        strand: Strand,
    ) -> Self {
        Self {
            strand,
            segments: Segments::new(pair, identifier, score),
            phases: vec![phase],
        }
    }

    /// Append the pair described by a repeated CDS line.
    pub fn add_segment(
        &mut self,
        pair: Interval,
        identifier: String,
        score: Option<f64>,
        phase: Option<u8>,
    ) {
        self.segments.push(pair, identifier, score);
        self.phases.push(phase);
    }

    #[must_use]
    pub fn pairs(&self) -> &[Interval] {
        &self.segments.pairs
    }

    #[must_use]
    pub fn phase(&self, i: usize) -> Option<u8> {
        self.phases.get(i).copied().flatten()
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.segments.total_length()
    }

    /// Coordinates of the first three coding bases.
    #[must_use]
    pub fn start_indices(&self, strand: Strand) -> Option<Interval> {
        let first = self.segments.pairs.first()?;
        Some(match strand {
            Strand::Forward => Interval::new(first.start, first.start + 2),
            Strand::Reverse => Interval::new(first.stop - 2, first.stop),
        })
    }

    /// Coordinates of the last three coding bases.
    #[must_use]
    pub fn stop_indices(&self, strand: Strand) -> Option<Interval> {
        let last = self.segments.pairs.last()?;
        Some(match strand {
            Strand::Forward => Interval::new(last.stop - 2, last.stop),
            Strand::Reverse => Interval::new(last.start, last.start + 2),
        })
    }

    /// Spliced coding sequence, read 5'→3' on `strand`.
    #[must_use]
    pub fn extract_sequence(&self, bases: &[u8], strand: Strand) -> Vec<u8> {
        self.segments.extract(bases, strand)
    }

    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        self.segments.adjust_indices(offset, threshold);
    }

    /// Returns false when no coding pair survives the invalidated window or
    /// the window lands inside a coding pair.
    pub fn invalidate_region(&mut self, start: i64, stop: i64) -> bool {
        let fates = self.segments.invalidate_region(start, stop);
        let mut kept = fates.iter().map(|fate| *fate != PairFate::Removed);
        self.phases.retain(|_| kept.next().unwrap_or(true));
        !self.segments.is_empty() && !fates.contains(&PairFate::Interrupted)
    }

    /// Drop the leading pair when it is shorter than `min_length` bases.
    /// A single-pair CDS is left alone. Returns whether a pair was dropped.
    pub fn remove_first_segment_if_shorter_than(&mut self, min_length: u64) -> bool {
        let Some(first) = self.segments.pairs.first() else {
            return false;
        };
        if self.segments.len() < 2 || first.length() >= min_length {
            return false;
        }
        self.segments.remove(0);
        if !self.phases.is_empty() {
            self.phases.remove(0);
        }
        true
    }

    /// Shortest coding pair.
    #[must_use]
    pub fn shortest_segment(&self) -> u64 {
        self.segments.shortest()
    }
}
