//! Multi-pair segment lists shared by CDS and exon features.

use crate::codon;
use crate::interval::Interval;
use crate::strand::Strand;

/// Ordered index pairs with a parallel identifier and score per pair.
///
/// Pairs are kept in transcript direction, so on the reverse strand the
/// first pair is the one with the highest coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    pub pairs: Vec<Interval>,
    pub identifiers: Vec<String>,
    pub scores: Vec<Option<f64>>,
}

/// What happened to one pair during [`Segments::invalidate_region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairFate {
    Kept,
    Removed,
    /// The window falls strictly inside the pair; the pair is left as is
    /// but no longer describes a contiguous valid stretch.
    Interrupted,
}

impl Segments {
    #[must_use]
    pub fn new(pair: Interval, identifier: String, score: Option<f64>) -> Self {
        Self {
            pairs: vec![pair],
            identifiers: vec![identifier],
            scores: vec![score],
        }
    }

    pub fn push(&mut self, pair: Interval, identifier: String, score: Option<f64>) {
        self.pairs.push(pair);
        self.identifiers.push(identifier);
        self.scores.push(score);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Identifier for pair `i`, falling back to the first one recorded.
    #[must_use]
    pub fn identifier(&self, i: usize) -> &str {
        self.identifiers
            .get(i)
            .or_else(|| self.identifiers.first())
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn score(&self, i: usize) -> Option<f64> {
        self.scores.get(i).copied().flatten()
    }

    /// Sum of pair lengths, saturating on absurd coordinates.
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.pairs
            .iter()
            .map(Interval::length)
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn longest(&self) -> u64 {
        self.pairs.iter().map(Interval::length).max().unwrap_or(0)
    }

    #[must_use]
    pub fn shortest(&self) -> u64 {
        self.pairs.iter().map(Interval::length).min().unwrap_or(0)
    }

    /// Gap lengths between consecutive pairs, in stored order.
    pub fn gaps(&self) -> impl Iterator<Item = u64> + '_ {
        self.pairs.windows(2).map(|w| {
            let (left, right) = if w[0].start <= w[1].start {
                (w[0], w[1])
            } else {
                (w[1], w[0])
            };
            (right.start - left.stop - 1).max(0).unsigned_abs()
        })
    }

    /// Smallest and largest coordinate over all pairs.
    #[must_use]
    pub fn span(&self) -> Option<Interval> {
        let start = self.pairs.iter().map(|p| p.start).min()?;
        let stop = self.pairs.iter().map(|p| p.stop).max()?;
        Some(Interval::new(start, stop))
    }

    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        for pair in &mut self.pairs {
            pair.shift(offset, threshold);
        }
    }

    /// Remove pair `i` along with its identifier and score.
    pub(crate) fn remove(&mut self, i: usize) {
        self.pairs.remove(i);
        if i < self.identifiers.len() && self.identifiers.len() > 1 {
            self.identifiers.remove(i);
        }
        if i < self.scores.len() {
            self.scores.remove(i);
        }
    }

    /// Mark `[start, stop]` invalid. Pairs inside the window are removed,
    /// pairs with one end inside are clipped back to the window edge, and a
    /// pair with the whole window in its interior is reported as
    /// [`PairFate::Interrupted`]. Returns the fate of each original pair, in
    /// order.
    pub(crate) fn invalidate_region(&mut self, start: i64, stop: i64) -> Vec<PairFate> {
        let window = Interval::new(start, stop);
        let mut fates = Vec::with_capacity(self.pairs.len());
        let mut i = 0;
        while i < self.pairs.len() {
            if window.contains(&self.pairs[i]) {
                self.remove(i);
                fates.push(PairFate::Removed);
                continue;
            }
            let pair = &mut self.pairs[i];
            if pair.start < start && stop < pair.stop {
                fates.push(PairFate::Interrupted);
                i += 1;
                continue;
            }
            if window.contains_pos(pair.start) {
                pair.start = stop + 1;
            } else if window.contains_pos(pair.stop) {
                pair.stop = start - 1;
            }
            fates.push(PairFate::Kept);
            i += 1;
        }
        fates
    }

    /// Concatenate the bases under every pair in stored order, reverse
    /// complementing the joined sequence once on the reverse strand.
    /// Pairs that fall outside `bases` contribute nothing.
    #[must_use]
    pub fn extract(&self, bases: &[u8], strand: Strand) -> Vec<u8> {
        let capacity = self.total_length().min(bases.len() as u64);
        let mut seq = Vec::with_capacity(capacity as usize);
        for pair in &self.pairs {
            if let Some(sub) = crate::sequence::subsequence(bases, pair.start, pair.stop) {
                seq.extend_from_slice(sub);
            }
        }
        if strand.is_reverse() {
            seq = codon::reverse_complement(&seq);
        }
        seq
    }
}
