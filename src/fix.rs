//! Automatic fixes applied to a working copy.

use tracing::debug;

use crate::sequence::Sequence;

/// Which fixes to run. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixPolicy {
    /// Cut runs of N from both ends of every sequence.
    pub terminal_ns: bool,
    /// Add start/stop codon markers where the CDS ends carry real codons.
    pub start_stop_codons: bool,
    /// Drop a leading CDS pair shorter than this many bases.
    pub min_first_cds_segment: Option<u64>,
}

impl FixPolicy {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Run the enabled fixes in order: terminal Ns, leading CDS pair,
    /// start/stop codons. Coordinates are clamped afterwards.
    pub fn apply(&self, seq: &mut Sequence) {
        if self.terminal_ns {
            let before = seq.len();
            seq.remove_terminal_ns();
            debug!(sequence = %seq.header, removed = before - seq.len(), "trimmed terminal Ns");
        }
        if let Some(min_length) = self.min_first_cds_segment {
            seq.remove_first_cds_segment_if_shorter_than(min_length);
        }
        if self.start_stop_codons {
            seq.create_starts_and_stops();
        }
        seq.clean_up();
    }
}
