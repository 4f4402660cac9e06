//! Length filters applied to a working copy.

use tracing::debug;

use crate::feature::Transcript;
use crate::sequence::Sequence;

/// Inclusive length bounds; an absent side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl LengthBounds {
    #[must_use]
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    #[must_use]
    pub fn admits(&self, length: u64) -> bool {
        self.min.is_none_or(|min| length >= min) && self.max.is_none_or(|max| length <= max)
    }
}

/// Which transcripts to remove. Filtering death-flags; nothing is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Bounds on the summed length of a transcript's CDS pairs.
    pub cds_length: LengthBounds,
    /// Bounds every single exon pair must satisfy.
    pub exon_length: LengthBounds,
}

impl FilterPolicy {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cds_length.is_unbounded() && self.exon_length.is_unbounded()
    }

    fn rejects(&self, transcript: &Transcript) -> bool {
        let cds_fails = transcript
            .cds
            .as_ref()
            .is_some_and(|cds| !self.cds_length.admits(cds.length()));
        let exon_fails = transcript.exon.as_ref().is_some_and(|exon| {
            exon.pairs()
                .iter()
                .any(|pair| !self.exon_length.admits(pair.length()))
        });
        cds_fails || exon_fails
    }

    /// Death-flag live transcripts outside the bounds, then every gene left
    /// without a live transcript.
    pub fn apply(&self, seq: &mut Sequence) {
        if self.is_empty() {
            return;
        }
        for gene in seq.genes.iter_mut().filter(|g| g.is_alive()) {
            for transcript in gene.transcripts.iter_mut().filter(|t| t.is_alive()) {
                if self.rejects(transcript) {
                    debug!(transcript = %transcript.identifier, "filtered by length");
                    transcript.death_flagged = true;
                }
            }
            if !gene.transcripts.is_empty() && gene.live_transcripts().next().is_none() {
                gene.death_flagged = true;
            }
        }
    }
}
