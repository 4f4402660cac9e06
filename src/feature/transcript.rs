//! Transcripts (mRNA) and their partiality.

use std::fmt;

use crate::codon;
use crate::interval::Interval;
use crate::sequence::subsequence;
use crate::strand::Strand;

use super::cds::Cds;
use super::exon::Exon;
use super::other::{OtherFeature, OtherFeatureKind};

/// Start/stop codon completeness of a transcript's coding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partiality {
    Complete,
    StartNoStop,
    StopNoStart,
    NoStartNoStop,
}

impl Partiality {
    #[must_use]
    pub fn from_flags(has_start: bool, has_stop: bool) -> Self {
        match (has_start, has_stop) {
            (true, true) => Self::Complete,
            (true, false) => Self::StartNoStop,
            (false, true) => Self::StopNoStart,
            (false, false) => Self::NoStartNoStop,
        }
    }
}

impl fmt::Display for Partiality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Complete => "complete",
            Self::StartNoStop => "start, no stop",
            Self::StopNoStart => "stop, no start",
            Self::NoStartNoStop => "no stop, no start",
        };
        f.write_str(label)
    }
}

/// An mRNA with its optional CDS, exons, and codon markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub identifier: String,
    pub parent_id: String,
    pub indices: Interval,
    pub strand: Strand,
    pub cds: Option<Cds>,
    pub exon: Option<Exon>,
    pub other_features: Vec<OtherFeature>,
    pub death_flagged: bool,
}

impl Transcript {
    #[must_use]
    pub fn new(identifier: String, parent_id: String, indices: Interval, strand: Strand) -> Self {
        Self {
            identifier,
            parent_id,
            indices,
            strand,
            cds: None,
            exon: None,
            other_features: Vec::new(),
            death_flagged: false,
        }
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.indices.length()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.death_flagged
    }

    #[must_use]
    pub fn indices_intersect(&self, window: &Interval) -> bool {
        self.indices.intersects(window)
    }

    fn has_feature(&self, kind: OtherFeatureKind) -> bool {
        self.other_features.iter().any(|f| f.kind == kind)
    }

    #[must_use]
    pub fn has_start(&self) -> bool {
        self.has_feature(OtherFeatureKind::StartCodon)
    }

    #[must_use]
    pub fn has_stop(&self) -> bool {
        self.has_feature(OtherFeatureKind::StopCodon)
    }

    #[must_use]
    pub fn partiality(&self) -> Partiality {
        Partiality::from_flags(self.has_start(), self.has_stop())
    }

    /// A transcript with neither a start nor a stop codon.
    #[must_use]
    pub fn is_hypothetical(&self) -> bool {
        self.partiality() == Partiality::NoStartNoStop
    }

    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        self.indices.shift(offset, threshold);
        if let Some(cds) = &mut self.cds {
            cds.adjust_indices(offset, threshold);
        }
        if let Some(exon) = &mut self.exon {
            exon.adjust_indices(offset, threshold);
        }
        for feature in &mut self.other_features {
            feature.adjust_indices(offset, threshold);
        }
    }

    /// Add start/stop codon markers where the CDS ends carry a real codon.
    ///
    /// Only the coding sequence is read; coordinates never change. A start
    /// codon is accepted only when the first CDS pair is in phase 0.
    pub fn create_start_and_stop_if_necessary(&mut self, bases: &[u8], strand: Strand) {
        let Some(cds) = &self.cds else {
            return;
        };
        let read = |pair: Interval| -> Option<Vec<u8>> {
            let triplet = subsequence(bases, pair.start, pair.stop)?;
            Some(if strand.is_reverse() {
                codon::reverse_complement(triplet)
            } else {
                triplet.to_vec()
            })
        };

        let mut found = Vec::new();
        if !self.has_start()
            && matches!(cds.phase(0), None | Some(0))
            && let Some(pair) = cds.start_indices(strand)
            && read(pair).is_some_and(|t| codon::is_start_codon(&t))
        {
            found.push((OtherFeatureKind::StartCodon, pair));
        }
        if !self.has_stop()
            && let Some(pair) = cds.stop_indices(strand)
            && read(pair).is_some_and(|t| codon::is_stop_codon(&t))
        {
            found.push((OtherFeatureKind::StopCodon, pair));
        }

        for (kind, pair) in found {
            let identifier = format!("{}:{kind}", self.identifier);
            self.other_features
                .push(OtherFeature::new(kind, identifier, pair));
        }
    }

    pub fn remove_first_cds_segment_if_shorter_than(&mut self, min_length: u64) -> bool {
        self.cds
            .as_mut()
            .is_some_and(|cds| cds.remove_first_segment_if_shorter_than(min_length))
    }

    /// Clamp coordinates pushed below 1 by an edit.
    pub fn clean_up_indices(&mut self) {
        if self.indices.stop < 1 {
            self.indices = Interval::new(0, 0);
        } else if self.indices.start < 1 {
            self.indices.start = 1;
        }
    }

    /// Drop codon markers that no longer lie on the sequence.
    pub fn remove_invalid_features(&mut self) {
        self.other_features
            .retain(|f| f.indices.start >= 1 && f.indices.start <= f.indices.stop);
    }

    // Exon and intron statistics.

    #[must_use]
    pub fn num_exons(&self) -> usize {
        self.exon.as_ref().map_or(0, Exon::num_exons)
    }

    #[must_use]
    pub fn num_introns(&self) -> usize {
        self.exon.as_ref().map_or(0, Exon::num_introns)
    }

    #[must_use]
    pub fn longest_exon(&self) -> u64 {
        self.exon.as_ref().map_or(0, |e| e.segments.longest())
    }

    #[must_use]
    pub fn shortest_exon(&self) -> u64 {
        self.exon.as_ref().map_or(0, |e| e.segments.shortest())
    }

    #[must_use]
    pub fn total_exon_length(&self) -> u64 {
        self.exon.as_ref().map_or(0, |e| e.segments.total_length())
    }

    fn intron_lengths(&self) -> Vec<u64> {
        self.exon
            .as_ref()
            .map(|e| e.segments.gaps().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn longest_intron(&self) -> u64 {
        self.intron_lengths().into_iter().max().unwrap_or(0)
    }

    #[must_use]
    pub fn shortest_intron(&self) -> u64 {
        self.intron_lengths().into_iter().min().unwrap_or(0)
    }

    #[must_use]
    pub fn total_intron_length(&self) -> u64 {
        self.intron_lengths().into_iter().fold(0, u64::saturating_add)
    }
}
