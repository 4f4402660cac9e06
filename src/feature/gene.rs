//! Genes: the top of the per-locus feature tree.

use tracing::debug;

use crate::interval::Interval;
use crate::strand::Strand;

use super::transcript::{Partiality, Transcript};

/// Tally of transcript partiality over a gene's live transcripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialCounts {
    pub complete: usize,
    pub start_no_stop: usize,
    pub stop_no_start: usize,
    pub no_start_no_stop: usize,
}

impl PartialCounts {
    pub fn record(&mut self, partiality: Partiality) {
        match partiality {
            Partiality::Complete => self.complete += 1,
            Partiality::StartNoStop => self.start_no_stop += 1,
            Partiality::StopNoStart => self.stop_no_start += 1,
            Partiality::NoStartNoStop => self.no_start_no_stop += 1,
        }
    }

    pub fn add(&mut self, other: &PartialCounts) {
        self.complete += other.complete;
        self.start_no_stop += other.start_no_stop;
        self.stop_no_start += other.stop_no_start;
        self.no_start_no_stop += other.no_start_no_stop;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub seq_name: String,
    pub source: String,
    pub identifier: String,
    pub name: Option<String>,
    pub indices: Interval,
    pub strand: Strand,
    pub score: Option<f64>,
    /// Key/value annotations in file order; keys may repeat.
    pub annotations: Vec<(String, String)>,
    pub transcripts: Vec<Transcript>,
    pub death_flagged: bool,
}

impl Gene {
    #[must_use]
    pub fn new(
        seq_name: String,
        source: String,
        identifier: String,
        indices: Interval,
        strand: Strand,
    ) -> Self {
        Self {
            seq_name,
            source,
            identifier,
            name: None,
            indices,
            strand,
            score: None,
            annotations: Vec::new(),
            transcripts: Vec::new(),
            death_flagged: false,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.death_flagged
    }

    /// Transcripts that are not death-flagged.
    pub fn live_transcripts(&self) -> impl Iterator<Item = &Transcript> {
        self.transcripts.iter().filter(|t| t.is_alive())
    }

    /// Death-flagged transcripts, kept for removed-feature reporting.
    pub fn dead_transcripts(&self) -> impl Iterator<Item = &Transcript> {
        self.transcripts.iter().filter(|t| !t.is_alive())
    }

    pub fn add_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.push((key.into(), value.into()));
    }

    /// First value recorded under `key`.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove_annotation(&mut self, key: &str) {
        self.annotations.retain(|(k, _)| k != key);
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.indices.length()
    }

    #[must_use]
    pub fn contains_transcript(&self, transcript_id: &str) -> bool {
        self.transcripts.iter().any(|t| t.identifier == transcript_id)
    }

    #[must_use]
    pub fn transcript(&self, transcript_id: &str) -> Option<&Transcript> {
        self.transcripts.iter().find(|t| t.identifier == transcript_id)
    }

    #[must_use]
    pub fn transcript_ids(&self) -> Vec<&str> {
        self.transcripts.iter().map(|t| t.identifier.as_str()).collect()
    }

    /// False as soon as one live transcript lacks a start codon.
    #[must_use]
    pub fn has_start(&self) -> bool {
        self.live_transcripts().all(Transcript::has_start)
    }

    /// False as soon as one live transcript lacks a stop codon.
    #[must_use]
    pub fn has_stop(&self) -> bool {
        self.live_transcripts().all(Transcript::has_stop)
    }

    #[must_use]
    pub fn is_hypothetical(&self) -> bool {
        self.live_transcripts().any(Transcript::is_hypothetical)
    }

    #[must_use]
    pub fn partial_counts(&self) -> PartialCounts {
        let mut counts = PartialCounts::default();
        for transcript in self.live_transcripts() {
            counts.record(transcript.partiality());
        }
        counts
    }

    /// Shift the gene and every child by `offset` when they lie at or after
    /// `threshold` (stop only when just the stop does).
    pub fn adjust_indices(&mut self, offset: i64, threshold: i64) {
        self.indices.shift(offset, threshold);
        for transcript in &mut self.transcripts {
            transcript.adjust_indices(offset, threshold);
        }
    }

    /// Account for the bases `[start, stop]` being cut out of the sequence.
    ///
    /// Transcripts touching the cut are dropped outright. A cut wholly
    /// swallowing the gene is the sequence's job, not handled here.
    pub fn trim_region(&mut self, start: i64, stop: i64) {
        let removed = stop - start + 1;
        if start > self.indices.stop {
            return;
        }
        if stop < self.indices.start {
            self.adjust_indices(-removed, 1);
            return;
        }

        let window = Interval::new(start, stop);
        self.transcripts.retain(|t| {
            let hit = t.indices_intersect(&window);
            if hit {
                debug!(transcript = %t.identifier, %window, "dropping transcript under trimmed region");
            }
            !hit
        });

        let Interval {
            start: gene_start,
            stop: gene_stop,
        } = self.indices;
        if start <= gene_start && gene_start <= stop && stop <= gene_stop {
            // leading edge cut: snap past the cut, then shift everything back
            self.indices.start = stop + 1;
            self.adjust_indices(-removed, 1);
        } else if gene_start <= start && start <= gene_stop && gene_stop <= stop {
            // trailing edge cut: the gene start is below the threshold and stays put
            self.adjust_indices(-(gene_stop - start + 1), start);
        } else {
            self.adjust_indices(-removed, stop);
        }
    }

    /// Mark `[start, stop]` as invalid bases without removing them.
    ///
    /// Transcripts whose CDS or exons do not survive are death-flagged; the
    /// gene itself is death-flagged when it loses every transcript that way.
    pub fn invalidate_region(&mut self, start: i64, stop: i64) {
        if start <= self.indices.start && stop >= self.indices.start {
            self.indices.start = stop + 1;
        } else if start <= self.indices.stop && stop >= self.indices.stop {
            self.indices.stop = start - 1;
        }

        for transcript in &mut self.transcripts {
            let cds_survives = transcript
                .cds
                .as_mut()
                .is_none_or(|cds| cds.invalidate_region(start, stop));
            let exon_survives = transcript
                .exon
                .as_mut()
                .is_none_or(|exon| exon.invalidate_region(start, stop));
            if !cds_survives || !exon_survives {
                debug!(transcript = %transcript.identifier, "death-flagging transcript in invalid region");
                transcript.death_flagged = true;
            }
        }

        if !self.transcripts.is_empty() && self.live_transcripts().next().is_none() {
            self.death_flagged = true;
        }
    }

    pub fn create_starts_and_stops(&mut self, bases: &[u8]) {
        let strand = self.strand;
        for transcript in &mut self.transcripts {
            transcript.create_start_and_stop_if_necessary(bases, strand);
        }
    }

    pub fn remove_first_cds_segment_if_shorter_than(&mut self, min_length: u64) {
        for transcript in &mut self.transcripts {
            transcript.remove_first_cds_segment_if_shorter_than(min_length);
        }
    }

    /// Clamp coordinates that an edit pushed below 1; a gene pushed entirely
    /// off the sequence collapses to `[0, 0]`.
    pub fn clean_up_indices(&mut self) {
        if self.indices.stop < 1 {
            self.indices = Interval::new(0, 0);
        } else if self.indices.start < 1 {
            self.indices.start = 1;
        }
        for transcript in &mut self.transcripts {
            transcript.clean_up_indices();
        }
    }

    /// Drop transcripts collapsed to position 0 by [`Gene::clean_up_indices`].
    pub fn remove_invalid_features(&mut self) {
        self.transcripts.retain(|t| t.indices.start != 0);
        for transcript in &mut self.transcripts {
            transcript.remove_invalid_features();
        }
    }

    // Statistics over live transcripts.

    #[must_use]
    pub fn num_exons(&self) -> usize {
        self.live_transcripts().map(Transcript::num_exons).sum()
    }

    #[must_use]
    pub fn num_introns(&self) -> usize {
        self.live_transcripts().map(Transcript::num_introns).sum()
    }

    #[must_use]
    pub fn longest_exon(&self) -> u64 {
        self.live_transcripts()
            .map(Transcript::longest_exon)
            .max()
            .unwrap_or(0)
    }

    /// Shortest non-empty exon; 0 when there is none.
    #[must_use]
    pub fn shortest_exon(&self) -> u64 {
        self.live_transcripts()
            .map(Transcript::shortest_exon)
            .filter(|&len| len > 0)
            .min()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total_exon_length(&self) -> u64 {
        self.live_transcripts()
            .map(Transcript::total_exon_length)
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn longest_intron(&self) -> u64 {
        self.live_transcripts()
            .map(Transcript::longest_intron)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn shortest_intron(&self) -> u64 {
        self.live_transcripts()
            .filter(|t| t.num_introns() > 0)
            .map(Transcript::shortest_intron)
            .min()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total_intron_length(&self) -> u64 {
        self.live_transcripts()
            .map(Transcript::total_intron_length)
            .fold(0, u64::saturating_add)
    }
}
