//! Two-pass gene-transcript-segment hierarchy builder.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Error;
use crate::feature::{Cds, Exon, Gene, OtherFeature, OtherFeatureKind, Transcript};
use crate::interval::Interval;

use super::entry::{FeatureType, GffRecord};

/// What the builder did with one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    /// Parent transcript not seen yet; queued for the replay.
    Orphaned,
    /// Feature type is not modelled.
    Ignored,
    /// Gene or mRNA identifier already taken.
    Duplicate,
}

/// Child records that hang off a transcript.
#[derive(Debug, Clone, Copy)]
enum ChildKind {
    Cds,
    Exon,
    Marker(OtherFeatureKind),
}

/// Builds genes from validated records.
///
/// Genes and transcripts are created on first sight. Child records whose
/// transcript has not appeared yet are queued and replayed once by
/// [`GffBuilder::build`], which then attaches each transcript to its gene.
#[derive(Debug, Default)]
pub struct GffBuilder {
    genes: Vec<Gene>,
    gene_index: HashMap<String, usize>,
    transcripts: Vec<Transcript>,
    transcript_index: HashMap<String, usize>,
    orphans: Vec<GffRecord>,
    skipped_features: usize,
}

impl GffBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records skipped so far because their feature type is not modelled.
    #[must_use]
    pub fn skipped_features(&self) -> usize {
        self.skipped_features
    }

    pub fn add(&mut self, record: GffRecord) -> Placement {
        let Some(kind) = record.kind() else {
            self.skipped_features += 1;
            return Placement::Ignored;
        };
        match kind {
            FeatureType::Gene => self.add_gene(record),
            FeatureType::Mrna => self.add_transcript(record),
            FeatureType::Cds => self.add_child(ChildKind::Cds, record),
            FeatureType::Exon => self.add_child(ChildKind::Exon, record),
            FeatureType::StartCodon => {
                self.add_child(ChildKind::Marker(OtherFeatureKind::StartCodon), record)
            }
            FeatureType::StopCodon => {
                self.add_child(ChildKind::Marker(OtherFeatureKind::StopCodon), record)
            }
        }
    }

    fn add_gene(&mut self, record: GffRecord) -> Placement {
        if self.gene_index.contains_key(&record.attributes.id) {
            return Placement::Duplicate;
        }
        let attrs = record.attributes;
        let mut gene = Gene::new(
            record.seqid,
            record.source,
            attrs.id.clone(),
            Interval::new(record.start, record.stop),
            record.strand,
        );
        gene.name = attrs.name;
        gene.score = record.score;
        gene.annotations = attrs.annotations;
        self.gene_index.insert(attrs.id, self.genes.len());
        self.genes.push(gene);
        Placement::Placed
    }

    fn add_transcript(&mut self, record: GffRecord) -> Placement {
        if self.transcript_index.contains_key(&record.attributes.id) {
            return Placement::Duplicate;
        }
        let attrs = record.attributes;
        // validated: non-gene records always carry a parent
        let parent_id = attrs.parent_id.unwrap_or_default();
        let transcript = Transcript::new(
            attrs.id.clone(),
            parent_id,
            Interval::new(record.start, record.stop),
            record.strand,
        );
        self.transcript_index.insert(attrs.id, self.transcripts.len());
        self.transcripts.push(transcript);
        Placement::Placed
    }

    fn add_child(&mut self, kind: ChildKind, record: GffRecord) -> Placement {
        let parent = record.attributes.parent_id.as_deref().unwrap_or_default();
        let Some(&index) = self.transcript_index.get(parent) else {
            self.orphans.push(record);
            return Placement::Orphaned;
        };
        let transcript = &mut self.transcripts[index];
        let pair = Interval::new(record.start, record.stop);
        let identifier = record.attributes.id;

        match kind {
            ChildKind::Cds => match transcript.cds.as_mut() {
                Some(cds) => cds.add_segment(pair, identifier, record.score, record.phase),
                None => {
                    transcript.cds = Some(Cds::new(
                        pair,
                        identifier,
                        record.score,
                        record.phase,
                        record.strand,
                    ));
                }
            },
            ChildKind::Exon => match transcript.exon.as_mut() {
                Some(exon) => exon.add_segment(pair, identifier, record.score),
                None => transcript.exon = Some(Exon::new(pair, identifier, record.score)),
            },
            ChildKind::Marker(marker) => transcript
                .other_features
                .push(OtherFeature::new(marker, identifier, pair)),
        }
        Placement::Placed
    }

    /// Replay the orphan queue once, then attach transcripts to genes.
    ///
    /// Returns the genes in file order and the child records that still
    /// have no transcript. A transcript naming an unknown gene is an error.
    pub fn build(mut self) -> Result<(Vec<Gene>, Vec<GffRecord>), Error> {
        let snapshot = std::mem::take(&mut self.orphans);
        debug!(orphans = snapshot.len(), "replaying orphaned child features");
        for record in snapshot {
            self.add(record);
        }
        let unresolved = std::mem::take(&mut self.orphans);
        if !unresolved.is_empty() {
            warn!(count = unresolved.len(), "child features reference unknown transcripts");
        }
        if self.skipped_features > 0 {
            warn!(count = self.skipped_features, "skipped features of unmodelled types");
        }

        for transcript in self.transcripts {
            let Some(&index) = self.gene_index.get(&transcript.parent_id) else {
                return Err(Error::MissingParent {
                    transcript: transcript.identifier,
                    gene: transcript.parent_id,
                });
            };
            self.genes[index].transcripts.push(transcript);
        }

        Ok((self.genes, unresolved))
    }
}
