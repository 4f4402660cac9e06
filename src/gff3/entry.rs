//! GFF3 data structures for validated lines and the ingestion result.

use std::collections::HashMap;
use std::fmt;

use crate::feature::Gene;
use crate::strand::Strand;

/// Feature types the annotation model represents. Anything else lands in the
/// ignored partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    Gene,
    Mrna,
    Cds,
    Exon,
    StartCodon,
    StopCodon,
}

impl FeatureType {
    /// Map GFF3 column 3 onto a modelled type.
    #[must_use]
    pub fn from_gff3(s: &str) -> Option<Self> {
        match s {
            "gene" => Some(Self::Gene),
            "mRNA" => Some(Self::Mrna),
            "CDS" => Some(Self::Cds),
            "exon" => Some(Self::Exon),
            "start_codon" => Some(Self::StartCodon),
            "stop_codon" => Some(Self::StopCodon),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gene => "gene",
            Self::Mrna => "mRNA",
            Self::Cds => "CDS",
            Self::Exon => "exon",
            Self::StartCodon => "start_codon",
            Self::StopCodon => "stop_codon",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed attributes from GFF3 column 9.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub id: String,
    pub name: Option<String>,
    pub parent_id: Option<String>,
    /// `Dbxref` and `Ontology_term` pairs, in column order.
    pub annotations: Vec<(String, String)>,
}

/// A single validated GFF3 line.
#[derive(Debug, Clone, PartialEq)]
pub struct GffRecord {
    pub seqid: String,
    pub source: String,
    /// Column 3 verbatim; see [`GffRecord::kind`].
    pub feature_type: String,
    pub start: i64,
    pub stop: i64,
    pub score: Option<f64>,
    pub strand: Strand,
    pub phase: Option<u8>,
    pub attributes: Attributes,
}

impl GffRecord {
    #[must_use]
    pub fn kind(&self) -> Option<FeatureType> {
        FeatureType::from_gff3(&self.feature_type)
    }
}

impl fmt::Display for GffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t",
            self.seqid, self.source, self.feature_type, self.start, self.stop
        )?;
        match self.score {
            Some(score) => write!(f, "{score}")?,
            None => f.write_str(".")?,
        }
        write!(f, "\t{}\t", self.strand)?;
        match self.phase {
            Some(phase) => write!(f, "{phase}")?,
            None => f.write_str(".")?,
        }
        write!(f, "\tID={}", self.attributes.id)?;
        if let Some(name) = &self.attributes.name {
            write!(f, ";Name={name}")?;
        }
        if let Some(parent) = &self.attributes.parent_id {
            write!(f, ";Parent={parent}")?;
        }
        for (key, value) in &self.attributes.annotations {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}

/// Everything one pass over a GFF3 file produces.
#[derive(Debug, Default)]
pub struct GffReadResult {
    /// Genes in file order with their transcripts attached.
    pub genes: Vec<Gene>,
    /// Empty and `#` lines, untouched.
    pub comments: Vec<String>,
    /// Lines failing validation, plus duplicate gene/mRNA identifiers.
    pub invalid: Vec<String>,
    /// Valid lines whose feature type is not modelled.
    pub ignored: Vec<String>,
    /// Child lines whose parent transcript never appeared.
    pub unresolved: Vec<GffRecord>,
    pub skipped_features: usize,
}

impl GffReadResult {
    /// Move the genes out, grouped by sequence id. File order is kept within
    /// each group.
    pub fn by_sequence(&mut self) -> HashMap<String, Vec<Gene>> {
        let mut grouped: HashMap<String, Vec<Gene>> = HashMap::new();
        for gene in std::mem::take(&mut self.genes) {
            grouped.entry(gene.seq_name.clone()).or_default().push(gene);
        }
        grouped
    }
}
