//! The loaded genome: sequences with their genes placed on them.
//!
//! The genome returned by [`Genome::load`] is never edited. Every policy
//! evaluation runs on a [`Genome::working_copy`].

use std::path::Path;

use tracing::{info, warn};

use crate::error::Error;
use crate::fasta;
use crate::feature::{Gene, Transcript};
use crate::filter::FilterPolicy;
use crate::fix::FixPolicy;
use crate::gff3::{self, GffReadResult};
use crate::sequence::Sequence;
use crate::stats::GenomeStats;

/// Fixes and filters applied to a working copy, fixes first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub fix: FixPolicy,
    pub filter: FilterPolicy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genome {
    pub sequences: Vec<Sequence>,
}

impl Genome {
    /// Load a FASTA file and a GFF3 file (either may be gzipped).
    ///
    /// The GFF3 side channels come back alongside the genome; their `genes`
    /// list is empty because every gene has been placed.
    pub fn load(fasta_path: &Path, gff_path: &Path) -> Result<(Self, GffReadResult), Error> {
        let records = fasta::read_fasta_path(fasta_path)?;
        let mut gff = gff3::read_gff3_path(gff_path)?;
        let genome = Self::from_parts(records, &mut gff);
        info!(
            sequences = genome.sequences.len(),
            genes = genome.gene_count(),
            "loaded genome"
        );
        Ok((genome, gff))
    }

    /// Place the genes of `gff` on the sequences named by their `seq_name`.
    /// Genes on sequences missing from the FASTA are dropped with a warning.
    pub fn from_parts(records: Vec<(String, Vec<u8>)>, gff: &mut GffReadResult) -> Self {
        let mut by_sequence = gff.by_sequence();
        let sequences = records
            .into_iter()
            .map(|(header, bases)| {
                let mut seq = Sequence::new(header, bases);
                if let Some(genes) = by_sequence.remove(&seq.header) {
                    seq.genes = genes;
                }
                seq
            })
            .collect();

        let mut unplaced: Vec<_> = by_sequence.into_iter().collect();
        unplaced.sort_by(|a, b| a.0.cmp(&b.0));
        for (seq_name, genes) in unplaced {
            warn!(sequence = %seq_name, genes = genes.len(), "no FASTA sequence for annotated genes; dropped");
        }

        Self { sequences }
    }

    /// Deep copy with `policy` applied.
    #[must_use]
    pub fn working_copy(&self, policy: &Policy) -> Self {
        let mut copy = self.clone();
        for seq in &mut copy.sequences {
            policy.fix.apply(seq);
            policy.filter.apply(seq);
        }
        copy
    }

    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.sequences.iter().map(|s| s.genes.len()).sum()
    }

    #[must_use]
    pub fn stats(&self) -> GenomeStats {
        let mut total = GenomeStats::default();
        for seq in &self.sequences {
            total.add(&seq.stats());
        }
        total
    }

    // Identifier lookups. The `first_*` helpers return fewer than `n` when
    // fewer exist.

    #[must_use]
    pub fn first_seq_ids(&self, n: usize) -> Vec<&str> {
        self.sequences.iter().take(n).map(|s| s.header.as_str()).collect()
    }

    #[must_use]
    pub fn first_gene_ids(&self, n: usize) -> Vec<&str> {
        self.sequences
            .iter()
            .flat_map(Sequence::gene_ids)
            .take(n)
            .collect()
    }

    #[must_use]
    pub fn first_transcript_ids(&self, n: usize) -> Vec<&str> {
        self.sequences
            .iter()
            .flat_map(Sequence::transcript_ids)
            .take(n)
            .collect()
    }

    #[must_use]
    pub fn contains_sequence(&self, seq_id: &str) -> bool {
        self.sequence(seq_id).is_some()
    }

    #[must_use]
    pub fn contains_gene(&self, gene_id: &str) -> bool {
        self.sequence_for_gene(gene_id).is_some()
    }

    #[must_use]
    pub fn contains_transcript(&self, transcript_id: &str) -> bool {
        self.sequence_for_transcript(transcript_id).is_some()
    }

    /// Locus tag prefix taken from the first sequence that has genes.
    #[must_use]
    pub fn locus_tag(&self) -> Option<&str> {
        self.sequences.iter().find_map(Sequence::locus_tag)
    }

    #[must_use]
    pub fn sequence(&self, seq_id: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.header == seq_id)
    }

    #[must_use]
    pub fn sequence_for_gene(&self, gene_id: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.contains_gene(gene_id))
    }

    #[must_use]
    pub fn sequence_for_transcript(&self, transcript_id: &str) -> Option<&Sequence> {
        self.sequences
            .iter()
            .find(|s| s.contains_transcript(transcript_id))
    }

    #[must_use]
    pub fn gene(&self, gene_id: &str) -> Option<&Gene> {
        self.sequence_for_gene(gene_id)?.gene(gene_id)
    }

    #[must_use]
    pub fn transcript(&self, transcript_id: &str) -> Option<(&Gene, &Transcript)> {
        self.sequence_for_transcript(transcript_id)?
            .transcript(transcript_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LengthBounds;
    use crate::interval::Interval;
    use std::io::Cursor;

    const GFF: &str = "\
seq1\tmaker\tgene\t4\t20\t.\t+\t.\tID=abc_0001
seq1\tmaker\tmRNA\t4\t20\t.\t+\t.\tID=abc_0001.1;Parent=abc_0001
seq1\tmaker\texon\t4\t20\t.\t+\t.\tID=abc_0001.1:exon;Parent=abc_0001.1
seq1\tmaker\tCDS\t4\t20\t.\t+\t0\tID=abc_0001.1:cds;Parent=abc_0001.1
seq2\tmaker\tgene\t1\t10\t.\t-\t.\tID=abc_0002
seq2\tmaker\tmRNA\t1\t10\t.\t-\t.\tID=abc_0002.1;Parent=abc_0002
seq2\tmaker\tCDS\t1\t10\t.\t-\t0\tID=abc_0002.1:cds;Parent=abc_0002.1
seq9\tmaker\tgene\t1\t10\t.\t+\t.\tID=abc_0009
";

    fn genome() -> Genome {
        let records = vec![
            ("seq1".to_string(), b"NNNATGAAATAAGGCCCTAGNN".to_vec()),
            ("seq2".to_string(), b"ACGTACGTACGT".to_vec()),
        ];
        let mut gff = gff3::read_gff3(Cursor::new(GFF)).unwrap();
        Genome::from_parts(records, &mut gff)
    }

    #[test]
    fn places_genes_and_drops_unknown_sequences() {
        let g = genome();
        assert_eq!(g.sequences.len(), 2);
        assert_eq!(g.gene_count(), 2);
        assert!(!g.contains_gene("abc_0009"));
        assert_eq!(g.sequence_for_gene("abc_0002").unwrap().header, "seq2");
        assert_eq!(g.sequence_for_transcript("abc_0001.1").unwrap().header, "seq1");
        assert!(g.contains_sequence("seq2"));
        assert!(!g.contains_transcript("nope"));
        assert_eq!(g.locus_tag(), Some("abc"));
    }

    #[test]
    fn first_ids_cap_at_available() {
        let g = genome();
        assert_eq!(g.first_seq_ids(1), vec!["seq1"]);
        assert_eq!(g.first_seq_ids(10), vec!["seq1", "seq2"]);
        assert_eq!(g.first_gene_ids(5), vec!["abc_0001", "abc_0002"]);
        assert_eq!(g.first_transcript_ids(1), vec!["abc_0001.1"]);
        assert!(g.first_gene_ids(0).is_empty());
    }

    #[test]
    fn working_copy_leaves_original_untouched() {
        let g = genome();
        let policy = Policy {
            fix: FixPolicy {
                terminal_ns: true,
                start_stop_codons: true,
                min_first_cds_segment: None,
            },
            filter: FilterPolicy::default(),
        };
        let copy = g.working_copy(&policy);
        assert_eq!(g, genome());
        let seq1 = copy.sequence("seq1").unwrap();
        assert_eq!(seq1.len(), 17);
        assert_eq!(seq1.genes[0].indices, Interval::new(1, 17));
        let (_, tx) = copy.transcript("abc_0001.1").unwrap();
        assert!(tx.has_start());
        assert!(tx.has_stop());
    }

    #[test]
    fn stats_sum_over_sequences() {
        let g = genome();
        let policy = Policy {
            filter: FilterPolicy {
                cds_length: LengthBounds::new(Some(15), None),
                ..FilterPolicy::default()
            },
            ..Policy::default()
        };
        let reference = g.stats();
        let modified = g.working_copy(&policy).stats();
        assert_eq!(reference.genes, 2);
        assert_eq!(reference.sequence_length, 34);
        assert_eq!(modified.genes, 1);
        assert_eq!(modified.mrnas, 1);
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let fasta_path = dir.path().join("genome.fasta");
        let gff_path = dir.path().join("genome.gff");
        std::fs::write(&fasta_path, ">seq1 scaffold\nNNNATGAAATAA\nGGCCCTAGNN\n>seq2\nACGTACGTACGT\n").unwrap();
        std::fs::write(&gff_path, GFF).unwrap();

        let (g, gff) = Genome::load(&fasta_path, &gff_path).unwrap();
        assert_eq!(g, genome());
        assert!(gff.genes.is_empty());
        assert!(gff.invalid.is_empty());
    }
}
