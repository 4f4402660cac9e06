//! Per-sequence feature statistics and the reference-vs-modified summary.

use crate::feature::{Gene, PartialCounts, Transcript};
use crate::sequence::Sequence;

/// Counts and length extremes over the live features of one or more sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub sequence_length: u64,
    pub genes: usize,
    pub mrnas: usize,
    pub exons: usize,
    pub introns: usize,
    pub cds: usize,
    pub partial: PartialCounts,
    pub longest_gene: u64,
    pub longest_mrna: u64,
    pub longest_exon: u64,
    pub longest_intron: u64,
    pub longest_cds: u64,
    pub shortest_gene: u64,
    pub shortest_mrna: u64,
    pub shortest_exon: u64,
    pub shortest_intron: u64,
    pub shortest_cds: u64,
    pub total_gene_length: u64,
    pub total_mrna_length: u64,
    pub total_exon_length: u64,
    pub total_intron_length: u64,
    pub total_cds_length: u64,
}

/// Statistics summed over every sequence of a genome with
/// [`SequenceStats::add`].
pub type GenomeStats = SequenceStats;

/// Smallest non-zero value; 0 means "none seen yet".
fn min_nonzero(current: u64, candidate: u64) -> u64 {
    match (current, candidate) {
        (_, 0) => current,
        (0, _) => candidate,
        _ => current.min(candidate),
    }
}

impl SequenceStats {
    #[must_use]
    pub fn from_sequence(seq: &Sequence) -> Self {
        let mut stats = Self {
            sequence_length: seq.len() as u64,
            ..Self::default()
        };
        for gene in seq.genes.iter().filter(|g| g.is_alive()) {
            stats.add_gene(gene);
        }
        stats
    }

    fn add_gene(&mut self, gene: &Gene) {
        self.genes += 1;
        self.longest_gene = self.longest_gene.max(gene.length());
        self.shortest_gene = min_nonzero(self.shortest_gene, gene.length());
        self.total_gene_length = self.total_gene_length.saturating_add(gene.length());
        self.partial.add(&gene.partial_counts());

        self.exons += gene.num_exons();
        self.introns += gene.num_introns();
        self.longest_exon = self.longest_exon.max(gene.longest_exon());
        self.shortest_exon = min_nonzero(self.shortest_exon, gene.shortest_exon());
        self.total_exon_length = self.total_exon_length.saturating_add(gene.total_exon_length());
        self.longest_intron = self.longest_intron.max(gene.longest_intron());
        self.shortest_intron = min_nonzero(self.shortest_intron, gene.shortest_intron());
        self.total_intron_length = self.total_intron_length.saturating_add(gene.total_intron_length());

        for transcript in gene.live_transcripts() {
            self.add_transcript(transcript);
        }
    }

    fn add_transcript(&mut self, transcript: &Transcript) {
        self.mrnas += 1;
        self.longest_mrna = self.longest_mrna.max(transcript.length());
        self.shortest_mrna = min_nonzero(self.shortest_mrna, transcript.length());
        self.total_mrna_length = self.total_mrna_length.saturating_add(transcript.length());
        if let Some(cds) = &transcript.cds {
            self.cds += 1;
            self.longest_cds = self.longest_cds.max(cds.length());
            self.shortest_cds = min_nonzero(self.shortest_cds, cds.length());
            self.total_cds_length = self.total_cds_length.saturating_add(cds.length());
        }
    }

    /// Fold another sequence's statistics into this one.
    pub fn add(&mut self, other: &SequenceStats) {
        self.sequence_length = self.sequence_length.saturating_add(other.sequence_length);
        self.genes += other.genes;
        self.mrnas += other.mrnas;
        self.exons += other.exons;
        self.introns += other.introns;
        self.cds += other.cds;
        self.partial.add(&other.partial);
        self.longest_gene = self.longest_gene.max(other.longest_gene);
        self.longest_mrna = self.longest_mrna.max(other.longest_mrna);
        self.longest_exon = self.longest_exon.max(other.longest_exon);
        self.longest_intron = self.longest_intron.max(other.longest_intron);
        self.longest_cds = self.longest_cds.max(other.longest_cds);
        self.shortest_gene = min_nonzero(self.shortest_gene, other.shortest_gene);
        self.shortest_mrna = min_nonzero(self.shortest_mrna, other.shortest_mrna);
        self.shortest_exon = min_nonzero(self.shortest_exon, other.shortest_exon);
        self.shortest_intron = min_nonzero(self.shortest_intron, other.shortest_intron);
        self.shortest_cds = min_nonzero(self.shortest_cds, other.shortest_cds);
        self.total_gene_length = self.total_gene_length.saturating_add(other.total_gene_length);
        self.total_mrna_length = self.total_mrna_length.saturating_add(other.total_mrna_length);
        self.total_exon_length = self.total_exon_length.saturating_add(other.total_exon_length);
        self.total_intron_length = self.total_intron_length.saturating_add(other.total_intron_length);
        self.total_cds_length = self.total_cds_length.saturating_add(other.total_cds_length);
    }

    /// Labelled values in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Total sequence length", self.sequence_length),
            ("Number of genes", self.genes as u64),
            ("Number of mRNAs", self.mrnas as u64),
            ("Number of exons", self.exons as u64),
            ("Number of introns", self.introns as u64),
            ("Number of CDS", self.cds as u64),
            ("CDS: complete", self.partial.complete as u64),
            ("CDS: start, no stop", self.partial.start_no_stop as u64),
            ("CDS: stop, no start", self.partial.stop_no_start as u64),
            ("CDS: no stop, no start", self.partial.no_start_no_stop as u64),
            ("Longest gene", self.longest_gene),
            ("Longest mRNA", self.longest_mrna),
            ("Longest exon", self.longest_exon),
            ("Longest intron", self.longest_intron),
            ("Longest CDS", self.longest_cds),
            ("Shortest gene", self.shortest_gene),
            ("Shortest mRNA", self.shortest_mrna),
            ("Shortest exon", self.shortest_exon),
            ("Shortest intron", self.shortest_intron),
            ("Shortest CDS", self.shortest_cds),
            ("Total gene length", self.total_gene_length),
            ("Total mRNA length", self.total_mrna_length),
            ("Total exon length", self.total_exon_length),
            ("Total intron length", self.total_intron_length),
            ("Total CDS length", self.total_cds_length),
        ]
    }
}

/// Two-column table comparing the loaded genome with its edited copy.
#[must_use]
pub fn summary(reference: &SequenceStats, modified: &SequenceStats) -> String {
    let rows = reference.rows();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let header = format!("{:<label_width$}  {:>12}  {:>12}\n", "", "Reference", "Modified");
    rows.into_iter()
        .zip(modified.rows())
        .fold(header, |mut out, ((label, before), (_, after))| {
            out.push_str(&format!("{label:<label_width$}  {before:>12}  {after:>12}\n"));
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Cds, Exon};
    use crate::interval::Interval;
    use crate::strand::Strand;

    fn sequence() -> Sequence {
        let mut seq = Sequence::new("s", vec![b'A'; 200]);
        for (id, start, stop) in [("g1", 10, 50), ("g2", 100, 180)] {
            let mut gene = Gene::new(
                "s".into(),
                "maker".into(),
                id.into(),
                Interval::new(start, stop),
                Strand::Forward,
            );
            let mut tx = Transcript::new(
                format!("{id}.1"),
                id.into(),
                Interval::new(start, stop),
                Strand::Forward,
            );
            let mut exon = Exon::new(Interval::new(start, start + 9), "e".into(), None);
            exon.add_segment(Interval::new(stop - 9, stop), "e".into(), None);
            tx.exon = Some(exon);
            tx.cds = Some(Cds::new(
                Interval::new(start, start + 5),
                "c".into(),
                None,
                Some(0),
                Strand::Forward,
            ));
            gene.transcripts.push(tx);
            seq.add_gene(gene);
        }
        seq
    }

    #[test]
    fn counts_and_extremes() {
        let stats = SequenceStats::from_sequence(&sequence());
        assert_eq!(stats.sequence_length, 200);
        assert_eq!(stats.genes, 2);
        assert_eq!(stats.mrnas, 2);
        assert_eq!(stats.exons, 4);
        assert_eq!(stats.introns, 2);
        assert_eq!(stats.cds, 2);
        assert_eq!(stats.longest_gene, 81);
        assert_eq!(stats.shortest_gene, 41);
        assert_eq!(stats.longest_intron, 61);
        assert_eq!(stats.shortest_intron, 21);
        assert_eq!(stats.total_cds_length, 12);
        assert_eq!(stats.partial.no_start_no_stop, 2);
    }

    #[test]
    fn dead_genes_are_not_counted() {
        let mut seq = sequence();
        seq.genes[0].death_flagged = true;
        let stats = seq.stats();
        assert_eq!(stats.genes, 1);
        assert_eq!(stats.shortest_gene, 81);
    }

    #[test]
    fn add_folds_sequences() {
        let one = SequenceStats::from_sequence(&sequence());
        let mut total = SequenceStats::default();
        total.add(&one);
        total.add(&one);
        assert_eq!(total.genes, 4);
        assert_eq!(total.sequence_length, 400);
        assert_eq!(total.shortest_gene, 41);
    }

    #[test]
    fn summary_lists_both_columns() {
        let reference = SequenceStats::from_sequence(&sequence());
        let mut seq = sequence();
        seq.genes.pop();
        let modified = seq.stats();
        let text = summary(&reference, &modified);
        let genes_line = text
            .lines()
            .find(|l| l.starts_with("Number of genes"))
            .unwrap();
        let columns: Vec<&str> = genes_line.split_whitespace().collect();
        assert_eq!(&columns[columns.len() - 2..], &["2", "1"]);
        assert_eq!(text.lines().count(), 26);
    }
}
