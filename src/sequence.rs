//! A FASTA sequence together with the genes annotated on it.

use tracing::{debug, warn};

use crate::feature::{Gene, Transcript};
use crate::interval::Interval;
use crate::stats::SequenceStats;

/// Bases `[start, stop]` (1-based, inclusive) of `bases`, or `None` when the
/// range is empty or runs past either end.
#[must_use]
pub fn subsequence(bases: &[u8], start: i64, stop: i64) -> Option<&[u8]> {
    if start < 1 || stop < start || stop > bases.len() as i64 {
        return None;
    }
    Some(&bases[(start - 1) as usize..stop as usize])
}

fn is_n(base: u8) -> bool {
    base == b'N' || base == b'n'
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    pub header: String,
    pub bases: Vec<u8>,
    pub genes: Vec<Gene>,
    /// Genes dropped by identifier; reported in the removed-feature stream.
    pub removed_genes: Vec<Gene>,
}

impl Sequence {
    #[must_use]
    pub fn new(header: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            bases: bases.into(),
            genes: Vec::new(),
            removed_genes: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.push(gene);
    }

    #[must_use]
    pub fn contains_gene(&self, gene_id: &str) -> bool {
        self.genes.iter().any(|g| g.identifier == gene_id)
    }

    #[must_use]
    pub fn contains_transcript(&self, transcript_id: &str) -> bool {
        self.genes.iter().any(|g| g.contains_transcript(transcript_id))
    }

    #[must_use]
    pub fn gene(&self, gene_id: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.identifier == gene_id)
    }

    /// A transcript and the gene that owns it.
    #[must_use]
    pub fn transcript(&self, transcript_id: &str) -> Option<(&Gene, &Transcript)> {
        self.genes
            .iter()
            .find_map(|g| g.transcript(transcript_id).map(|t| (g, t)))
    }

    /// Move a gene from the live list to `removed_genes`. Returns false when
    /// no gene has that identifier.
    pub fn remove_gene(&mut self, gene_id: &str) -> bool {
        match self.genes.iter().position(|g| g.identifier == gene_id) {
            Some(pos) => {
                let gene = self.genes.remove(pos);
                self.removed_genes.push(gene);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn gene_ids(&self) -> Vec<&str> {
        self.genes.iter().map(|g| g.identifier.as_str()).collect()
    }

    #[must_use]
    pub fn transcript_ids(&self) -> Vec<&str> {
        self.genes.iter().flat_map(Gene::transcript_ids).collect()
    }

    /// Prefix of the first gene identifier, up to the first underscore.
    #[must_use]
    pub fn locus_tag(&self) -> Option<&str> {
        let gene = self.genes.first()?;
        gene.identifier.split('_').next()
    }

    /// Bases `[start, stop]`; `None` with a warning when out of range.
    #[must_use]
    pub fn get_subseq(&self, start: i64, stop: i64) -> Option<&[u8]> {
        let sub = subsequence(&self.bases, start, stop);
        if sub.is_none() {
            warn!(
                sequence = %self.header,
                start,
                stop,
                length = self.bases.len(),
                "requested subsequence is out of range"
            );
        }
        sub
    }

    /// Count of consecutive N/n bases starting at `position` and moving
    /// right; 0 when that base is not N or lies off the sequence.
    #[must_use]
    pub fn how_many_ns_forward(&self, position: i64) -> usize {
        if position < 1 || position > self.bases.len() as i64 {
            return 0;
        }
        self.bases[(position - 1) as usize..]
            .iter()
            .take_while(|&&b| is_n(b))
            .count()
    }

    /// Count of consecutive N/n bases starting at `position` and moving left.
    #[must_use]
    pub fn how_many_ns_backward(&self, position: i64) -> usize {
        if position < 1 || position > self.bases.len() as i64 {
            return 0;
        }
        self.bases[..position as usize]
            .iter()
            .rev()
            .take_while(|&&b| is_n(b))
            .count()
    }

    /// Cut leading and trailing runs of N.
    pub fn remove_terminal_ns(&mut self) {
        let leading = self.how_many_ns_forward(1);
        if leading > 0 {
            self.trim_region(1, leading as i64);
        }
        let length = self.bases.len() as i64;
        let trailing = self.how_many_ns_backward(length) as i64;
        if trailing > 0 {
            self.trim_region(length - trailing + 1, length);
        }
    }

    /// Delete bases `[start, stop]` and keep every gene's coordinates in step.
    ///
    /// Genes the cut reaches into or swallows are dropped. Genes sharing only
    /// a boundary base with the cut are trimmed gene-side; every other gene
    /// is shifted left by the number of bases removed.
    pub fn trim_region(&mut self, start: i64, stop: i64) {
        if stop > self.bases.len() as i64 {
            warn!(
                sequence = %self.header,
                start,
                stop,
                length = self.bases.len(),
                "trim region runs past the end of the sequence; nothing trimmed"
            );
            return;
        }
        if start < 1 || start > stop {
            warn!(sequence = %self.header, start, stop, "empty trim region; nothing trimmed");
            return;
        }

        self.bases.drain((start - 1) as usize..stop as usize);

        let window = Interval::new(start, stop);
        self.genes.retain(|g| {
            let hit = window.overlaps(&g.indices) || window.contains(&g.indices);
            if hit {
                debug!(gene = %g.identifier, %window, "dropping gene under trimmed region");
            }
            !hit
        });

        let removed = stop - start + 1;
        for gene in &mut self.genes {
            if window.intersects(&gene.indices) {
                gene.trim_region(start, stop);
            } else {
                gene.adjust_indices(-removed, start);
            }
        }
    }

    /// Mark `[start, stop]` as invalid on every gene it reaches; bases stay.
    pub fn invalidate_region(&mut self, start: i64, stop: i64) {
        let window = Interval::new(start, stop);
        for gene in &mut self.genes {
            if window.intersects(&gene.indices) {
                gene.invalidate_region(start, stop);
            }
        }
    }

    pub fn create_starts_and_stops(&mut self) {
        let bases = &self.bases;
        for gene in &mut self.genes {
            gene.create_starts_and_stops(bases);
        }
    }

    pub fn remove_first_cds_segment_if_shorter_than(&mut self, min_length: u64) {
        for gene in &mut self.genes {
            gene.remove_first_cds_segment_if_shorter_than(min_length);
        }
    }

    /// Clamp edited coordinates and drop features pushed off the sequence.
    pub fn clean_up(&mut self) {
        for gene in &mut self.genes {
            gene.clean_up_indices();
            gene.remove_invalid_features();
        }
        self.genes.retain(|g| g.indices.start != 0);
    }

    /// Spliced, stranded CDS bases for a transcript on a live gene.
    #[must_use]
    pub fn extract_cds_seq(&self, transcript_id: &str) -> Option<Vec<u8>> {
        let (gene, transcript) = self.transcript(transcript_id)?;
        let cds = transcript.cds.as_ref()?;
        Some(cds.extract_sequence(&self.bases, gene.strand))
    }

    #[must_use]
    pub fn stats(&self) -> SequenceStats {
        SequenceStats::from_sequence(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Cds;
    use crate::strand::Strand;

    fn gene(id: &str, start: i64, stop: i64) -> Gene {
        let mut gene = Gene::new(
            "seq1".into(),
            "maker".into(),
            id.into(),
            Interval::new(start, stop),
            Strand::Forward,
        );
        let mut tx = Transcript::new(
            format!("{id}-mRNA"),
            id.into(),
            Interval::new(start, stop),
            Strand::Forward,
        );
        tx.cds = Some(Cds::new(
            Interval::new(start, stop),
            format!("{id}-CDS"),
            None,
            Some(0),
            Strand::Forward,
        ));
        gene.transcripts.push(tx);
        gene
    }

    #[test]
    fn subsequence_bounds() {
        let bases = b"ACGTACGT";
        assert_eq!(subsequence(bases, 2, 4), Some(&b"CGT"[..]));
        assert_eq!(subsequence(bases, 1, 8), Some(&bases[..]));
        assert!(subsequence(bases, 0, 3).is_none());
        assert!(subsequence(bases, 5, 9).is_none());
        assert!(subsequence(bases, 5, 4).is_none());
    }

    #[test]
    fn trim_before_gene_shifts_without_removal() {
        let mut seq = Sequence::new("seq1", vec![b'A'; 20]);
        seq.add_gene(gene("g1", 5, 15));
        seq.trim_region(1, 4);
        assert_eq!(seq.len(), 16);
        assert_eq!(seq.genes.len(), 1);
        assert_eq!(seq.genes[0].indices, Interval::new(1, 11));
        assert_eq!(seq.genes[0].transcripts[0].indices, Interval::new(1, 11));
    }

    #[test]
    fn trim_drops_overlapping_and_contained_genes() {
        let mut seq = Sequence::new("seq1", vec![b'A'; 100]);
        seq.add_gene(gene("g1", 5, 15));
        seq.add_gene(gene("g2", 20, 30));
        seq.add_gene(gene("g3", 50, 60));
        seq.trim_region(10, 35);
        assert_eq!(seq.gene_ids(), vec!["g3"]);
        assert_eq!(seq.genes[0].indices, Interval::new(24, 34));
    }

    #[test]
    fn trim_touching_boundary_goes_through_gene_trim() {
        let mut seq = Sequence::new("seq1", vec![b'A'; 100]);
        seq.add_gene(gene("g1", 20, 60));
        seq.trim_region(10, 20);
        // the lone transcript spans the cut and is dropped, the gene survives
        assert_eq!(seq.genes.len(), 1);
        assert_eq!(seq.genes[0].indices, Interval::new(10, 49));
        assert!(seq.genes[0].transcripts.is_empty());
    }

    #[test]
    fn trim_past_end_is_noop() {
        let mut seq = Sequence::new("seq1", b"ACGT".to_vec());
        seq.add_gene(gene("g1", 1, 4));
        seq.trim_region(2, 10);
        assert_eq!(seq.bases, b"ACGT");
        assert_eq!(seq.genes[0].indices, Interval::new(1, 4));
    }

    #[test]
    fn how_many_ns() {
        let seq = Sequence::new("s", b"NnNACGTnnNNANn".to_vec());
        assert_eq!(seq.how_many_ns_forward(1), 3);
        assert_eq!(seq.how_many_ns_forward(2), 2);
        assert_eq!(seq.how_many_ns_forward(4), 0);
        assert_eq!(seq.how_many_ns_forward(8), 4);
        assert_eq!(seq.how_many_ns_backward(14), 2);
        assert_eq!(seq.how_many_ns_backward(11), 4);
        assert_eq!(seq.how_many_ns_backward(12), 0);
        assert_eq!(seq.how_many_ns_forward(0), 0);
        assert_eq!(seq.how_many_ns_forward(15), 0);
    }

    #[test]
    fn how_many_ns_forward_counts_exact_runs() {
        for n in 0..6 {
            let mut bases = Vec::new();
            for i in 0..n {
                bases.push(if i % 2 == 0 { b'N' } else { b'n' });
            }
            bases.extend_from_slice(b"ACN");
            let seq = Sequence::new("s", bases);
            assert_eq!(seq.how_many_ns_forward(1), n);
        }
    }

    #[test]
    fn remove_terminal_ns_shifts_genes() {
        let mut seq = Sequence::new("s", b"NNNNACGTACGTACGTNNN".to_vec());
        seq.add_gene(gene("g1", 6, 12));
        seq.remove_terminal_ns();
        assert_eq!(seq.bases, b"ACGTACGTACGT");
        assert_eq!(seq.genes[0].indices, Interval::new(2, 8));
    }

    #[test]
    fn remove_gene_moves_to_removed() {
        let mut seq = Sequence::new("s", vec![b'A'; 50]);
        seq.add_gene(gene("g1", 1, 10));
        seq.add_gene(gene("g2", 20, 30));
        assert!(seq.remove_gene("g1"));
        assert!(!seq.remove_gene("g1"));
        assert_eq!(seq.gene_ids(), vec!["g2"]);
        assert_eq!(seq.removed_genes[0].identifier, "g1");
    }

    #[test]
    fn lookups() {
        let mut seq = Sequence::new("s", vec![b'A'; 50]);
        seq.add_gene(gene("abc_0001", 1, 10));
        assert!(seq.contains_gene("abc_0001"));
        assert!(seq.contains_transcript("abc_0001-mRNA"));
        assert!(!seq.contains_transcript("nope"));
        assert_eq!(seq.transcript_ids(), vec!["abc_0001-mRNA"]);
        assert_eq!(seq.locus_tag(), Some("abc"));
    }

    #[test]
    fn extract_cds_uses_gene_strand() {
        let mut seq = Sequence::new("s", b"AACTTTGGG".to_vec());
        let mut g = gene("g1", 1, 9);
        g.strand = Strand::Reverse;
        let cds = g.transcripts[0].cds.as_mut().unwrap();
        cds.segments.pairs = vec![Interval::new(1, 3), Interval::new(7, 9)];
        cds.phases = vec![Some(0), Some(0)];
        seq.add_gene(g);
        assert_eq!(seq.extract_cds_seq("g1-mRNA").unwrap(), b"CCCGTT");
        assert!(seq.extract_cds_seq("missing").is_none());
    }

    #[test]
    fn invalidate_only_touches_reached_genes() {
        let mut seq = Sequence::new("s", vec![b'A'; 100]);
        seq.add_gene(gene("g1", 10, 20));
        seq.add_gene(gene("g2", 40, 60));
        seq.invalidate_region(5, 25);
        assert!(seq.genes[0].death_flagged);
        assert!(seq.genes[1].is_alive());
        assert_eq!(seq.len(), 100);
    }
}
