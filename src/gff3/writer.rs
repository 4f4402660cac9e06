//! GFF3 emission for the live stream and the removed-feature stream.

use std::fmt::{self, Write};

use crate::feature::{Cds, Exon, Gene, Transcript};
use crate::sequence::Sequence;
use crate::strand::Strand;

struct Columns<'a> {
    seq_name: &'a str,
    source: &'a str,
    strand: Strand,
}

impl Columns<'_> {
    #[allow(clippy::too_many_arguments)]
    fn line<W: Write>(
        &self,
        out: &mut W,
        feature_type: &str,
        start: i64,
        stop: i64,
        score: Option<f64>,
        phase: Option<u8>,
        attributes: &str,
    ) -> fmt::Result {
        write!(
            out,
            "{}\t{}\t{feature_type}\t{start}\t{stop}\t",
            self.seq_name, self.source
        )?;
        match score {
            Some(score) => write!(out, "{score}")?,
            None => out.write_char('.')?,
        }
        write!(out, "\t{}\t", self.strand)?;
        match phase {
            Some(phase) => write!(out, "{phase}")?,
            None => out.write_char('.')?,
        }
        writeln!(out, "\t{attributes}")
    }
}

fn gene_line<W: Write>(out: &mut W, gene: &Gene, cols: &Columns<'_>) -> fmt::Result {
    let mut attributes = format!("ID={}", gene.identifier);
    if let Some(name) = &gene.name {
        write!(attributes, ";Name={name}")?;
    }
    for (key, value) in &gene.annotations {
        write!(attributes, ";{key}={value}")?;
    }
    cols.line(
        out,
        "gene",
        gene.indices.start,
        gene.indices.stop,
        gene.score,
        None,
        &attributes,
    )
}

fn exon_lines<W: Write>(out: &mut W, exon: &Exon, parent: &str, cols: &Columns<'_>) -> fmt::Result {
    for (i, pair) in exon.pairs().iter().enumerate() {
        let attributes = format!("ID={};Parent={parent}", exon.segments.identifier(i));
        cols.line(out, "exon", pair.start, pair.stop, exon.segments.score(i), None, &attributes)?;
    }
    Ok(())
}

fn cds_lines<W: Write>(out: &mut W, cds: &Cds, parent: &str, cols: &Columns<'_>) -> fmt::Result {
    for (i, pair) in cds.pairs().iter().enumerate() {
        let attributes = format!("ID={};Parent={parent}", cds.segments.identifier(i));
        cols.line(
            out,
            "CDS",
            pair.start,
            pair.stop,
            cds.segments.score(i),
            cds.phase(i),
            &attributes,
        )?;
    }
    Ok(())
}

fn transcript_lines<W: Write>(
    out: &mut W,
    transcript: &Transcript,
    cols: &Columns<'_>,
) -> fmt::Result {
    cols.line(
        out,
        "mRNA",
        transcript.indices.start,
        transcript.indices.stop,
        None,
        None,
        &format!("ID={};Parent={}", transcript.identifier, transcript.parent_id),
    )?;
    if let Some(exon) = &transcript.exon {
        exon_lines(out, exon, &transcript.identifier, cols)?;
    }
    if let Some(cds) = &transcript.cds {
        cds_lines(out, cds, &transcript.identifier, cols)?;
    }
    for feature in &transcript.other_features {
        cols.line(
            out,
            feature.kind.as_str(),
            feature.indices.start,
            feature.indices.stop,
            None,
            None,
            &format!("ID={};Parent={}", feature.identifier, transcript.identifier),
        )?;
    }
    Ok(())
}

fn columns(gene: &Gene) -> Columns<'_> {
    Columns {
        seq_name: &gene.seq_name,
        source: &gene.source,
        strand: gene.strand,
    }
}

/// Emit one gene and its transcripts.
///
/// Without `include_removed`, a death-flagged gene emits nothing and
/// death-flagged transcripts are skipped. With it, everything is emitted.
pub fn write_gene<W: Write>(out: &mut W, gene: &Gene, include_removed: bool) -> fmt::Result {
    if !include_removed && !gene.is_alive() {
        return Ok(());
    }
    let cols = columns(gene);
    gene_line(out, gene, &cols)?;
    for transcript in &gene.transcripts {
        if include_removed || transcript.is_alive() {
            transcript_lines(out, transcript, &cols)?;
        }
    }
    Ok(())
}

/// Live stream: every live gene with its live transcripts.
pub fn write_sequence<W: Write>(out: &mut W, seq: &Sequence) -> fmt::Result {
    for gene in &seq.genes {
        write_gene(out, gene, false)?;
    }
    Ok(())
}

/// Removed stream: the complement of [`write_sequence`].
///
/// Dead transcripts of live genes (under their gene line), every transcript
/// of a dead gene, and every gene dropped by identifier.
pub fn write_removed<W: Write>(out: &mut W, seq: &Sequence) -> fmt::Result {
    for gene in &seq.genes {
        if !gene.is_alive() {
            write_gene(out, gene, true)?;
            continue;
        }
        if gene.dead_transcripts().next().is_none() {
            continue;
        }
        let cols = columns(gene);
        gene_line(out, gene, &cols)?;
        for transcript in gene.dead_transcripts() {
            transcript_lines(out, transcript, &cols)?;
        }
    }
    for gene in &seq.removed_genes {
        write_gene(out, gene, true)?;
    }
    Ok(())
}

/// GFF3 block of a live gene, or `None` when the sequence has no such gene.
#[must_use]
pub fn gene_to_gff(seq: &Sequence, gene_id: &str) -> Option<String> {
    let gene = seq.gene(gene_id)?;
    let mut out = String::new();
    write_gene(&mut out, gene, false).ok()?;
    Some(out)
}

/// CDS lines of one transcript.
#[must_use]
pub fn cds_to_gff(seq: &Sequence, transcript_id: &str) -> Option<String> {
    let (gene, transcript) = seq.transcript(transcript_id)?;
    let cds = transcript.cds.as_ref()?;
    let mut out = String::new();
    cds_lines(&mut out, cds, &transcript.identifier, &columns(gene)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{OtherFeature, OtherFeatureKind};
    use crate::interval::Interval;
    use pretty_assertions::assert_eq;

    fn gene(id: &str, start: i64, stop: i64) -> Gene {
        let mut gene = Gene::new(
            "seq1".into(),
            "maker".into(),
            id.into(),
            Interval::new(start, stop),
            Strand::Reverse,
        );
        gene.add_annotation("Dbxref", "PFAM:PF0001");
        for n in 1..=2 {
            let tx_id = format!("{id}.{n}");
            let mut tx = Transcript::new(
                tx_id.clone(),
                id.into(),
                Interval::new(start, stop),
                Strand::Reverse,
            );
            tx.exon = Some(Exon::new(Interval::new(start, stop), format!("{tx_id}:exon"), None));
            let mut cds = Cds::new(
                Interval::new(start, start + 20),
                format!("{tx_id}:cds"),
                None,
                Some(0),
                Strand::Reverse,
            );
            cds.add_segment(Interval::new(start + 30, stop), format!("{tx_id}:cds"), None, Some(1));
            tx.cds = Some(cds);
            gene.transcripts.push(tx);
        }
        gene
    }

    #[test]
    fn gene_block_layout() {
        let mut g = gene("g1", 1, 60);
        g.transcripts.truncate(1);
        g.transcripts[0].other_features.push(OtherFeature::new(
            OtherFeatureKind::StopCodon,
            "g1.1:stop_codon".into(),
            Interval::new(1, 3),
        ));
        let mut out = String::new();
        write_gene(&mut out, &g, false).unwrap();
        let expected = "\
seq1\tmaker\tgene\t1\t60\t.\t-\t.\tID=g1;Dbxref=PFAM:PF0001
seq1\tmaker\tmRNA\t1\t60\t.\t-\t.\tID=g1.1;Parent=g1
seq1\tmaker\texon\t1\t60\t.\t-\t.\tID=g1.1:exon;Parent=g1.1
seq1\tmaker\tCDS\t1\t21\t.\t-\t0\tID=g1.1:cds;Parent=g1.1
seq1\tmaker\tCDS\t31\t60\t.\t-\t1\tID=g1.1:cds;Parent=g1.1
seq1\tmaker\tstop_codon\t1\t3\t.\t-\t.\tID=g1.1:stop_codon;Parent=g1.1
";
        assert_eq!(out, expected);
    }

    #[test]
    fn live_and_removed_streams_partition_transcripts() {
        let mut seq = Sequence::new("seq1", vec![b'A'; 500]);
        let mut g1 = gene("g1", 1, 60);
        g1.transcripts[1].death_flagged = true;
        let mut g2 = gene("g2", 100, 160);
        g2.death_flagged = true;
        for t in &mut g2.transcripts {
            t.death_flagged = true;
        }
        seq.add_gene(g1);
        seq.add_gene(g2);
        seq.add_gene(gene("g3", 200, 260));
        seq.remove_gene("g3");

        let mut live = String::new();
        write_sequence(&mut live, &seq).unwrap();
        let mut removed = String::new();
        write_removed(&mut removed, &seq).unwrap();

        let mrnas = |text: &str| -> Vec<String> {
            text.lines()
                .filter(|l| l.split('\t').nth(2) == Some("mRNA"))
                .map(|l| l.rsplit('\t').next().unwrap().to_string())
                .collect()
        };
        assert_eq!(mrnas(&live), vec!["ID=g1.1;Parent=g1"]);
        assert_eq!(
            mrnas(&removed),
            vec![
                "ID=g1.2;Parent=g1",
                "ID=g2.1;Parent=g2",
                "ID=g2.2;Parent=g2",
                "ID=g3.1;Parent=g3",
                "ID=g3.2;Parent=g3",
            ]
        );
        assert!(!live.contains("ID=g2;"));
    }

    #[test]
    fn lookups_by_identifier() {
        let mut seq = Sequence::new("seq1", vec![b'A'; 100]);
        seq.add_gene(gene("g1", 1, 60));
        assert!(gene_to_gff(&seq, "g1").unwrap().starts_with("seq1\tmaker\tgene"));
        assert!(gene_to_gff(&seq, "nope").is_none());
        let cds = cds_to_gff(&seq, "g1.2").unwrap();
        assert_eq!(cds.lines().count(), 2);
        assert!(cds.lines().all(|l| l.contains("\tCDS\t")));
    }
}
