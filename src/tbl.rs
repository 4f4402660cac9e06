//! NCBI feature-table emission.
//!
//! Coordinates are printed 5' to 3', so minus-strand pairs come out as
//! `stop start`. Partial features get `<` on their first coordinate when the
//! start codon is missing and `>` on their last coordinate when the stop
//! codon is missing.

use std::fmt::{self, Write};

use crate::feature::{Gene, Transcript};
use crate::interval::Interval;
use crate::sequence::Sequence;
use crate::strand::Strand;

/// Prefix of every qualifier line.
pub const QUALIFIER_INDENT: &str = "\t\t\t";

const HYPOTHETICAL_PRODUCT: &str = "hypothetical protein";

fn qualifier<W: Write>(out: &mut W, key: &str, value: &str) -> fmt::Result {
    writeln!(out, "{QUALIFIER_INDENT}{key}\t{value}")
}

fn intervals<W: Write>(
    out: &mut W,
    feature: &str,
    pairs: &[Interval],
    strand: Strand,
    has_start: bool,
    has_stop: bool,
) -> fmt::Result {
    let last = pairs.len().saturating_sub(1);
    for (i, pair) in pairs.iter().enumerate() {
        let (first, second) = strand.oriented(pair.start, pair.stop);
        let open = if i == 0 && !has_start { "<" } else { "" };
        let close = if i == last && !has_stop { ">" } else { "" };
        write!(out, "{open}{first}\t{close}{second}")?;
        if i == 0 {
            write!(out, "\t{feature}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// mRNA and CDS entries of one transcript on a gene of the given strand.
pub fn write_transcript<W: Write>(
    out: &mut W,
    transcript: &Transcript,
    strand: Strand,
) -> fmt::Result {
    let has_start = transcript.has_start();
    let has_stop = transcript.has_stop();
    let hypothetical = transcript.is_hypothetical();

    let span = [transcript.indices];
    let mrna_pairs = transcript.exon.as_ref().map_or(&span[..], |exon| exon.pairs());
    intervals(out, "mRNA", mrna_pairs, strand, has_start, has_stop)?;
    if hypothetical {
        qualifier(out, "product", HYPOTHETICAL_PRODUCT)?;
    }

    if let Some(cds) = &transcript.cds {
        intervals(out, "CDS", cds.pairs(), strand, has_start, has_stop)?;
        let codon_start = cds.phase(0).unwrap_or(0) + 1;
        qualifier(out, "codon_start", &codon_start.to_string())?;
        if hypothetical {
            qualifier(out, "product", HYPOTHETICAL_PRODUCT)?;
        }
    }
    Ok(())
}

/// Feature-table entries of one live gene and its live transcripts.
pub fn write_gene<W: Write>(out: &mut W, gene: &Gene) -> fmt::Result {
    if !gene.is_alive() {
        return Ok(());
    }
    intervals(
        out,
        "gene",
        &[gene.indices],
        gene.strand,
        gene.has_start(),
        gene.has_stop(),
    )?;

    let gene_value = gene.annotation("gene").or(gene.name.as_deref());
    if let Some(value) = gene_value {
        if gene.is_hypothetical() {
            qualifier(out, "note", &format!("gene {value}"))?;
        } else {
            qualifier(out, "gene", value)?;
        }
    }
    qualifier(out, "locus_tag", &gene.identifier)?;
    for (key, value) in gene.annotations.iter().filter(|(k, _)| k != "gene") {
        qualifier(out, key, value)?;
    }

    for transcript in gene.live_transcripts() {
        write_transcript(out, transcript, gene.strand)?;
    }
    Ok(())
}

/// `>Feature` block for a sequence.
pub fn write_tbl<W: Write>(out: &mut W, seq: &Sequence) -> fmt::Result {
    writeln!(out, ">Feature {}", seq.header)?;
    for gene in &seq.genes {
        write_gene(out, gene)?;
    }
    Ok(())
}

pub fn sequence_to_tbl(seq: &Sequence) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_tbl(&mut out, seq)?;
    Ok(out)
}

pub fn gene_to_tbl(gene: &Gene) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_gene(&mut out, gene)?;
    Ok(out)
}

pub fn transcript_to_tbl(transcript: &Transcript, strand: Strand) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_transcript(&mut out, transcript, strand)?;
    Ok(out)
}
