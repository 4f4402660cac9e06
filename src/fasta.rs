//! FASTA reading and the FASTA flavours emitted for a sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::codon::{self, CodonTable};
use crate::error::Error;
use crate::sequence::{Sequence, subsequence};

/// Reads a FASTA file, decompressing it when the name ends in `.gz`.
pub fn read_fasta_path(path: &Path) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        read_fasta_gz(file)
    } else {
        read_fasta(BufReader::new(file))
    }
}

/// Reads gzip-compressed FASTA and yields (identifier, bases) pairs.
pub fn read_fasta_gz<R: Read>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    read_fasta(BufReader::new(GzDecoder::new(reader)))
}

/// Reads FASTA from a buffered reader and yields (identifier, bases) pairs.
///
/// The identifier is the first whitespace-delimited token after `>`.
/// Sequence lines are folded together with their case kept.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut results: Vec<(String, Vec<u8>)> = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_bases: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                results.push((id, std::mem::take(&mut current_bases)));
            }
            let id = header
                .split_whitespace()
                .next()
                .ok_or_else(|| Error::Parse(format!("empty FASTA header: {line}")))?;
            current_id = Some(id.to_string());
        } else if current_id.is_some() {
            current_bases.extend_from_slice(line.trim().as_bytes());
        }
    }

    if let Some(id) = current_id {
        results.push((id, current_bases));
    }

    Ok(results)
}

/// Which records to emit for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastaKind {
    /// The whole sequence under its own identifier.
    Genome,
    /// Each gene span, reverse-complemented on the minus strand.
    Gene,
    /// Spliced exons of each transcript.
    Mrna,
    /// Spliced coding bases of each transcript.
    Cds,
    /// Translated CDS of each transcript.
    Protein,
}

fn write_record<W: Write>(out: &mut W, header: &str, bases: &[u8]) -> Result<(), Error> {
    writeln!(out, ">{header}")?;
    out.write_all(bases)?;
    writeln!(out)?;
    Ok(())
}

/// Emit `kind` records for the live features of `seq`. Empty extractions are
/// skipped.
pub fn write_fasta<W: Write>(seq: &Sequence, kind: FastaKind, out: &mut W) -> Result<(), Error> {
    if kind == FastaKind::Genome {
        return write_record(out, &seq.header, &seq.bases);
    }

    let table = CodonTable::standard();
    for gene in seq.genes.iter().filter(|g| g.is_alive()) {
        if kind == FastaKind::Gene {
            let Some(span) = subsequence(&seq.bases, gene.indices.start, gene.indices.stop) else {
                continue;
            };
            let bases = if gene.strand.is_reverse() {
                codon::reverse_complement(span)
            } else {
                span.to_vec()
            };
            write_record(out, &gene.identifier, &bases)?;
            continue;
        }

        for transcript in gene.live_transcripts() {
            let bases = match kind {
                FastaKind::Mrna => transcript
                    .exon
                    .as_ref()
                    .map(|exon| exon.extract_sequence(&seq.bases, gene.strand)),
                FastaKind::Cds => transcript
                    .cds
                    .as_ref()
                    .map(|cds| cds.extract_sequence(&seq.bases, gene.strand)),
                FastaKind::Protein => transcript.cds.as_ref().map(|cds| {
                    let coding = cds.extract_sequence(&seq.bases, gene.strand);
                    let offset = usize::from(cds.phase(0).unwrap_or(0)).min(coding.len());
                    codon::translate(&coding[offset..], &table)
                }),
                FastaKind::Genome | FastaKind::Gene => None,
            };
            if let Some(bases) = bases.filter(|b| !b.is_empty()) {
                write_record(out, &transcript.identifier, &bases)?;
            }
        }
    }
    Ok(())
}
