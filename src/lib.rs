//! genofix: genome annotation curation.
//!
//! Loads a FASTA genome and its GFF3 annotation into a gene → transcript →
//! CDS/exon tree, applies coordinate-safe edits to working copies, and writes
//! the result as GFF3, NCBI feature table, and FASTA.

pub mod error;

pub mod cli;
pub mod codon;
pub mod config;
pub mod fasta;
pub mod feature;
pub mod filter;
pub mod fix;
pub mod genome;
pub mod gff3;
pub mod interval;
pub mod sequence;
pub mod stats;
pub mod strand;
pub mod tbl;
