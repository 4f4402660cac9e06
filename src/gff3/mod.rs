//! GFF3 ingestion and emission.
//!
//! Reading partitions the input into comments, invalid lines, unmodelled
//! feature types, and the records the gene model is built from.

pub mod entry;
pub mod hierarchy;
pub mod parser;
pub mod writer;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::info;

use crate::error::Error;

pub use entry::{Attributes, FeatureType, GffReadResult, GffRecord};
pub use hierarchy::{GffBuilder, Placement};
use parser::ParsedLine;

/// Read GFF3 from a file; names ending in `.gz` are decompressed.
pub fn read_gff3_path(path: &Path) -> Result<GffReadResult, Error> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        read_gff3_gz(file)
    } else {
        read_gff3(BufReader::new(file))
    }
}

/// Read gzip-compressed GFF3.
pub fn read_gff3_gz<R: Read>(reader: R) -> Result<GffReadResult, Error> {
    read_gff3(BufReader::new(GzDecoder::new(reader)))
}

/// Read GFF3 from a buffered reader.
pub fn read_gff3<R: BufRead>(reader: R) -> Result<GffReadResult, Error> {
    let mut builder = GffBuilder::new();
    let mut result = GffReadResult::default();

    for line in reader.lines() {
        let line = line?;
        match parser::parse_line(&line) {
            ParsedLine::Comment => result.comments.push(line),
            ParsedLine::Invalid => result.invalid.push(line),
            ParsedLine::Record(record) => match builder.add(*record) {
                Placement::Placed | Placement::Orphaned => {}
                Placement::Ignored => result.ignored.push(line),
                Placement::Duplicate => result.invalid.push(line),
            },
        }
    }

    result.skipped_features = builder.skipped_features();
    let (genes, unresolved) = builder.build()?;
    info!(
        genes = genes.len(),
        comments = result.comments.len(),
        invalid = result.invalid.len(),
        ignored = result.ignored.len(),
        "read GFF3"
    );
    result.genes = genes;
    result.unresolved = unresolved;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::strand::Strand;
    use std::io::{Cursor, Write};

    const GFF: &str = "\
##gff-version 3
seq1\tmaker\tCDS\t10\t30\t.\t+\t0\tID=m1:cds;Parent=m1
seq1\tmaker\tgene\t1\t100\t.\t+\t.\tID=g1;Name=abc1
seq1\tmaker\tmRNA\t1\t100\t.\t+\t.\tID=m1;Parent=g1
seq1\tmaker\texon\t1\t100\t.\t+\t.\tID=m1:exon;Parent=m1
seq1\tmaker\tfive_prime_UTR\t1\t9\t.\t+\t.\tID=m1:utr;Parent=m1
seq1\tmaker\tgene\t1\t100
seq1\tmaker\tgene\t1\t100\t.\t+\t.\tID=g1
seq2\tmaker\tgene\t5\t50\t.\t-\t.\tID=g2

# trailing comment
";

    #[test]
    fn partitions_every_line() {
        let result = read_gff3(Cursor::new(GFF)).unwrap();
        assert_eq!(result.genes.len(), 2);
        assert_eq!(result.comments.len(), 3);
        assert_eq!(result.invalid.len(), 2);
        assert_eq!(result.ignored.len(), 1);
        assert_eq!(result.skipped_features, 1);
        assert!(result.unresolved.is_empty());

        let tx = &result.genes[0].transcripts[0];
        assert_eq!(tx.cds.as_ref().unwrap().pairs(), &[Interval::new(10, 30)]);
        assert_eq!(result.genes[0].name.as_deref(), Some("abc1"));
        assert_eq!(result.genes[1].strand, Strand::Reverse);
    }

    #[test]
    fn invalid_partition_is_stable_on_reread() {
        let bad = "\
seq1\tmaker\tgene\t1\t100
seq1\tmaker\tgene\t9\t1\t.\t+\t.\tID=g1
seq1\tmaker\tmRNA\t1\t9\t.\t+\t.\tID=m1
";
        let first = read_gff3(Cursor::new(bad)).unwrap();
        assert_eq!(first.invalid.len(), 3);
        let again = read_gff3(Cursor::new(first.invalid.join("\n"))).unwrap();
        assert_eq!(again.invalid, first.invalid);
        assert!(again.genes.is_empty());
    }

    #[test]
    fn groups_by_sequence() {
        let mut result = read_gff3(Cursor::new(GFF)).unwrap();
        let grouped = result.by_sequence();
        assert_eq!(grouped["seq1"].len(), 1);
        assert_eq!(grouped["seq2"][0].identifier, "g2");
        assert!(result.genes.is_empty());
    }

    #[test]
    fn round_trip_keeps_features() {
        let gff = "\
seq1\tmaker\tgene\t1\t90\t.\t-\t.\tID=g1
seq1\tmaker\tmRNA\t1\t90\t.\t-\t.\tID=m1;Parent=g1
seq1\tmaker\texon\t1\t90\t.\t-\t.\tID=m1:exon;Parent=m1
seq1\tmaker\tCDS\t1\t90\t.\t-\t0\tID=m1:cds;Parent=m1
";
        let first = read_gff3(Cursor::new(gff)).unwrap();
        let mut emitted = String::new();
        writer::write_gene(&mut emitted, &first.genes[0], false).unwrap();
        let second = read_gff3(Cursor::new(emitted.as_str())).unwrap();
        assert_eq!(first.genes, second.genes);
        assert_eq!(emitted, gff);
    }

    #[test]
    fn gzip_path_is_decompressed() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.gff.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::fast());
        encoder.write_all(GFF.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let result = read_gff3_path(&path).unwrap();
        assert_eq!(result.genes.len(), 2);
    }

    #[test]
    fn missing_parent_gene_fails() {
        let gff = "seq1\tmaker\tmRNA\t1\t90\t.\t+\t.\tID=m1;Parent=g1\n";
        assert!(matches!(
            read_gff3(Cursor::new(gff)),
            Err(Error::MissingParent { .. })
        ));
    }
}
