//! GFF3 line and attribute parser.

use crate::strand::Strand;

use super::entry::{Attributes, GffRecord};

/// Kind of a raw GFF3 line before any feature handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(Box<GffRecord>),
    Comment,
    Invalid,
}

/// Classify a raw line as a comment, an invalid line, or a validated record.
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() || line.starts_with('#') {
        return ParsedLine::Comment;
    }
    match validate_line(line) {
        Some(record) => ParsedLine::Record(Box::new(record)),
        None => ParsedLine::Invalid,
    }
}

/// Validate one non-comment line.
///
/// A line is valid when it has exactly 9 tab-separated columns, integer
/// `start <= stop`, an `ID` attribute, and a `Parent` attribute unless the
/// feature is a gene.
#[must_use]
pub fn validate_line(line: &str) -> Option<GffRecord> {
    let columns: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if columns.len() != 9 {
        return None;
    }

    let start: i64 = columns[3].trim().parse().ok()?;
    let stop: i64 = columns[4].trim().parse().ok()?;
    if start > stop {
        return None;
    }

    let attributes = parse_attributes(columns[8])?;
    let feature_type = columns[2];
    if feature_type != "gene" && attributes.parent_id.is_none() {
        return None;
    }

    Some(GffRecord {
        seqid: columns[0].to_string(),
        source: columns[1].to_string(),
        feature_type: feature_type.to_string(),
        start,
        stop,
        score: columns[5].parse().ok(),
        strand: Strand::from_gff3(columns[6]),
        phase: parse_phase(columns[7]),
        attributes,
    })
}

fn parse_phase(s: &str) -> Option<u8> {
    match s {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        _ => None,
    }
}

/// Parse GFF3 column 9. Pairs without exactly one `=` are skipped; the
/// result is `None` when no `ID` was found.
#[must_use]
pub fn parse_attributes(field: &str) -> Option<Attributes> {
    let mut attrs = Attributes::default();
    let mut id = None;

    for pair in field.trim_matches([' ', '\t', '\n', '\r', ';']).split(';') {
        let mut parts = pair.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        match key {
            "ID" => id = Some(value.to_string()),
            "Name" => attrs.name = Some(value.to_string()),
            "Parent" => attrs.parent_id = Some(value.to_string()),
            "Dbxref" | "Ontology_term" => {
                attrs.annotations.push((key.to_string(), value.to_string()));
            }
            _ => {}
        }
    }

    attrs.id = id?;
    Some(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENE: &str = "seq1\tmaker\tgene\t100\t900\t.\t+\t.\tID=g1;Name=abc1;Dbxref=PFAM:PF0001";

    #[test]
    fn valid_gene_line() {
        let record = validate_line(GENE).unwrap();
        assert_eq!(record.seqid, "seq1");
        assert_eq!(record.source, "maker");
        assert_eq!(record.feature_type, "gene");
        assert_eq!((record.start, record.stop), (100, 900));
        assert_eq!(record.score, None);
        assert_eq!(record.strand, Strand::Forward);
        assert_eq!(record.phase, None);
        assert_eq!(record.attributes.id, "g1");
        assert_eq!(record.attributes.name.as_deref(), Some("abc1"));
        assert_eq!(
            record.attributes.annotations,
            vec![("Dbxref".to_string(), "PFAM:PF0001".to_string())]
        );
    }

    #[test]
    fn cds_line_fields() {
        let line = "seq1\tmaker\tCDS\t100\t200\t0.9\t-\t2\tID=c1;Parent=m1";
        let record = validate_line(line).unwrap();
        assert_eq!(record.score, Some(0.9));
        assert_eq!(record.strand, Strand::Reverse);
        assert_eq!(record.phase, Some(2));
        assert_eq!(record.attributes.parent_id.as_deref(), Some("m1"));
    }

    #[test]
    fn rejects_wrong_column_count() {
        assert!(validate_line("seq1\tmaker\tgene\t1\t10\t.\t+\tID=g1").is_none());
    }

    #[test]
    fn rejects_start_after_stop() {
        assert!(validate_line("seq1\tmaker\tgene\t10\t1\t.\t+\t.\tID=g1").is_none());
    }

    #[test]
    fn rejects_non_integer_coordinates() {
        assert!(validate_line("seq1\tmaker\tgene\tx\t10\t.\t+\t.\tID=g1").is_none());
    }

    #[test]
    fn rejects_missing_id() {
        assert!(validate_line("seq1\tmaker\tgene\t1\t10\t.\t+\t.\tName=abc").is_none());
    }

    #[test]
    fn non_gene_requires_parent() {
        assert!(validate_line("seq1\tmaker\tmRNA\t1\t10\t.\t+\t.\tID=m1").is_none());
        assert!(validate_line("seq1\tmaker\tmRNA\t1\t10\t.\t+\t.\tID=m1;Parent=g1").is_some());
    }

    #[test]
    fn unknown_phase_is_absent() {
        let record = validate_line("seq1\tmaker\tCDS\t1\t10\t.\t+\t3\tID=c1;Parent=m1").unwrap();
        assert_eq!(record.phase, None);
    }

    #[test]
    fn attributes_skip_malformed_pairs() {
        let attrs = parse_attributes("ID=m1;junk;a=b=c;Parent=g1;Ontology_term=GO:0001;").unwrap();
        assert_eq!(attrs.id, "m1");
        assert_eq!(attrs.parent_id.as_deref(), Some("g1"));
        assert_eq!(
            attrs.annotations,
            vec![("Ontology_term".to_string(), "GO:0001".to_string())]
        );
    }

    #[test]
    fn attributes_without_id() {
        assert!(parse_attributes("Parent=g1;Name=x").is_none());
    }

    #[test]
    fn comment_and_empty_lines() {
        assert_eq!(parse_line("##gff-version 3"), ParsedLine::Comment);
        assert_eq!(parse_line(""), ParsedLine::Comment);
        assert_eq!(parse_line("garbage"), ParsedLine::Invalid);
        assert!(matches!(parse_line(GENE), ParsedLine::Record(_)));
    }

    #[test]
    fn record_display_is_revalidated() {
        let record = validate_line(GENE).unwrap();
        let again = validate_line(&record.to_string()).unwrap();
        assert_eq!(record, again);
    }
}
