//! Codon recognition, reverse complement, and CDS translation.

/// Codons accepted as a translation start.
pub const START_CODONS: [&[u8; 3]; 1] = [b"ATG"];

/// Codons accepted as a translation stop.
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];

/// Lookup table for translating codons to amino acids.
///
/// Indexed by 6-bit codon encoding: A=0, C=1, G=2, T/U=3.
/// Index = first*16 + second*4 + third.
pub struct CodonTable {
    table: [u8; 64],
}

fn base_to_index(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

impl CodonTable {
    /// Standard genetic code (NCBI translation table 1).
    #[must_use]
    pub fn standard() -> Self {
        #[rustfmt::skip]
        let table: [u8; 64] = [
            b'K', b'N', b'K', b'N',  // AA*
            b'T', b'T', b'T', b'T',  // AC*
            b'R', b'S', b'R', b'S',  // AG*
            b'I', b'I', b'M', b'I',  // AT*
            b'Q', b'H', b'Q', b'H',  // CA*
            b'P', b'P', b'P', b'P',  // CC*
            b'R', b'R', b'R', b'R',  // CG*
            b'L', b'L', b'L', b'L',  // CT*
            b'E', b'D', b'E', b'D',  // GA*
            b'A', b'A', b'A', b'A',  // GC*
            b'G', b'G', b'G', b'G',  // GG*
            b'V', b'V', b'V', b'V',  // GT*
            b'*', b'Y', b'*', b'Y',  // TA*
            b'S', b'S', b'S', b'S',  // TC*
            b'*', b'C', b'W', b'C',  // TG*
            b'L', b'F', b'L', b'F',  // TT*
        ];
        Self { table }
    }

    /// Translate a single codon (3 bytes) to an amino acid.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        if codon.len() < 3 {
            return b'X';
        }
        match (
            base_to_index(codon[0]),
            base_to_index(codon[1]),
            base_to_index(codon[2]),
        ) {
            (Some(a), Some(b), Some(c)) => self.table[a * 16 + b * 4 + c],
            _ => b'X',
        }
    }
}

/// Translate a CDS nucleotide sequence to a protein sequence.
pub fn translate(cds: &[u8], table: &CodonTable) -> Vec<u8> {
    let mut protein = Vec::with_capacity(cds.len() / 3 + 1);
    let mut codons = cds.chunks_exact(3);
    for codon in codons.by_ref() {
        protein.push(table.translate_codon(codon));
    }
    if !codons.remainder().is_empty() {
        protein.push(b'X');
    }
    protein
}

fn matches_any(triplet: &[u8], set: &[&[u8; 3]]) -> bool {
    triplet.len() == 3 && set.iter().any(|codon| triplet.eq_ignore_ascii_case(*codon))
}

#[must_use]
pub fn is_start_codon(triplet: &[u8]) -> bool {
    matches_any(triplet, &START_CODONS)
}

#[must_use]
pub fn is_stop_codon(triplet: &[u8]) -> bool {
    matches_any(triplet, &STOP_CODONS)
}

fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' | b'u' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'R' => b'Y',
        b'Y' => b'R',
        b'r' => b'y',
        b'y' => b'r',
        b'K' => b'M',
        b'M' => b'K',
        b'k' => b'm',
        b'm' => b'k',
        b'B' => b'V',
        b'V' => b'B',
        b'b' => b'v',
        b'v' => b'b',
        b'D' => b'H',
        b'H' => b'D',
        b'd' => b'h',
        b'h' => b'd',
        other => other,
    }
}

/// Reverse complement, preserving case; `N`, `S` and `W` map to themselves.
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_start_codon() {
        let table = CodonTable::standard();
        assert_eq!(table.translate_codon(b"ATG"), b'M');
    }

    #[test]
    fn standard_stop_codons() {
        let table = CodonTable::standard();
        assert_eq!(table.translate_codon(b"TAA"), b'*');
        assert_eq!(table.translate_codon(b"TAG"), b'*');
        assert_eq!(table.translate_codon(b"TGA"), b'*');
    }

    #[test]
    fn translate_short_orf() {
        let table = CodonTable::standard();
        assert_eq!(translate(b"ATGGCATGCTAA", &table), b"MAC*");
    }

    #[test]
    fn translate_incomplete_codon() {
        let table = CodonTable::standard();
        assert_eq!(translate(b"ATGGC", &table), b"MX");
        assert!(translate(b"", &table).is_empty());
    }

    #[test]
    fn ambiguous_base() {
        let table = CodonTable::standard();
        assert_eq!(table.translate_codon(b"NNN"), b'X');
        assert_eq!(table.translate_codon(b"ATN"), b'X');
    }

    #[test]
    fn codon_sets_ignore_case() {
        assert!(is_start_codon(b"atg"));
        assert!(!is_start_codon(b"ATGA"));
        assert!(is_stop_codon(b"tGa"));
        assert!(!is_stop_codon(b"TGG"));
    }

    #[test]
    fn reverse_complement_keeps_case() {
        assert_eq!(reverse_complement(b"ATGCn"), b"nGCAT");
        assert_eq!(reverse_complement(b"aacG"), b"Cgtt");
        assert!(reverse_complement(b"").is_empty());
    }
}
