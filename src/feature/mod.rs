//! Feature tree: gene → transcript → CDS / exon / codon markers.
//!
//! Every level is a plain owned struct. Children hold no reference to their
//! parent; operations that need the gene's strand take it as an argument.

pub mod cds;
pub mod exon;
pub mod gene;
pub mod other;
pub mod segment;
pub mod transcript;

pub use cds::Cds;
pub use exon::Exon;
pub use gene::{Gene, PartialCounts};
pub use other::{OtherFeature, OtherFeatureKind};
pub use segment::Segments;
pub use transcript::{Partiality, Transcript};
