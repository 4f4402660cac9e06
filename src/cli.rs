//! Coloured stderr reporting for the genofix binary.

use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;

use crate::gff3::GffReadResult;

pub fn banner(command: &str) {
    eprintln!();
    eprintln!("{} {}", "genofix".bold().green(), command.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    eprintln!("{} {}", title.bold().blue(), "─".repeat(50).dimmed());
}

fn field(key: &str, value: impl std::fmt::Display) {
    eprintln!("  {:<20} {value}", key.dimmed());
}

fn caution(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

pub fn input_path(key: &str, path: &Path) {
    field(key, path.display());
}

/// Sequence and gene counts of a loaded genome, followed by one warning per
/// non-empty GFF3 side channel.
pub fn ingest_report(sequences: usize, genes: usize, gff: &GffReadResult) {
    field("Sequences", sequences);
    field("Genes", genes);
    if !gff.invalid.is_empty() {
        caution(&format!("{} invalid GFF3 lines", gff.invalid.len()));
    }
    if !gff.ignored.is_empty() {
        caution(&format!("{} GFF3 lines ignored", gff.ignored.len()));
    }
    if gff.skipped_features > 0 {
        caution(&format!("{} features of unmodelled types skipped", gff.skipped_features));
    }
    if !gff.unresolved.is_empty() {
        caution(&format!("{} child features without a transcript", gff.unresolved.len()));
    }
    eprintln!();
}

/// Human-readable size with binary prefixes.
#[must_use]
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn written(name: &str, bytes: usize) {
    eprintln!(
        "  {} {:<24} {}",
        "✓".green().bold(),
        name,
        format_size(bytes).dimmed()
    );
}

/// Formats a duration as HH:MM:SS.d (tenths of a second).
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    format!(
        "{:02}:{:02}:{:02}.{tenths}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

pub fn print_elapsed(start: Instant) {
    eprintln!();
    eprintln!("{}  {}", "Elapsed".dimmed(), format_elapsed(start.elapsed()).bold());
    eprintln!();
}
