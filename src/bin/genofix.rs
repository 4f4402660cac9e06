use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use genofix::cli;
use genofix::config::PolicyConfig;
use genofix::fasta::{self, FastaKind};
use genofix::genome::{Genome, Policy};
use genofix::gff3::{GffReadResult, writer};
use genofix::stats;
use genofix::tbl;

#[derive(Parser)]
#[command(name = "genofix", about = "Curate a genome annotation and write submission files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Inputs {
    /// Genome FASTA file (plain or .gz)
    #[arg(short = 'f', long = "fasta")]
    fasta: PathBuf,

    /// GFF3 annotation file (plain or .gz)
    #[arg(short = 'g', long = "gff")]
    gff: PathBuf,

    /// JSON policy file with fixes and filters
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Write GFF3, feature table, and FASTA files for the curated genome
    Write {
        #[command(flatten)]
        inputs: Inputs,

        /// Output directory; must not exist yet
        #[arg(short = 'o', long = "out")]
        out: PathBuf,

        /// Trim leading and trailing runs of N
        #[arg(long = "fix-terminal-ns")]
        fix_terminal_ns: bool,

        /// Add start and stop codon markers
        #[arg(long = "fix-start-stop")]
        fix_start_stop: bool,
    },
    /// Compare statistics of the loaded and the curated genome
    Stats {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// List the first identifiers of a kind
    Ids {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(short = 'k', long = "kind", value_enum, default_value = "gene")]
        kind: IdKind,

        #[arg(short = 'n', default_value_t = 10)]
        count: usize,
    },
    /// Print one feature or a stretch of sequence
    #[command(group(ArgGroup::new("target").required(true).args(["gene", "cds", "seq"])))]
    Show {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(long = "gene")]
        gene: Option<String>,

        #[arg(long = "cds")]
        cds: Option<String>,

        #[arg(long = "seq")]
        seq: Option<String>,

        /// Print GFF3 lines instead of bases
        #[arg(long = "gff", conflicts_with = "tbl")]
        gff: bool,

        /// Print feature-table entries
        #[arg(long = "tbl")]
        tbl: bool,

        #[arg(long = "start", requires = "seq")]
        start: Option<i64>,

        #[arg(long = "stop", requires = "seq")]
        stop: Option<i64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum IdKind {
    Seq,
    Gene,
    Mrna,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(inputs: &Inputs) -> Result<(Genome, GffReadResult, Policy)> {
    cli::section("Input");
    cli::input_path("FASTA", &inputs.fasta);
    cli::input_path("GFF3", &inputs.gff);

    let policy = match &inputs.config {
        Some(path) => {
            cli::input_path("Config", path);
            PolicyConfig::from_file(path)?.to_policy()
        }
        None => Policy::default(),
    };

    let (genome, gff) = Genome::load(&inputs.fasta, &inputs.gff).with_context(|| {
        format!(
            "failed to load {} and {}",
            inputs.fasta.display(),
            inputs.gff.display()
        )
    })?;

    cli::ingest_report(genome.sequences.len(), genome.gene_count(), &gff);

    Ok((genome, gff, policy))
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<()> {
    let path = dir.join(name);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(contents)
        .and_then(|()| out.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    cli::written(name, contents.len());
    Ok(())
}

fn join_lines(entries: &[String]) -> Vec<u8> {
    let mut text = entries.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text.into_bytes()
}

fn run_write(inputs: &Inputs, out: &Path, fix_terminal_ns: bool, fix_start_stop: bool) -> Result<()> {
    if out.exists() {
        bail!("output directory already exists: {}", out.display());
    }

    let (genome, gff, mut policy) = load(inputs)?;
    policy.fix.terminal_ns |= fix_terminal_ns;
    policy.fix.start_stop_codons |= fix_start_stop;
    let curated = genome.working_copy(&policy);

    let mut live = String::from("##gff-version 3\n");
    let mut removed = String::from("##gff-version 3\n");
    let mut table = String::new();
    for seq in &curated.sequences {
        writer::write_sequence(&mut live, seq)?;
        writer::write_removed(&mut removed, seq)?;
        tbl::write_tbl(&mut table, seq)?;
    }

    let fasta_files = [
        ("genome.fasta", FastaKind::Genome),
        ("genome.genes.fasta", FastaKind::Gene),
        ("genome.mrna.fasta", FastaKind::Mrna),
        ("genome.cds.fasta", FastaKind::Cds),
        ("genome.proteins.fasta", FastaKind::Protein),
    ];

    cli::section("Output");
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory: {}", out.display()))?;
    write_file(out, "genome.gff", live.as_bytes())?;
    write_file(out, "genome.removed.gff", removed.as_bytes())?;
    write_file(out, "genome.tbl", table.as_bytes())?;
    for (name, kind) in fasta_files {
        let mut buf = Vec::new();
        for seq in &curated.sequences {
            fasta::write_fasta(seq, kind, &mut buf)?;
        }
        write_file(out, name, &buf)?;
    }
    write_file(out, "genome.comments.gff", &join_lines(&gff.comments))?;
    write_file(out, "genome.invalid.gff", &join_lines(&gff.invalid))?;
    write_file(out, "genome.ignored.gff", &join_lines(&gff.ignored))?;
    Ok(())
}

fn run_stats(inputs: &Inputs) -> Result<()> {
    let (genome, _, policy) = load(inputs)?;
    let reference = genome.stats();
    let modified = genome.working_copy(&policy).stats();
    print!("{}", stats::summary(&reference, &modified));
    Ok(())
}

fn run_ids(inputs: &Inputs, kind: IdKind, count: usize) -> Result<()> {
    let (genome, _, _) = load(inputs)?;
    let ids = match kind {
        IdKind::Seq => genome.first_seq_ids(count),
        IdKind::Gene => genome.first_gene_ids(count),
        IdKind::Mrna => genome.first_transcript_ids(count),
    };
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

struct ShowTarget<'a> {
    gene: Option<&'a str>,
    cds: Option<&'a str>,
    seq: Option<&'a str>,
    gff: bool,
    tbl: bool,
    start: Option<i64>,
    stop: Option<i64>,
}

fn run_show(inputs: &Inputs, target: &ShowTarget<'_>) -> Result<()> {
    let (genome, _, policy) = load(inputs)?;
    let curated = genome.working_copy(&policy);
    let mut text = String::new();

    if let Some(gene_id) = target.gene {
        let Some(seq) = curated.sequence_for_gene(gene_id) else {
            bail!("no gene with identifier '{gene_id}'");
        };
        if target.tbl {
            if let Some(gene) = seq.gene(gene_id) {
                text = tbl::gene_to_tbl(gene)?;
            }
        } else if let Some(gff) = writer::gene_to_gff(seq, gene_id) {
            text = gff;
        }
    } else if let Some(transcript_id) = target.cds {
        let Some(seq) = curated.sequence_for_transcript(transcript_id) else {
            bail!("no mRNA with identifier '{transcript_id}'");
        };
        if target.gff {
            text = writer::cds_to_gff(seq, transcript_id).unwrap_or_default();
        } else if target.tbl {
            if let Some((gene, transcript)) = seq.transcript(transcript_id) {
                text = tbl::transcript_to_tbl(transcript, gene.strand)?;
            }
        } else if let Some(bases) = seq.extract_cds_seq(transcript_id) {
            writeln!(text, ">{transcript_id}")?;
            writeln!(text, "{}", String::from_utf8_lossy(&bases))?;
        }
    } else if let Some(seq_id) = target.seq {
        let Some(seq) = curated.sequence(seq_id) else {
            bail!("no sequence with identifier '{seq_id}'");
        };
        let start = target.start.unwrap_or(1);
        let stop = target.stop.unwrap_or(seq.len() as i64);
        let Some(bases) = seq.get_subseq(start, stop) else {
            bail!(
                "region {start}-{stop} is outside '{seq_id}' (length {})",
                seq.len()
            );
        };
        writeln!(text, ">{seq_id}:{start}-{stop}")?;
        writeln!(text, "{}", String::from_utf8_lossy(bases))?;
    }

    print!("{text}");
    Ok(())
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    init_tracing(cli_args.verbose);

    match &cli_args.command {
        Command::Write {
            inputs,
            out,
            fix_terminal_ns,
            fix_start_stop,
        } => {
            cli::banner("Write");
            run_write(inputs, out, *fix_terminal_ns, *fix_start_stop)?;
        }
        Command::Stats { inputs } => {
            cli::banner("Stats");
            run_stats(inputs)?;
        }
        Command::Ids {
            inputs,
            kind,
            count,
        } => {
            cli::banner("Identifiers");
            run_ids(inputs, *kind, *count)?;
        }
        Command::Show {
            inputs,
            gene,
            cds,
            seq,
            gff,
            tbl,
            start: from,
            stop,
        } => {
            cli::banner("Show");
            let target = ShowTarget {
                gene: gene.as_deref(),
                cds: cds.as_deref(),
                seq: seq.as_deref(),
                gff: *gff,
                tbl: *tbl,
                start: *from,
                stop: *stop,
            };
            run_show(inputs, &target)?;
        }
    }

    cli::print_elapsed(start);
    Ok(())
}
