//! Trace-driven cache simulator CLI.
//!
//! This binary replays a memory-access trace against one cache configuration. It performs:
//! 1. **Configuration:** Built-in defaults, optionally a JSON options file, then command-line overrides.
//! 2. **Replay:** Every trace record is classified as hit or miss; the cache is flushed at the end.
//! 3. **Report:** Settings and statistics as text (default) or JSON.

mod report;

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use cachesim_core::cache::configure;
use cachesim_core::config::{AllocPolicy, CacheOptions, WritePolicy};
use cachesim_core::sim::{Simulator, TraceReader};

use crate::report::{JsonReport, Report, SECTIONS};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a memory-access trace through a set-associative LRU cache and report hits, misses, replacements and memory traffic.\n\nTrace lines are `<label> <hex address>` with label 0 = load, 1 = store, 2 = instruction fetch.\n\nExamples:\n  cachesim traces/spice.trace\n  cachesim --icache-size 8192 --dcache-size 8192 --assoc 2 traces/cc.trace\n  cachesim --write-through --no-write-allocate --json - < traces/tex.trace"
)]
struct Cli {
    /// Trace file; `-` or nothing reads standard input.
    trace: Option<PathBuf>,

    /// JSON options file applied before the flags below.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Block size in bytes.
    #[arg(long, value_name = "BYTES")]
    block_size: Option<usize>,

    /// Unified cache size in bytes (disables split mode).
    #[arg(long, value_name = "BYTES", conflicts_with_all = ["icache_size", "dcache_size"])]
    unified_size: Option<usize>,

    /// Instruction cache size in bytes (enables split mode).
    #[arg(long, value_name = "BYTES")]
    icache_size: Option<usize>,

    /// Data cache size in bytes (enables split mode).
    #[arg(long, value_name = "BYTES")]
    dcache_size: Option<usize>,

    /// Associativity (lines per set).
    #[arg(short, long, value_name = "WAYS")]
    assoc: Option<usize>,

    /// Use the write-back policy.
    #[arg(long, conflicts_with = "write_through")]
    write_back: bool,

    /// Use the write-through policy.
    #[arg(long)]
    write_through: bool,

    /// Allocate a line on store misses.
    #[arg(long, conflicts_with = "no_write_allocate")]
    write_allocate: bool,

    /// Do not allocate a line on store misses.
    #[arg(long)]
    no_write_allocate: bool,

    /// Print settings and statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Report sections to print (comma separated); all by default.
    #[arg(long, value_delimiter = ',', value_parser = PossibleValuesParser::new(SECTIONS.iter().copied()))]
    sections: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Defaults to `RUST_LOG`.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Resolves the option set: defaults, then the JSON file, then flags.
    fn options(&self) -> Result<CacheOptions, Box<dyn Error>> {
        let mut options = match &self.config {
            Some(path) => CacheOptions::from_json_file(path)?,
            None => CacheOptions::default(),
        };
        if let Some(size) = self.unified_size {
            options.unified_size = size;
            options.instruction_size = None;
            options.data_size = None;
        }
        if let Some(size) = self.icache_size {
            options.instruction_size = Some(size);
        }
        if let Some(size) = self.dcache_size {
            options.data_size = Some(size);
        }
        if let Some(block) = self.block_size {
            options.block_size = block;
        }
        if let Some(ways) = self.assoc {
            options.associativity = ways;
        }
        if self.write_back {
            options.write_policy = WritePolicy::WriteBack;
        }
        if self.write_through {
            options.write_policy = WritePolicy::WriteThrough;
        }
        if self.write_allocate {
            options.alloc_policy = AllocPolicy::WriteAllocate;
        }
        if self.no_write_allocate {
            options.alloc_policy = AllocPolicy::NoWriteAllocate;
        }
        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber.
///
/// `-v` flags take precedence over `RUST_LOG`; without either only warnings are shown.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the model, replays the trace and prints the report.
fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let options = cli.options()?;
    let model = configure(&options)?;
    let mut sim = Simulator::new(model);

    match cli.trace.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            tracing::info!(trace = %path.display(), "replaying trace file");
            replay(&mut sim, TraceReader::open(path)?)?;
        }
        _ => {
            tracing::info!("replaying trace from stdin");
            replay(&mut sim, TraceReader::new(io::stdin().lock()))?;
        }
    }

    let model = sim.model();
    if cli.json {
        let report = JsonReport {
            records: sim.records(),
            config: model.config(),
            stats: model.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", Report::new(model.config(), model.stats(), &cli.sections));
    }
    Ok(())
}

fn replay<R: BufRead>(sim: &mut Simulator, reader: TraceReader<R>) -> Result<(), Box<dyn Error>> {
    let _ = sim.run(reader)?;
    Ok(())
}
