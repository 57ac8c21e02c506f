//! Command-line runner for the demonstration groups.
//!
//! Usage:
//!   micro-bench                       # Run all groups
//!   micro-bench --list                # List available groups
//!   micro-bench dot                   # Run groups whose name contains "dot"
//!   micro-bench --format json -o out.jsonl
//!   micro-bench --help                # Show help

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use micro_bench::config::{parse_duration, HarnessConfig};
use micro_bench::demos::register_demos;
use micro_bench::output::{JsonPrinter, OutputFormat, Printer, TablePrinter};
use micro_bench::registry::BenchmarkRegistry;
use micro_bench::Runner;

/// Adaptive micro-benchmark runner
#[derive(Parser, Debug)]
#[command(name = "micro-bench")]
#[command(author, version, about = "Micro-Bench - adaptive micro-benchmark harness")]
struct Cli {
    /// Only run groups whose name contains this text
    filter: Option<String>,

    /// List available groups and exit
    #[arg(short, long)]
    list: bool,

    /// Minimum duration of one timed invocation (e.g. "100ms")
    #[arg(long)]
    min_time: Option<String>,

    /// Time budget per candidate (e.g. "1s")
    #[arg(long)]
    max_time: Option<String>,

    /// Iteration count the doubling search starts from
    #[arg(long)]
    iterations: Option<u64>,

    /// Output format: human, json
    #[arg(long)]
    format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to a discovered micro-bench.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vector length for the dot product group
    #[arg(long, default_value = "1024")]
    size: usize,

    /// Random seed for generated inputs (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "micro_bench=debug"
    } else {
        "micro_bench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => HarnessConfig::discover().transpose()?.unwrap_or_default(),
    };

    let mut options = config.options()?;
    if let Some(min_time) = &cli.min_time {
        options.min_time = parse_duration(min_time)?;
    }
    if let Some(max_time) = &cli.max_time {
        options.max_time = parse_duration(max_time)?;
    }
    if let Some(iterations) = cli.iterations {
        anyhow::ensure!(iterations > 0, "--iterations must be at least 1");
        options.iterations = iterations;
    }

    let format = match &cli.format {
        Some(format) => format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
        None => config.format()?,
    };

    let seed = cli.seed.unwrap_or_else(time_seed);
    let mut registry = BenchmarkRegistry::new();
    register_demos(&mut registry, cli.size, seed);
    if let Some(filter) = &cli.filter {
        registry.retain_groups(|name| name.contains(filter.as_str()));
    }

    if cli.list {
        println!("Available groups:");
        println!();
        for ns in registry.enumerate() {
            let labels: Vec<&str> = ns.candidates().iter().map(|c| c.label.as_str()).collect();
            let tag = if ns.has_baseline() { "compare" } else { "standalone" };
            println!("  {:<20} [{}] - {}", ns.name(), tag, labels.join(", "));
        }
        return Ok(());
    }

    if registry.is_empty() {
        anyhow::bail!("no group matches the filter");
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut printer: Box<dyn Printer> = match format {
        OutputFormat::Human => Box::new(TablePrinter::new(out)),
        OutputFormat::Json => Box::new(JsonPrinter::new(out)),
    };

    info!(seed, groups = registry.len(), "starting run");
    Runner::new(options, printer.as_mut()).run(registry)?;

    if let Some(path) = &cli.output {
        info!("results written to {}", path.display());
    }
    Ok(())
}
