//! memfit CLI
//!
//! Runs the placement strategies over blocks and processes given on the
//! command line, in a TOML file, or typed at the prompt.

use anyhow::{Context, Result};
use clap::Parser;
use memfit::{OutputFormat, SimulationBuilder, SimulationConfig, Strategy};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "memfit")]
#[command(about = "Fixed-partition memory allocation simulator (first, best, worst fit)")]
struct Args {
    /// Memory blocks, comma-separated (e.g. "100 KB, 1 MB")
    #[arg(short = 'b', long)]
    blocks: Option<String>,

    /// Process sizes, comma-separated, in arrival order
    #[arg(short = 'p', long)]
    processes: Option<String>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Strategy to run (first-fit, best-fit, worst-fit); repeatable [default: all]
    #[arg(short = 's', long = "strategy", value_parser = parse_strategy)]
    strategies: Vec<Strategy>,

    /// Output format (text, json)
    #[arg(short = 'f', long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Print step-by-step occupancy frames
    #[arg(long)]
    frames: bool,

    /// Run strategies on separate threads
    #[arg(long)]
    parallel: bool,
}

/// Parse a strategy name from CLI string
fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: memfit::MemfitError| e.to_string())
}

/// Parse an output format from CLI string
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: memfit::MemfitError| e.to_string())
}

/// Ask for a comma-separated list
///
/// The question goes to `output` (stderr in practice) so stdout carries
/// nothing but the report.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    writeln!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Some(
            SimulationConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        ),
        None => None,
    };

    let mut builder = SimulationBuilder::new()
        .strategies(args.strategies.iter().copied())
        .parallel(args.parallel);
    if args.frames {
        builder = builder.with_frames();
    }
    if let Some(format) = args.format {
        builder = builder.format(format);
    }

    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr();

    match (&args.blocks, &config) {
        (Some(blocks), _) => builder = builder.blocks(blocks.clone()),
        (None, Some(_)) => {}
        (None, None) => {
            writeln!(
                stderr,
                "Memory Allocation Simulator (First Fit, Best Fit, Worst Fit)"
            )?;
            builder = builder.blocks(prompt(
                &mut stdin,
                &mut stderr,
                "Enter memory blocks (e.g. '100 KB', '1 MB'), separated by comma:",
            )?);
        }
    }

    match (&args.processes, &config) {
        (Some(processes), _) => builder = builder.processes(processes.clone()),
        (None, Some(_)) => {}
        (None, None) => {
            builder = builder.processes(prompt(
                &mut stdin,
                &mut stderr,
                "Enter process sizes (e.g. '50 KB', '512 KB', '2 MB'), separated by comma:",
            )?);
        }
    }

    if let Some(config) = config {
        builder = builder.config(config);
    }

    let simulation = builder.build().context("invalid simulation input")?;
    info!(
        "Simulating {} processes over {} blocks",
        simulation.processes().len(),
        simulation.blocks().len()
    );

    let report = simulation.run();
    print!("{}", report.render(simulation.format())?);

    Ok(())
}
