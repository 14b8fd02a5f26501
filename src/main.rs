//! Command-line entry point
//!
//! ```text
//! constructicon <CORPUS_DIR> <OUT_DIR> [MIN_FREQ] [SEPARATOR]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use constructicon::config::{self, RunConfig, Separator};
use constructicon::corpus::Corpus;
use constructicon::report::{timestamp, write_reports};
use constructicon::score::{DEFAULT_MIN_FREQ, score};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn parse_min_freq(s: &str) -> Result<usize, String> {
    config::parse_min_freq(s).map_err(|e| e.to_string())
}

fn parse_separator(s: &str) -> Result<Separator, String> {
    s.parse().map_err(|e: config::ConfigError| e.to_string())
}

/// Count sentence-level constructions in a parsed historical corpus and score
/// them by relative frequency and total correlation
#[derive(Parser, Debug)]
#[command(name = "constructicon", version)]
struct Cli {
    /// Directory containing the .psd (or .psd.gz) parsed corpus files
    corpus_dir: PathBuf,

    /// Directory the two reports are written to
    out_dir: PathBuf,

    /// Minimum number of occurrences for a construction to be reported
    #[arg(default_value_t = DEFAULT_MIN_FREQ, value_parser = parse_min_freq)]
    min_freq: usize,

    /// Output field separator: a tab (`\t` or `tab`) or `;`
    #[arg(default_value = "\t", value_parser = parse_separator)]
    separator: Separator,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("constructicon={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = RunConfig::new(cli.corpus_dir, cli.out_dir)
        .with_min_freq(cli.min_freq)
        .with_separator(cli.separator);
    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    config.validate().context("invalid configuration")?;

    // resolve the corpus before anything is written
    let corpus = Corpus::from_dir(&config.corpus_dir)?;
    info!(files = corpus.files().len(), "reading corpus");

    let aggregate = corpus.aggregate()?;
    info!(
        patterns = aggregate.num_patterns(),
        elements = aggregate.element_total(),
        "done with files"
    );

    let scores = score(&aggregate, config.min_freq);
    let paths = write_reports(
        &config.out_dir,
        &timestamp(),
        config.separator,
        &aggregate,
        &scores,
    )?;

    info!(
        aggregated = %paths.aggregated.display(),
        full = %paths.full.display(),
        "reports written"
    );
    info!(
        "found {} types and {} tokens",
        scores.types(),
        scores.tokens()
    );
    Ok(())
}
