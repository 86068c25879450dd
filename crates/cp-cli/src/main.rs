//! cartpack — shrink a PICO-8 cart's Lua source.
//!
//! - `minify`: strip comments and whitespace, apply declared renames
//! - `analyze`: search for the index table that saves the most bytes
//! - `pack`: zlib-compress and re-encode with the literal alphabet

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cp_core::TableConfig;
use cp_minify::{Minifier, MinifyOptions, CART_HEADER_LINES};
use cp_table::{byte_histogram, mask_literals, SearchOptions, Searcher, Strategy};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Node budget for `analyze` unless `--unbounded` is given.
const DEFAULT_MAX_NODES: u64 = 10_000_000;

#[derive(Parser)]
#[command(name = "cartpack")]
#[command(version)]
#[command(about = "Minify, table-optimize and pack PICO-8 cart code")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip comments and whitespace from a .p8 cart
    Minify {
        #[command(flatten)]
        input: InputArgs,

        /// Header lines before the Lua code
        #[arg(long, default_value_t = CART_HEADER_LINES)]
        skip_header: usize,
    },

    /// Search for the index table with the best byte savings
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Follow only the best streak at each step instead of searching exhaustively
        #[arg(long)]
        greedy: bool,

        /// Stop after this many search nodes and report the best found
        #[arg(long, default_value_t = DEFAULT_MAX_NODES, conflicts_with = "unbounded")]
        max_nodes: u64,

        /// Explore the whole search tree, however long it takes
        #[arg(long)]
        unbounded: bool,

        /// Search the raw text without masking string literal contents
        #[arg(long)]
        no_mask: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compress and encode a cart with the literal alphabet
    Pack {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Write the raw zlib stream instead of the encoded token
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file (stdin when omitted)
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<Vec<u8>> {
        match &self.file {
            Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
            None => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf).context("reading stdin")?;
                Ok(buf)
            }
        }
    }
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON file with "alphabet", "prefix" and "suffix" (PICO-8 defaults otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<TableConfig> {
        match &self.config {
            Some(path) => TableConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(TableConfig::pico8()),
        }
    }
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    score: i64,
    output: &'a str,
    nodes: u64,
    leaves: u64,
    budget_exhausted: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Minify { input, skip_header } => {
            let raw = input.read()?;
            let text = String::from_utf8(raw).context("cart is not valid UTF-8")?;
            let result = Minifier::new(MinifyOptions { skip_header_lines: skip_header }).minify(&text);
            info!(
                original = result.original_len,
                minified = result.minified_len,
                reduction = %format!("{:.1}%", result.reduction_pct()),
                "minify done"
            );
            stdout.write_all(result.output.as_bytes())?;
        }

        Commands::Analyze { input, config, greedy, max_nodes, unbounded, no_mask, json } => {
            let config = config.load()?;
            let raw = input.read()?;
            let text = if no_mask { raw } else { mask_literals(&raw, &config.excluded_bytes()) };

            let mut counts: Vec<(u8, usize)> = byte_histogram(&text).into_iter().collect();
            counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            for (byte, count) in counts.iter().take(10) {
                debug!(byte = %byte.escape_ascii(), count, "byte frequency");
            }

            let options = SearchOptions {
                strategy: if greedy { Strategy::Greedy } else { Strategy::Exhaustive },
                max_nodes: (!unbounded).then_some(max_nodes),
            };
            if unbounded {
                info!("search has no node limit");
            }
            let outcome = Searcher::new(config)?.with_options(options).run(&text);

            if json {
                let output = outcome.text();
                let report = AnalyzeReport {
                    score: outcome.score,
                    output: &output,
                    nodes: outcome.nodes,
                    leaves: outcome.leaves,
                    budget_exhausted: outcome.budget_exhausted,
                };
                serde_json::to_writer(&mut stdout, &report)?;
                writeln!(stdout)?;
            } else {
                writeln!(stdout, "final string (score {}): \"{}\"", outcome.score, outcome.text())?;
            }
        }

        Commands::Pack { input, config, raw } => {
            let config = config.load()?;
            let data = input.read()?;
            if raw {
                stdout.write_all(&cp_pack::deflate(&data)?)?;
            } else {
                let packed = cp_pack::pack(&data, &config.alphabet)?;
                info!(
                    original = packed.original_len,
                    compressed = packed.compressed_len,
                    token = packed.token.len(),
                    "pack done"
                );
                stdout.write_all(&packed.token)?;
                writeln!(stdout)?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}
