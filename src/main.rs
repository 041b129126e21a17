//! dedup: MinHash + LSH near-duplicate detection over parquet corpora.
//!
//! Thin CLI over the `text_dedup` library. The final stdout line is always
//! `{"before": N, "after": M}` so callers can parse results without
//! scraping logs.

use clap::Parser;
use std::path::PathBuf;
use text_dedup::cli::{self, exit_code_for};
use text_dedup::config::{DedupConfig, HashBits};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dedup")]
#[command(version)]
#[command(about = "MinHash + LSH near-duplicate detection", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  Invalid configuration
    3  Malformed input
    4  Cancelled
    5  IO failure
    6  Internal error

EXAMPLES:
    # Deduplicate a parquet corpus with explicit banding
    dedup --b 16 --r 4 --num-perm 64 --parquet-path data.parquet \\
          --main-col text --idx-col id --uf-output out/uf.json

    # Derive bands and rows from a similarity threshold
    dedup --num-perm 256 --threshold 0.7 --parquet-path data.parquet")]
struct Cli {
    /// Number of bands (derived from the threshold when omitted)
    #[arg(long)]
    b: Option<usize>,

    /// Rows per band (derived from the threshold when omitted)
    #[arg(long)]
    r: Option<usize>,

    /// Number of permutations; must equal b * r when both are given
    #[arg(long = "num-perm", default_value_t = 200)]
    num_perm: usize,

    /// N-gram size in tokens
    #[arg(long = "n-grams", default_value_t = 2)]
    n_grams: usize,

    /// Jaccard threshold used to derive bands and rows
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Drop documents with fewer tokens than this
    #[arg(long = "min-length", default_value_t = 0)]
    min_length: usize,

    /// Signature element width (16, 32, or 64)
    #[arg(long = "hash-bits", default_value_t = 64)]
    hash_bits: u32,

    /// Documents per embed batch
    #[arg(long = "batch-size", default_value_t = 10_000)]
    batch_size: usize,

    /// Worker threads (defaults to the host CPU count)
    #[arg(long = "num-threads")]
    num_threads: Option<usize>,

    /// Input parquet file
    #[arg(long = "parquet-path")]
    parquet_path: PathBuf,

    /// Text column to deduplicate on
    #[arg(long = "main-col", default_value = "text")]
    main_col: String,

    /// Id column
    #[arg(long = "idx-col", default_value = "id")]
    idx_col: String,

    /// Where to write the union-find JSON
    #[arg(long = "uf-output")]
    uf_output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let Some(hash_bits) = HashBits::from_bits(cli.hash_bits) else {
        eprintln!(
            "error: invalid configuration: hash_bits must be 16, 32, or 64 (got {})",
            cli.hash_bits
        );
        std::process::exit(cli::exit_codes::CONFIG);
    };

    let config = DedupConfig {
        num_perm: cli.num_perm,
        b: cli.b,
        r: cli.r,
        ngram: cli.n_grams,
        threshold: cli.threshold,
        min_length: cli.min_length,
        hash_bits,
        batch_size: cli.batch_size,
        num_threads: cli.num_threads.unwrap_or_else(num_cpus::get),
        uf_output: cli.uf_output,
        ..DedupConfig::default()
    };

    match cli::run_dedup(&config, &cli.parquet_path, &cli.main_col, &cli.idx_col) {
        Ok(summary) => {
            let line = serde_json::to_string(&serde_json::json!({
                "before": summary.before,
                "after": summary.after,
            }))?;
            println!("{line}");
            Ok(())
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(exit_code_for(&err));
        }
    }
}
