//! Advisor CLI
//!
//! Trains an ID3 decision tree on a categorical training set and prints
//! advice for every record of a test set.

use advisor_cli::{advise_csv, format_prediction, train_from_csv, AdvisorConfig, Summary};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(author = "Advisor Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Categorical ID3 advisor for intake data", long_about = None)]
struct Args {
    /// Training CSV (header row, one column per attribute)
    #[arg(long)]
    train: PathBuf,

    /// Test CSV to advise, same column names as the training set
    #[arg(long)]
    test: PathBuf,

    /// TOML configuration (output column, key column, predictors)
    #[arg(short, long, default_value = "config/advisor.toml")]
    config: PathBuf,

    /// Log the BLAKE3 fingerprint of the learned tree
    #[arg(long)]
    fingerprint: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Advisor v{}", env!("CARGO_PKG_VERSION"));

    let config = AdvisorConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    info!("Configuration:");
    info!("  Output: {}", config.output);
    for predictor in &config.predictors {
        match predictor.arity {
            Some(arity) => info!("  Predictor {} (arity {})", predictor.name, arity),
            None => info!("  Predictor {} (arity from data)", predictor.name),
        }
    }

    info!("Training on: {}", args.train.display());
    let advisor = train_from_csv(&args.train, &config).context("Failed to train advisor")?;

    let tree = advisor.tree();
    info!(
        "Tree learned: {} nodes, {} leaves, depth {}",
        tree.node_count(),
        tree.leaf_count(),
        tree.depth()
    );
    if args.fingerprint {
        let fingerprint = tree.fingerprint().context("Failed to fingerprint tree")?;
        info!("  Fingerprint: {}", fingerprint);
    }

    info!("Advising: {}", args.test.display());
    let predictions =
        advise_csv(&advisor, &args.test, &config).context("Failed to advise test set")?;

    for prediction in &predictions {
        println!("{}", format_prediction(&config.subject, prediction));
    }

    let summary = Summary::of(&predictions);
    info!(
        "Done: {} advised, {} skipped",
        summary.advised, summary.skipped
    );

    Ok(())
}
