//! spinseq-verify - Round-trip verification tool for the sequence codec
//!
//! Drives the codec and compression layer in both directions and prints
//! structured JSON diff reports. Two modes:
//!
//! - `verify` — round-trip a single share payload (raw or `z:`-tagged)
//! - `batch`  — generate a seeded random corpus and aggregate a pass rate

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use spinseq_codec::decompress_sequence;
use spinseq_verify::generator::random_sequence;
use spinseq_verify::{verify_batch, verify_sequence};

#[derive(Parser)]
#[command(name = "spinseq-verify", about = "Round-trip verifier for encoded motion sequences")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a share payload and verify it round-trips cleanly
    Verify {
        /// Raw or z:-tagged sequence payload, as found in a share link
        #[arg(long)]
        payload: String,
    },
    /// Verify a seeded random corpus and report the aggregate pass rate
    Batch {
        /// Number of sequences to generate
        #[arg(long, default_value_t = 100)]
        count: usize,
        /// RNG seed; same seed reproduces the same corpus
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Upper bound on beats per generated sequence
        #[arg(long, default_value_t = 16)]
        max_beats: usize,
        /// Include per-sequence reports for failures in the output
        #[arg(long)]
        failures: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting spinseq-verify v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();
    match cli.command {
        Command::Verify { payload } => run_verify(&payload),
        Command::Batch {
            count,
            seed,
            max_beats,
            failures,
        } => run_batch(count, seed, max_beats, failures).await,
    }
}

fn run_verify(payload: &str) -> Result<()> {
    let sequence = decompress_sequence(payload)?;
    info!(beats = sequence.len(), "payload decoded");

    let report = verify_sequence(&sequence);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.passed {
        anyhow::bail!("round-trip verification failed");
    }
    Ok(())
}

async fn run_batch(count: usize, seed: u64, max_beats: usize, failures: bool) -> Result<()> {
    info!(count, seed, max_beats, "generating verification corpus");
    let mut rng = StdRng::seed_from_u64(seed);
    let sequences: Vec<_> = (0..count).map(|_| random_sequence(&mut rng, max_beats)).collect();

    let batch = verify_batch(&sequences).await;

    let summary = serde_json::json!({
        "sequences_verified": batch.sequences_verified,
        "sequences_passed": batch.sequences_passed,
        "pass_rate": batch.pass_rate,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if failures {
        for (index, report) in batch.failures() {
            println!("--- failure at corpus index {} (seed {}) ---", index, seed);
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    if batch.sequences_passed != batch.sequences_verified {
        warn!(
            failed = batch.sequences_verified - batch.sequences_passed,
            "batch contains round-trip failures"
        );
        anyhow::bail!("batch verification failed");
    }

    info!("batch verification passed");
    Ok(())
}
