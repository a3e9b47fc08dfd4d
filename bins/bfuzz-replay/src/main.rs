//! bfuzz-replay: Replay fuzz inputs through the block-header harness.
//!
//! `replay` runs corpus or crash files through a harness configured from the
//! command line and reports each outcome. `seed` writes a well-formed test
//! case to start a corpus from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bfuzz_core::codec;
use bfuzz_core::constants::SpecProfile;
use bfuzz_core::genesis;
use bfuzz_core::types::BeaconState;
use bfuzz_harness::{
    BlockHeaderTestCase, DecodePolicy, Harness, HarnessConfig, Outcome, SignatureBackend,
};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};

/// Block-header fuzz harness replay tool.
#[derive(Parser, Debug)]
#[command(
    name = "bfuzz-replay",
    version,
    about = "Replay fuzz inputs through the block-header harness"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run input files through the harness and print each outcome.
    Replay(ReplayArgs),
    /// Write a well-formed encoded test case.
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Input files to replay.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Rule profile (mainnet or minimal).
    #[arg(long, default_value = "mainnet")]
    profile: SpecProfile,

    /// Verify proposer signatures with Ed25519.
    #[arg(long)]
    verify_signatures: bool,

    /// Handling of malformed inputs (skip or abort).
    #[arg(long, default_value = "skip")]
    decode_policy: DecodePolicy,

    /// Print accepted post-states as JSON instead of a digest.
    #[arg(long)]
    json: bool,
}

impl ReplayArgs {
    fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            profile: self.profile,
            signatures: if self.verify_signatures {
                SignatureBackend::Ed25519
            } else {
                SignatureBackend::Disabled
            },
            decode_policy: self.decode_policy,
            ..HarnessConfig::default()
        }
    }
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Validators in the pre-state registry.
    #[arg(long, default_value_t = 16)]
    validators: u64,

    /// Slot of the pre-state; the block is proposed at the next slot.
    #[arg(long, default_value_t = 0)]
    slot: u64,

    /// Rule profile the block is signed under.
    #[arg(long, default_value = "mainnet")]
    profile: SpecProfile,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Replay(args) => replay(&args),
        Commands::Seed(args) => seed(&args),
    }
}

/// Replay every file, then fail if any of them hit a fatal harness error.
fn replay(args: &ReplayArgs) -> Result<()> {
    let config = args.harness_config();
    info!(?config, files = args.files.len(), "replaying");
    let harness = Harness::new(config);

    let mut failures = 0usize;
    for path in &args.files {
        let input = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        match harness.run(&input) {
            Ok(outcome) => println!("{}: {}", path.display(), describe(&outcome, args.json)?),
            Err(e) => {
                error!(file = %path.display(), "fatal: {e}");
                println!("{}: error: {e}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} inputs failed", args.files.len());
    }
    Ok(())
}

/// One-line report of an outcome.
fn describe(outcome: &Outcome, json: bool) -> Result<String> {
    match outcome {
        Outcome::Accepted(bytes) if json => {
            let post: BeaconState =
                codec::decode(bytes).context("re-decoding accepted post-state")?;
            serde_json::to_string(&post).context("serializing post-state")
        }
        Outcome::Accepted(bytes) => Ok(format!(
            "accepted {} bytes blake3={}",
            bytes.len(),
            hex::encode(blake3::hash(bytes).as_bytes())
        )),
        other => Ok(other.to_string()),
    }
}

/// Build the seed case: a genesis registry at `slot` and its signed child.
fn seed_case(args: &SeedArgs) -> Result<BlockHeaderTestCase> {
    let spec = args.profile.chain_spec();
    let mut pre = genesis::genesis_state(&spec, args.validators);
    pre.slot = args.slot;
    let next = args
        .slot
        .checked_add(1)
        .context("slot leaves no room for a child block")?;
    let block = genesis::signed_next_block(&pre, next, &spec)
        .context("signing seed block")?;
    Ok(BlockHeaderTestCase::new(pre, block))
}

fn seed(args: &SeedArgs) -> Result<()> {
    let bytes = seed_case(args)?
        .encode()
        .context("encoding seed")?;
    write_file(&args.out, &bytes)?;
    println!("wrote {} bytes to {}", bytes.len(), args.out.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    debug!(path = %path.display(), len = bytes.len(), "writing seed");
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// Initialize the tracing subscriber with the given level and format.
///
/// `RUST_LOG`, when set, takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    // Reports go to stdout; keep logs on stderr.
    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}
