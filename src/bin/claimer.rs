use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use merkle_allowlist::{AllowlistClaim, ClaimRequest, ClaimStore, Config, Digest};
use std::fs;
use std::path::PathBuf;

/// Can be overridden via `ALLOWLIST_MAX_REQUEST_FILE_SIZE`.
fn get_max_request_file_size(config: &Config) -> u64 {
    std::env::var("ALLOWLIST_MAX_REQUEST_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.claims.max_request_file_size)
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Submit a claim request against an allow-list root", long_about = None)]
struct Args {
    #[arg(short, long)]
    request_file: PathBuf,

    /// Committed allow-list root; falls back to `allowlist.root` in the config
    #[arg(long)]
    root: Option<String>,

    /// Claim store file; falls back to `claims.store_file` in the config
    #[arg(short, long)]
    store: Option<PathBuf>,

    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args
        .config
        .as_ref()
        .map(Config::load_from_file)
        .transpose()?
        .unwrap_or_default();

    let root: Digest = match &args.root {
        Some(root) => root
            .parse()
            .with_context(|| format!("Invalid --root value '{root}'"))?,
        None => config
            .allowlist
            .root_digest()?
            .context("No allow-list root given: pass --root or set allowlist.root in the config")?,
    };
    debug!("Allow-list root: {root}");

    info!("Loading claim request from: {}", args.request_file.display());
    let metadata =
        fs::metadata(&args.request_file).context("Failed to read claim request metadata")?;
    let max_size = get_max_request_file_size(&config);
    if metadata.len() > max_size {
        return Err(anyhow::anyhow!(
            "Claim request too large: {} bytes (max {} bytes)",
            metadata.len(),
            max_size
        ));
    }

    let content =
        fs::read_to_string(&args.request_file).context("Failed to read claim request")?;
    let request: ClaimRequest =
        serde_json::from_str(&content).context("Failed to parse claim request JSON")?;
    request
        .validate(&config.security)
        .context("Claim request validation failed")?;

    let proof = request.proof_path()?;
    if proof.len() > config.claims.max_proof_depth {
        return Err(anyhow::anyhow!(
            "Proof depth {} exceeds the configured maximum of {}",
            proof.len(),
            config.claims.max_proof_depth
        ));
    }
    let claimant = request.claimant()?;

    let request_root = request.root()?;
    if request_root != root {
        warn!("Claim request was built for root {request_root} but the ledger root is {root}");
    }

    let store_path = args.store.unwrap_or(config.claims.store_file);
    let store = ClaimStore::open(&store_path)?;
    let _lock = store.lock()?;
    let ledger = AllowlistClaim::with_claimed(root, store.load()?);
    info!(
        "Restored {} prior claims from {}",
        ledger.claimed_count(),
        store.path().display()
    );

    match ledger.claim(&claimant, &proof) {
        Ok(()) => {
            store.append(&claimant).with_context(|| {
                format!("Failed to record claim to: {}", store.path().display())
            })?;
            println!("Claim accepted for {claimant}");
            Ok(())
        }
        Err(e) => {
            error!("Claim rejected: {e}");
            println!("Claim rejected: {e}");
            Err(e.into())
        }
    }
}
