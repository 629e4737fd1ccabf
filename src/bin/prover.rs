use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use merkle_allowlist::{address::parse_accounts, Address, ClaimRequest, Config, MerkleTree};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(author, version, about = "Build an allow-list tree and emit a claim request", long_about = None)]
struct Args {
    #[arg(short, long)]
    accounts_file: PathBuf,

    /// Address to generate the claim request for
    #[arg(long)]
    address: String,

    #[arg(short, long, default_value = "claim.json")]
    output: PathBuf,

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

    let claimant: Address = args
        .address
        .parse()
        .with_context(|| format!("Invalid claimant address '{}'", args.address))?;

    info!("Loading accounts from: {}", args.accounts_file.display());
    let metadata =
        fs::metadata(&args.accounts_file).context("Failed to read accounts file metadata")?;

    let max_file_size = config.allowlist.max_accounts_file_size;
    if metadata.len() > max_file_size {
        return Err(anyhow::anyhow!(
            "Accounts file too large: {} bytes (max {} bytes)",
            metadata.len(),
            max_file_size
        ));
    }

    let accounts_content =
        fs::read_to_string(&args.accounts_file).context("Failed to read accounts file")?;
    let addresses = parse_accounts(&accounts_content)?;

    if addresses.is_empty() {
        return Err(anyhow::anyhow!(
            "No valid addresses found in accounts file '{}'",
            args.accounts_file.display()
        ));
    }
    info!(
        "Loaded {} addresses from {}",
        addresses.len(),
        args.accounts_file.display()
    );

    let leaf_index = addresses
        .iter()
        .position(|a| *a == claimant)
        .with_context(|| {
            format!(
                "Address '{}' not found in accounts file '{}'",
                claimant,
                args.accounts_file.display()
            )
        })?;
    debug!("Found claimant at index {leaf_index}");

    info!("Building Merkle tree...");
    let tree = MerkleTree::from_addresses(&addresses).with_context(|| {
        format!(
            "Failed to build allow-list tree from '{}' (duplicate addresses are not allowed)",
            args.accounts_file.display()
        )
    })?;
    info!("Merkle root: {}", tree.root);

    let proof = tree
        .generate_proof(leaf_index)
        .context("Failed to generate Merkle proof")?;
    debug!("{proof}");

    let request = ClaimRequest {
        address: claimant.to_string(),
        leaf: proof.leaf.to_hex(),
        merkle_root: proof.root.to_hex(),
        proof: proof.siblings.iter().map(|s| s.to_hex()).collect(),
        leaf_index,
        timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the Unix epoch")?
            .as_secs(),
    };

    let json_output =
        serde_json::to_string_pretty(&request).context("Failed to serialize claim request")?;
    fs::write(&args.output, json_output).context("Failed to write claim request file")?;

    info!("Claim request written to: {}", args.output.display());
    println!("Merkle Root: 0x{}", request.merkle_root);
    println!("Proof depth: {}", request.proof.len());

    Ok(())
}
