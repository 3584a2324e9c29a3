use std::path::PathBuf;

use anyhow::Context;
use augury_core::AuguryConfig;
use augury_index::Substrate;
use augury_parity::{write_receipt, VerificationRun};
use clap::Args;
use tracing::info;

use super::print_json;
use crate::outcome::Outcome;

#[derive(Args)]
pub struct ParityArgs {
    /// Neighbors compared per query.
    #[arg(long)]
    pub k: Option<usize>,
    /// Size of the sampled query pool.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Seed for the query pool.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Receipt path. Must not already exist.
    #[arg(long)]
    pub receipt: Option<PathBuf>,
}

pub fn run(mut config: AuguryConfig, args: ParityArgs) -> anyhow::Result<Outcome> {
    if let Some(k) = args.k {
        anyhow::ensure!(k > 0, "--k must be at least 1");
        config.parity.k = k;
    }
    if let Some(samples) = args.samples {
        config.parity.samples = samples;
    }
    if let Some(seed) = args.seed {
        config.parity.seed = seed;
    }
    let receipt_path = args
        .receipt
        .unwrap_or_else(|| config.paths.parity_receipt_path());

    let substrate = Substrate::open(&config)?;
    let receipt = VerificationRun::from_config(&config).run(&substrate)?;
    write_receipt(&receipt_path, &receipt)
        .with_context(|| format!("writing parity receipt {}", receipt_path.display()))?;
    info!(receipt = %receipt_path.display(), status = ?receipt.status, "parity receipt written");

    print_json(&receipt);
    Ok(if receipt.passed() {
        Outcome::Success
    } else {
        Outcome::Failed
    })
}
