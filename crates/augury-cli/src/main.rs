//! `augury`: batch tools for one substrate.
//!
//! Every command prints a JSON document on stdout; logs go to stderr.
//!
//! Exit codes: 0 success (DONE / PASS), 2 ABSTAIN, 1 gate FAIL or any other
//! error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use augury_core::AuguryConfig;
use clap::{Parser, Subcommand};

mod commands;
mod outcome;

use outcome::Outcome;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG: &str = "augury.toml";

#[derive(Parser)]
#[command(name = "augury")]
#[command(version)]
#[command(about = "Deterministic vector retrieval with parity verification")]
struct Cli {
    /// Config file. Defaults to ./augury.toml if present, else built-in defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize the corpus embeddings and publish a new substrate.
    BuildIndex,
    /// Check the published substrate and print the integrity receipt.
    VerifySubstrate,
    /// Compare candidate searchers against exact truth and write a receipt.
    VerifyParity(commands::parity::ParityArgs),
    /// Answer a free-text query.
    Ask(commands::ask::AskArgs),
    /// Self-query row 0 and report the top-5 ids with elapsed time.
    Smoke,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AuguryConfig> {
    match path {
        Some(path) => AuguryConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None if std::path::Path::new(DEFAULT_CONFIG).exists() => {
            AuguryConfig::load(DEFAULT_CONFIG).context("loading ./augury.toml")
        }
        None => Ok(AuguryConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return Outcome::Failed.into();
        }
    };
    augury_observability::init_tracing(&config.observability);

    let result = match cli.command {
        Command::BuildIndex => commands::build::run(config),
        Command::VerifySubstrate => commands::verify::run(config),
        Command::VerifyParity(args) => commands::parity::run(config, args),
        Command::Ask(args) => commands::ask::run(config, args),
        Command::Smoke => commands::smoke::run(config),
    };

    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            let outcome = Outcome::from_error(&e);
            tracing::error!("command failed: {e:#}");
            if outcome == Outcome::Abstain {
                commands::print_json(&serde_json::json!({
                    "status": "ABSTAIN",
                    "reason": format!("{e:#}"),
                }));
            } else {
                eprintln!("error: {e:#}");
            }
            outcome.into()
        }
    }
}
