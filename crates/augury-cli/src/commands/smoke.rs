use std::time::Instant;

use augury_core::errors::SubstrateError;
use augury_core::{AuguryConfig, AuguryError};
use augury_index::Substrate;
use augury_retrieval::{ExactEngine, SearchMode};
use serde_json::json;

use super::print_json;
use crate::outcome::Outcome;

const SMOKE_K: usize = 5;

/// Query with row 0's own vector in production mode. A healthy substrate
/// returns row 0's chunk first.
pub fn run(config: AuguryConfig) -> anyhow::Result<Outcome> {
    let substrate = Substrate::open(&config)?;
    if substrate.rows() == 0 {
        return Err(AuguryError::from(SubstrateError::EmptyCorpus {
            path: config.paths.corpus.clone(),
        })
        .into());
    }
    let engine = ExactEngine::from_config(substrate.matrix().clone(), &config.retrieval);
    let query = substrate.matrix().row(0).to_vec();

    let started = Instant::now();
    let neighbors = engine.search(SearchMode::Production { query: &query }, SMOKE_K)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let ids: Vec<&str> = neighbors
        .iter()
        .filter_map(|n| substrate.chunk_id(n.row))
        .collect();
    let self_first = ids.first().copied() == substrate.chunk_id(0);

    print_json(&json!({
        "rows": substrate.rows(),
        "dim": substrate.dim(),
        "top_ids": ids,
        "self_first": self_first,
        "elapsed_ms": elapsed_ms,
    }));
    Ok(if self_first {
        Outcome::Success
    } else {
        Outcome::Failed
    })
}
