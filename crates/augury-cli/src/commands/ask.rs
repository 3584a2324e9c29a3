use augury_core::AuguryConfig;
use augury_service::ServiceHandles;
use clap::Args;
use serde_json::json;
use tracing::warn;

use super::print_json;
use crate::outcome::Outcome;

#[derive(Args)]
pub struct AskArgs {
    /// Free-text query.
    pub query: String,
    /// Number of results. Defaults to `service.default_k`.
    #[arg(long)]
    pub k: Option<usize>,
    /// Include cache counters in the output.
    #[arg(long)]
    pub stats: bool,
}

pub fn run(config: AuguryConfig, args: AskArgs) -> anyhow::Result<Outcome> {
    let k = args.k.unwrap_or(config.service.default_k);
    let handles = ServiceHandles::open(config)?;
    let (results, stats) = handles.service().ask_with_stats(&args.query, k)?;

    let degradation = handles.drain_degradation_events();
    for event in &degradation {
        warn!(failure = %event.failure, fallback = %event.fallback_used, "query embedded by fallback provider");
    }

    let mut output = json!({
        "query": args.query,
        "k": k,
        "provider": handles.embedder().provider_name(),
        "stand_in": handles.embedder().is_stand_in(),
        "results": results,
    });
    if args.stats {
        output["stats"] = json!(stats);
    }
    if !degradation.is_empty() {
        output["degradation"] = json!(degradation);
    }
    print_json(&output);
    Ok(Outcome::Success)
}
