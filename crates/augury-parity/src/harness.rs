//! Verification run: sample, compare, time, gate, and produce a receipt.

use std::collections::BTreeMap;
use std::sync::Arc;

use augury_core::config::{ParityConfig, RetrievalConfig, SearcherKind};
use augury_core::errors::AuguryResult;
use augury_core::models::{
    GateThresholds, LatencySummary, NormAudit, ParityReceipt, SubstrateShape,
};
use augury_core::traits::INeighborSearcher;
use augury_core::AuguryConfig;
use augury_index::{Substrate, VectorMatrix};
use augury_observability::parity_span;
use augury_retrieval::build_searcher;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::bench;
use crate::gate::{evaluate_candidate, overall_status};
use crate::overlap::{ensure_same_shape, neighbor_lists, overlap_at_k, pair_name};
use crate::sampling::sample_pool;

/// One parity verification, configured once and runnable over any matrix.
#[derive(Debug, Clone)]
pub struct VerificationRun {
    parity: ParityConfig,
    retrieval: RetrievalConfig,
}

impl VerificationRun {
    pub fn new(parity: ParityConfig, retrieval: RetrievalConfig) -> Self {
        Self { parity, retrieval }
    }

    pub fn from_config(config: &AuguryConfig) -> Self {
        Self::new(config.parity.clone(), config.retrieval.clone())
    }

    pub fn parity_config(&self) -> &ParityConfig {
        &self.parity
    }

    /// Run against a verified substrate, carrying its norm audit into the receipt.
    pub fn run(&self, substrate: &Substrate) -> AuguryResult<ParityReceipt> {
        self.run_on(substrate.matrix(), substrate.receipt().audit.clone())
    }

    /// Run against a bare matrix.
    pub fn run_on(&self, matrix: &Arc<VectorMatrix>, audit: NormAudit) -> AuguryResult<ParityReceipt> {
        let cfg = &self.parity;
        let _span = parity_span!(cfg.k, cfg.samples).entered();

        let truths = self.truth_kinds();
        let mut kinds: Vec<SearcherKind> = truths.iter().chain(&cfg.candidates).copied().collect();
        kinds.sort_unstable();
        kinds.dedup();

        // All construction happens here, before anything is timed.
        let searchers: BTreeMap<SearcherKind, Box<dyn INeighborSearcher>> = kinds
            .iter()
            .map(|&kind| (kind, build_searcher(kind, matrix, &self.retrieval)))
            .collect();

        let pool = sample_pool(matrix.rows(), cfg.samples, cfg.seed);
        if pool.is_empty() {
            warn!("empty sample pool; no metric can be computed");
        }

        let mut lists: BTreeMap<SearcherKind, Vec<Vec<usize>>> = BTreeMap::new();
        for (&kind, searcher) in &searchers {
            if let Some(exact) = searchers.get(&SearcherKind::Exact) {
                ensure_same_shape(exact.as_ref(), searcher.as_ref())?;
            }
            lists.insert(kind, neighbor_lists(searcher.as_ref(), &pool, cfg.k)?);
        }

        let mut overlap = BTreeMap::new();
        for truth in &truths {
            for candidate in &cfg.candidates {
                if let Some(value) = overlap_at_k(&lists[truth], &lists[candidate], cfg.k) {
                    overlap.insert(pair_name(truth.as_str(), candidate.as_str()), value);
                }
            }
        }

        let gates = GateThresholds {
            overlap_threshold: cfg.overlap_threshold,
            p95_threshold_ms: cfg.p95_threshold_ms,
        };
        let mut latency = LatencySummary::default();
        let mut candidates = BTreeMap::new();
        for candidate in &cfg.candidates {
            let name = candidate.as_str();
            let p95 = bench::measure(
                searchers[candidate].as_ref(),
                &pool,
                cfg.k,
                cfg.bench_queries,
                cfg.bench_seed,
            )?
            .and_then(|sample| sample.p95_ms());
            if let Some(ms) = p95 {
                latency.per_candidate.insert(name.to_string(), ms);
                latency.p95_ms = Some(latency.p95_ms.map_or(ms, |worst: f64| worst.max(ms)));
            }

            let against_exact = overlap
                .get(&pair_name(SearcherKind::Exact.as_str(), name))
                .copied();
            let verdict = evaluate_candidate(name, against_exact, p95, &gates);
            info!(
                candidate = name,
                overlap = ?verdict.overlap,
                p95_ms = ?verdict.p95_ms,
                pass = verdict.pass,
                "candidate gated"
            );
            candidates.insert(name.to_string(), verdict);
        }

        let status = overall_status(candidates.values());
        info!(status = ?status, pool = pool.len(), "parity run finished");

        Ok(ParityReceipt {
            run_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            substrate: SubstrateShape {
                n: matrix.rows(),
                d: matrix.dim(),
            },
            k: cfg.k,
            samples: pool.len(),
            seed: cfg.seed,
            audit,
            overlap,
            latency,
            gates,
            candidates,
            status,
        })
    }

    /// Configured truths, with `exact` always first.
    fn truth_kinds(&self) -> Vec<SearcherKind> {
        let mut truths = vec![SearcherKind::Exact];
        for kind in &self.parity.truths {
            if !truths.contains(kind) {
                truths.push(*kind);
            }
        }
        truths
    }
}
