use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NormAudit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    Pass,
    Fail,
}

/// Thresholds a candidate must meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    pub overlap_threshold: f64,
    pub p95_threshold_ms: f64,
}

/// Gate outcome for one candidate strategy.
///
/// A `None` metric was never measured and always fails the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateVerdict {
    pub overlap: Option<f64>,
    pub p95_ms: Option<f64>,
    pub pass: bool,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstrateShape {
    #[serde(rename = "N")]
    pub n: usize,
    #[serde(rename = "D")]
    pub d: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Worst p95 among gated candidates.
    pub p95_ms: Option<f64>,
    pub per_candidate: BTreeMap<String, f64>,
}

/// Immutable record of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParityReceipt {
    pub run_id: String,
    pub created_at: DateTime<Utc>,
    pub substrate: SubstrateShape,
    pub k: usize,
    pub samples: usize,
    pub seed: u64,
    pub audit: NormAudit,
    /// overlap@K keyed by `<truth>_truth_vs_<candidate>`.
    pub overlap: BTreeMap<String, f64>,
    pub latency: LatencySummary,
    pub gates: GateThresholds,
    pub candidates: BTreeMap<String, CandidateVerdict>,
    pub status: GateStatus,
}

impl ParityReceipt {
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }
}
