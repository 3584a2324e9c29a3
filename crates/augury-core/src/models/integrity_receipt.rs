use serde::{Deserialize, Serialize};

/// Outcome of a fail-closed check. There is no partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntegrityStatus {
    Done,
    Abstain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCounts {
    pub jsonl_lines: usize,
    pub id_map_len: usize,
    pub index_total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashMatch {
    pub corpus: bool,
    pub index: bool,
}

/// Row-norm audit of a vector matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormAudit {
    /// Any NaN or infinite component.
    pub nan_inf: bool,
    /// Largest |‖row‖ - 1| over non-zero rows.
    pub max_norm_dev: f64,
    /// Rows that normalized to the zero vector.
    pub zero_rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub corpus: String,
    pub index: String,
    pub id_map: String,
    pub manifest: String,
}

/// Integrity verification receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReceipt {
    pub status: IntegrityStatus,
    pub counts: ArtifactCounts,
    pub dim: usize,
    pub sha256_match: HashMatch,
    pub audit: NormAudit,
    pub paths: ArtifactPaths,
    pub violations: Vec<String>,
}

impl IntegrityReceipt {
    pub fn is_done(&self) -> bool {
        self.status == IntegrityStatus::Done
    }
}
