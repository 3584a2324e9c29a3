//! Integrity Verifier: fail-closed consistency check over a published substrate.
//!
//! Every check runs and every violation is listed; any violation makes the
//! receipt ABSTAIN. The verifier only reads.

use std::path::Path;

use augury_core::config::defaults::{ID_MAP_FILENAME, INDEX_FILENAME, MANIFEST_FILENAME};
use augury_core::constants::NORM_TOLERANCE;
use augury_core::errors::{AuguryError, AuguryResult, SubstrateError};
use augury_core::models::{
    ArtifactCounts, ArtifactPaths, HashMatch, IntegrityReceipt, IntegrityStatus, NormAudit,
};
use augury_core::{AuguryConfig, CorpusRecord, Manifest};
use augury_observability::integrity_span;
use tracing::{info, warn};

use crate::corpus::{count_records, parse_corpus};
use crate::hashing::sha256_bytes;
use crate::id_map::IdMap;
use crate::matrix::VectorMatrix;

/// Artifacts that passed verification, handed to the loader without a
/// second read.
pub(crate) struct VerifiedArtifacts {
    pub matrix: VectorMatrix,
    pub id_map: IdMap,
    pub records: Vec<CorpusRecord>,
    pub manifest: Manifest,
}

pub(crate) struct Inspection {
    pub receipt: IntegrityReceipt,
    pub artifacts: Option<VerifiedArtifacts>,
}

pub struct IntegrityVerifier {
    config: AuguryConfig,
}

impl IntegrityVerifier {
    pub fn new(config: AuguryConfig) -> Self {
        Self { config }
    }

    /// Run every check and return the receipt. Never fails: I/O problems
    /// become violations.
    pub fn verify(&self) -> IntegrityReceipt {
        self.inspect().receipt
    }

    /// Like [`verify`](Self::verify), but an ABSTAIN receipt becomes an
    /// `IntegrityAbstain` error.
    pub fn verify_or_abstain(&self) -> AuguryResult<IntegrityReceipt> {
        let receipt = self.verify();
        if receipt.is_done() {
            Ok(receipt)
        } else {
            Err(SubstrateError::IntegrityAbstain {
                violations: receipt.violations,
            }
            .into())
        }
    }

    pub(crate) fn inspect(&self) -> Inspection {
        let paths = &self.config.paths;
        let corpus_path = paths.corpus_path();
        let index_path = paths.index_path();
        let id_map_path = paths.id_map_path();
        let manifest_path = paths.manifest_path();
        let expected_dim = self.config.embedding.dim;
        let _span = integrity_span!(paths.substrate_path().display()).entered();

        let mut receipt = IntegrityReceipt {
            status: IntegrityStatus::Abstain,
            counts: ArtifactCounts::default(),
            dim: expected_dim,
            sha256_match: HashMatch::default(),
            audit: NormAudit::default(),
            paths: ArtifactPaths {
                corpus: corpus_path.display().to_string(),
                index: index_path.display().to_string(),
                id_map: id_map_path.display().to_string(),
                manifest: manifest_path.display().to_string(),
            },
            violations: Vec::new(),
        };

        let required = [
            ("corpus", corpus_path.as_path()),
            (INDEX_FILENAME, index_path.as_path()),
            (ID_MAP_FILENAME, id_map_path.as_path()),
            (MANIFEST_FILENAME, manifest_path.as_path()),
        ];
        for (name, path) in required {
            if !path.is_file() {
                receipt
                    .violations
                    .push(format!("Missing {name}: {}", path.display()));
            }
        }
        if !receipt.violations.is_empty() {
            return finish(receipt, None);
        }

        let violations = &mut receipt.violations;

        // Corpus
        let corpus_bytes = read_or_record(&corpus_path, "corpus", violations);
        let records = corpus_bytes.as_deref().and_then(|bytes| {
            receipt.counts.jsonl_lines = count_records(bytes);
            parse_corpus(bytes, &corpus_path)
                .map_err(|e| violations.push(format!("Invalid corpus: {e}")))
                .ok()
        });

        // Manifest
        let manifest = read_or_record(&manifest_path, MANIFEST_FILENAME, violations).and_then(
            |bytes| {
                serde_json::from_slice::<Manifest>(&bytes)
                    .map_err(|e| violations.push(format!("Malformed manifest: {e}")))
                    .ok()
            },
        );

        // Vector matrix
        let index_bytes = read_or_record(&index_path, INDEX_FILENAME, violations);
        let matrix = index_bytes.as_deref().and_then(|bytes| {
            VectorMatrix::from_bytes(bytes)
                .map_err(|e| violations.push(format!("Corrupt {INDEX_FILENAME}: {e}")))
                .ok()
        });
        if let Some(m) = &matrix {
            receipt.counts.index_total = m.rows();
            receipt.dim = m.dim();
        }

        // Id map
        let id_map = read_or_record(&id_map_path, ID_MAP_FILENAME, violations).and_then(|bytes| {
            let entries = IdMap::parse_entries(&bytes)
                .map_err(|e| violations.push(format!("Malformed {ID_MAP_FILENAME}: {e}")))
                .ok()?;
            receipt.counts.id_map_len = entries.len();
            IdMap::from_entries(entries)
                .map_err(|e| violations.push(format!("Invalid {ID_MAP_FILENAME}: {e}")))
                .ok()
        });

        let counts = &receipt.counts;
        if counts.jsonl_lines != counts.id_map_len || counts.id_map_len != counts.index_total {
            violations.push(
                SubstrateError::CountMismatch {
                    jsonl_lines: counts.jsonl_lines,
                    id_map_len: counts.id_map_len,
                    index_total: counts.index_total,
                }
                .to_string(),
            );
        }

        let recorded = manifest.as_ref().map(|m| &m.sha256);
        receipt.sha256_match.corpus = check_hash(
            "corpus",
            recorded.map(|h| h.corpus.as_str()),
            corpus_bytes.as_deref(),
            violations,
        );
        receipt.sha256_match.index = check_hash(
            INDEX_FILENAME,
            recorded.map(|h| h.index.as_str()),
            index_bytes.as_deref(),
            violations,
        );

        if let Some(manifest) = &manifest {
            if let Some(m) = &matrix {
                if manifest.count != m.rows() || manifest.dim != m.dim() {
                    violations.push(format!(
                        "Manifest shape {}x{} disagrees with {INDEX_FILENAME} {}x{}",
                        manifest.count,
                        manifest.dim,
                        m.rows(),
                        m.dim()
                    ));
                }
            }
        }

        if receipt.dim != expected_dim {
            violations.push(
                SubstrateError::DimensionMismatch {
                    expected: expected_dim,
                    actual: receipt.dim,
                }
                .to_string(),
            );
        }

        if let (Some(records), Some(id_map)) = (&records, &id_map) {
            let disagreement = records
                .iter()
                .zip(id_map.as_slice())
                .position(|(record, id)| &record.chunk_id != id);
            if let Some(row) = disagreement {
                violations.push(format!(
                    "{ID_MAP_FILENAME} row {row} is {:?} but corpus line has {:?}",
                    id_map.as_slice()[row],
                    records[row].chunk_id
                ));
            }
        }

        if let Some(m) = &matrix {
            receipt.audit = m.audit_norms();
            if receipt.audit.nan_inf {
                violations.push(format!("{INDEX_FILENAME} contains NaN or infinite values"));
            }
            if receipt.audit.max_norm_dev > NORM_TOLERANCE {
                violations.push(format!(
                    "Row norm deviates from 1 by {:.3e} (tolerance {NORM_TOLERANCE:.0e})",
                    receipt.audit.max_norm_dev
                ));
            }
        }

        let artifacts = match (matrix, id_map, records, manifest) {
            (Some(matrix), Some(id_map), Some(records), Some(manifest)) => {
                Some(VerifiedArtifacts {
                    matrix,
                    id_map,
                    records,
                    manifest,
                })
            }
            _ => None,
        };
        finish(receipt, artifacts)
    }
}

fn finish(mut receipt: IntegrityReceipt, artifacts: Option<VerifiedArtifacts>) -> Inspection {
    if receipt.violations.is_empty() {
        receipt.status = IntegrityStatus::Done;
        info!(
            rows = receipt.counts.index_total,
            dim = receipt.dim,
            "substrate integrity DONE"
        );
        Inspection {
            receipt,
            artifacts,
        }
    } else {
        warn!(
            violations = receipt.violations.len(),
            first = %receipt.violations[0],
            "substrate integrity ABSTAIN"
        );
        Inspection {
            receipt,
            artifacts: None,
        }
    }
}

/// Recompute one artifact hash against the manifest. Unavailable inputs
/// count as a mismatch.
fn check_hash(
    artifact: &str,
    recorded: Option<&str>,
    bytes: Option<&[u8]>,
    violations: &mut Vec<String>,
) -> bool {
    let actual = bytes.map(sha256_bytes);
    if let (Some(recorded), Some(actual)) = (recorded, actual.as_deref()) {
        if recorded == actual {
            return true;
        }
    }
    violations.push(
        SubstrateError::HashMismatch {
            artifact: artifact.to_string(),
            expected: recorded.unwrap_or("unavailable").to_string(),
            actual: actual.unwrap_or_else(|| "unavailable".to_string()),
        }
        .to_string(),
    );
    false
}

fn read_or_record(path: &Path, name: &str, violations: &mut Vec<String>) -> Option<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| {
            let e = AuguryError::io(path, e);
            violations.push(format!("Unreadable {name}: {e}"));
        })
        .ok()
}
