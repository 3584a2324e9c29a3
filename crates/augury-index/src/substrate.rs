//! Verified, immutable, shareable substrate.

use std::sync::Arc;

use augury_core::errors::{AuguryResult, SubstrateError};
use augury_core::{AuguryConfig, IntegrityReceipt, Manifest};

use crate::id_map::IdMap;
use crate::matrix::VectorMatrix;
use crate::verifier::IntegrityVerifier;

/// One loaded substrate generation.
///
/// Only constructible from a DONE integrity check. Cloning is cheap; all
/// clones share the same matrix.
#[derive(Debug, Clone)]
pub struct Substrate {
    matrix: Arc<VectorMatrix>,
    id_map: Arc<IdMap>,
    texts: Arc<Vec<String>>,
    manifest: Arc<Manifest>,
    receipt: Arc<IntegrityReceipt>,
}

impl Substrate {
    /// Verify the configured substrate and load it.
    ///
    /// An ABSTAIN receipt is returned as `IntegrityAbstain`; nothing is loaded.
    pub fn open(config: &AuguryConfig) -> AuguryResult<Self> {
        let inspection = IntegrityVerifier::new(config.clone()).inspect();
        let receipt = inspection.receipt;
        let Some(artifacts) = inspection.artifacts.filter(|_| receipt.is_done()) else {
            return Err(SubstrateError::IntegrityAbstain {
                violations: receipt.violations,
            }
            .into());
        };

        let texts = artifacts.records.into_iter().map(|r| r.content).collect();
        Ok(Self {
            matrix: Arc::new(artifacts.matrix),
            id_map: Arc::new(artifacts.id_map),
            texts: Arc::new(texts),
            manifest: Arc::new(artifacts.manifest),
            receipt: Arc::new(receipt),
        })
    }

    pub fn matrix(&self) -> &Arc<VectorMatrix> {
        &self.matrix
    }

    pub fn id_map(&self) -> &IdMap {
        &self.id_map
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The DONE receipt this substrate was loaded under.
    pub fn receipt(&self) -> &IntegrityReceipt {
        &self.receipt
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    pub fn chunk_id(&self, row: usize) -> Option<&str> {
        self.id_map.get(row)
    }

    pub fn text(&self, row: usize) -> Option<&str> {
        self.texts.get(row).map(String::as_str)
    }
}
