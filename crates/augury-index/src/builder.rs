//! Index Builder: corpus → normalized matrix, id map, manifest.

use augury_core::config::defaults::{ID_MAP_FILENAME, INDEX_FILENAME, MANIFEST_FILENAME};
use augury_core::constants::INDEX_TYPE;
use augury_core::errors::AuguryResult;
use augury_core::models::{
    ArtifactCounts, ArtifactPaths, IntegrityStatus, Manifest, ManifestHashes,
};
use augury_core::AuguryConfig;
use augury_observability::index_build_span;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::{parse_corpus, read_corpus_bytes};
use crate::hashing::sha256_bytes;
use crate::id_map::IdMap;
use crate::matrix::VectorMatrix;
use crate::normalize::l2_normalize;
use crate::publish::StagedSubstrate;

/// Embedding widths seen during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDims {
    /// Width observed in the corpus. This is what was written.
    pub data: usize,
    /// Width the configuration expects.
    pub expected: usize,
    pub normalized: bool,
}

/// Summary printed by `build-index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub status: IntegrityStatus,
    pub paths: ArtifactPaths,
    pub counts: ArtifactCounts,
    pub dim: BuildDims,
}

/// Builds and atomically publishes a substrate from the configured corpus.
pub struct IndexBuilder {
    config: AuguryConfig,
}

impl IndexBuilder {
    pub fn new(config: AuguryConfig) -> Self {
        Self { config }
    }

    /// Run one build.
    ///
    /// Missing, empty, or invalid corpus input returns an ABSTAIN-class
    /// error before anything is written. A width that differs from the
    /// configured dimension is logged and the observed width is used.
    pub fn build(&self) -> AuguryResult<BuildReport> {
        let paths = &self.config.paths;
        let corpus_path = paths.corpus_path();
        let _span = index_build_span!(corpus_path.display()).entered();

        let bytes = read_corpus_bytes(&corpus_path)?;
        let records = parse_corpus(&bytes, &corpus_path)?;
        let corpus_sha = sha256_bytes(&bytes);

        let data_dim = records[0].embedding.len();
        let expected_dim = self.config.embedding.dim;
        if data_dim != expected_dim {
            warn!(
                observed = data_dim,
                expected = expected_dim,
                "embedding width differs from configuration; using observed width"
            );
        }

        let eps = self.config.retrieval.normalization_eps;
        let rows: Vec<Vec<f32>> = records
            .par_iter()
            .map(|r| l2_normalize(&r.embedding, eps))
            .collect();
        let matrix = VectorMatrix::from_rows(rows, data_dim)?;
        let id_map = IdMap::new(records.iter().map(|r| r.chunk_id.clone()).collect())?;

        let index_bytes = matrix.to_bytes()?;
        let id_map_bytes = id_map.to_json_bytes()?;

        let manifest = Manifest {
            index_type: INDEX_TYPE.to_string(),
            count: matrix.rows(),
            dim: data_dim,
            metric: self.config.embedding.metric.clone(),
            embed_model: self.config.embedding.model.clone(),
            corpus_path: corpus_path.display().to_string(),
            index_path: paths.index_path().display().to_string(),
            id_map_path: paths.id_map_path().display().to_string(),
            sha256: ManifestHashes {
                corpus: corpus_sha,
                index: sha256_bytes(&index_bytes),
            },
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;

        let staged = StagedSubstrate::create(&paths.substrate_path())?;
        staged.write(INDEX_FILENAME, &index_bytes)?;
        staged.write(ID_MAP_FILENAME, &id_map_bytes)?;
        staged.write(MANIFEST_FILENAME, &manifest_bytes)?;
        let published = staged.publish()?;

        info!(
            rows = matrix.rows(),
            dim = data_dim,
            substrate = %published.display(),
            "substrate published"
        );

        Ok(BuildReport {
            status: IntegrityStatus::Done,
            paths: ArtifactPaths {
                corpus: manifest.corpus_path,
                index: manifest.index_path,
                id_map: manifest.id_map_path,
                manifest: paths.manifest_path().display().to_string(),
            },
            counts: ArtifactCounts {
                jsonl_lines: records.len(),
                id_map_len: id_map.len(),
                index_total: matrix.rows(),
            },
            dim: BuildDims {
                data: data_dim,
                expected: expected_dim,
                normalized: true,
            },
        })
    }
}
