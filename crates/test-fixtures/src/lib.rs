//! Synthetic corpora and workspace helpers for Augury integration tests.
//!
//! Everything here is seeded, so a given `(n, dim, seed)` always produces the
//! same corpus bytes.

use std::path::{Path, PathBuf};

use augury_core::config::{EmbeddingProfile, ProviderKind};
use augury_core::{AuguryConfig, CorpusRecord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

/// Generate `n` records with raw (unnormalized) embeddings of width `dim`.
pub fn synthetic_records(n: usize, dim: usize, seed: u64) -> Vec<CorpusRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| CorpusRecord {
            chunk_id: chunk_id(i),
            content: format!("synthetic chunk {i} about topic {}", i % 7),
            embedding: (0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect(),
        })
        .collect()
}

/// Chunk id used for row `i` of a synthetic corpus.
pub fn chunk_id(i: usize) -> String {
    format!("chunk-{i:05}")
}

/// Serialize records as JSONL, one per line.
pub fn corpus_jsonl(records: &[CorpusRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record).unwrap_or_else(|e| panic!("{e}")));
        out.push('\n');
    }
    out
}

/// Write records to `path` as JSONL.
///
/// # Panics
/// Panics if the file can't be written.
pub fn write_corpus(path: &Path, records: &[CorpusRecord]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
    }
    std::fs::write(path, corpus_jsonl(records))
        .unwrap_or_else(|e| panic!("Failed to write corpus {}: {}", path.display(), e));
}

/// A config rooted in `root` using the stand-in embedding profile.
pub fn stand_in_config(root: &Path, dim: usize) -> AuguryConfig {
    let mut config = AuguryConfig::default();
    config.paths.corpus = path_string(root.join("corpus.jsonl"));
    config.paths.substrate_dir = path_string(root.join("substrate"));
    config.paths.parity_receipt = path_string(root.join("receipts").join("parity.json"));
    config.embedding.dim = dim;
    config.embedding.model = "stand-in".to_string();
    config.embedding.profile = EmbeddingProfile::StandIn;
    config.embedding.provider = ProviderKind::StandIn;
    config
}

/// A temporary workspace holding a synthetic corpus and a matching config.
///
/// The substrate is not built; tests decide when to run the builder.
pub struct TestWorkspace {
    pub dir: TempDir,
    pub config: AuguryConfig,
    pub records: Vec<CorpusRecord>,
}

impl TestWorkspace {
    pub fn new(n: usize, dim: usize, seed: u64) -> Self {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("Failed to create tempdir: {e}"));
        let config = stand_in_config(dir.path(), dim);
        let records = synthetic_records(n, dim, seed);
        write_corpus(&config.paths.corpus_path(), &records);
        Self {
            dir,
            config,
            records,
        }
    }

    /// A workspace whose corpus file has not been written.
    pub fn without_corpus(dim: usize) -> Self {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("Failed to create tempdir: {e}"));
        let config = stand_in_config(dir.path(), dim);
        Self {
            dir,
            config,
            records: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.config.paths.corpus_path()
    }

    /// Replace the corpus file contents.
    pub fn rewrite_corpus(&mut self, records: Vec<CorpusRecord>) {
        write_corpus(&self.corpus_path(), &records);
        self.records = records;
    }
}

/// L2-normalize in f64, for comparing against engine output.
pub fn unit(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    v.iter().map(|x| ((*x as f64) / (norm + 1e-12)) as f32).collect()
}

fn path_string(p: PathBuf) -> String {
    p.display().to_string()
}
