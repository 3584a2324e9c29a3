use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;

/// Locations of the corpus, the published substrate, and receipts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Corpus JSONL file, one record per line.
    pub corpus: String,
    /// Directory holding the vector matrix, id map, and manifest.
    pub substrate_dir: String,
    /// Where `verify-parity` writes its receipt.
    pub parity_receipt: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            corpus: defaults::DEFAULT_CORPUS_PATH.to_string(),
            substrate_dir: defaults::DEFAULT_SUBSTRATE_DIR.to_string(),
            parity_receipt: defaults::DEFAULT_PARITY_RECEIPT_PATH.to_string(),
        }
    }
}

impl PathsConfig {
    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.corpus)
    }

    pub fn substrate_path(&self) -> PathBuf {
        PathBuf::from(&self.substrate_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        Path::new(&self.substrate_dir).join(defaults::INDEX_FILENAME)
    }

    pub fn id_map_path(&self) -> PathBuf {
        Path::new(&self.substrate_dir).join(defaults::ID_MAP_FILENAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        Path::new(&self.substrate_dir).join(defaults::MANIFEST_FILENAME)
    }

    pub fn parity_receipt_path(&self) -> PathBuf {
        PathBuf::from(&self.parity_receipt)
    }
}
