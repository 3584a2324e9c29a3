use serde::{Deserialize, Serialize};

/// Describes one published substrate generation.
///
/// The hashes bind the manifest to the exact corpus and matrix bytes it was
/// built from; any later mutation of either file is detectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub index_type: String,
    pub count: usize,
    pub dim: usize,
    pub metric: String,
    pub embed_model: String,
    pub corpus_path: String,
    pub index_path: String,
    pub id_map_path: String,
    pub sha256: ManifestHashes,
}

/// Hex-encoded SHA-256 digests of the corpus file and the matrix file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestHashes {
    pub corpus: String,
    pub index: String,
}
