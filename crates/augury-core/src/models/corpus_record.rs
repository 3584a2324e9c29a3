use serde::{Deserialize, Serialize};

/// One corpus line: a chunk, its text, and its raw embedding.
///
/// Line order in the corpus file defines the row index in the vector matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub chunk_id: String,
    pub content: String,
    #[serde(alias = "mean_chunk_embedding")]
    pub embedding: Vec<f32>,
}
