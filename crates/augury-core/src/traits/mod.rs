mod embedding;
mod neighbor_search;

pub use embedding::IEmbeddingProvider;
pub use neighbor_search::INeighborSearcher;
