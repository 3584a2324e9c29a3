mod corpus_record;
mod degradation_event;
mod integrity_receipt;
mod manifest;
mod parity_receipt;
mod scored_chunk;

pub use corpus_record::CorpusRecord;
pub use degradation_event::DegradationEvent;
pub use integrity_receipt::{
    ArtifactCounts, ArtifactPaths, HashMatch, IntegrityReceipt, IntegrityStatus, NormAudit,
};
pub use manifest::{Manifest, ManifestHashes};
pub use parity_receipt::{
    CandidateVerdict, GateStatus, GateThresholds, LatencySummary, ParityReceipt, SubstrateShape,
};
pub use scored_chunk::{CacheStats, ScoredChunk};
