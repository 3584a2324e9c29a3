//! Process-lifetime service handles.

use std::sync::Arc;

use augury_core::models::DegradationEvent;
use augury_core::{AuguryConfig, AuguryResult};
use augury_embeddings::EmbeddingStrategy;
use augury_index::Substrate;
use augury_retrieval::ExactEngine;
use tracing::info;

use crate::service::QueryService;

/// Everything the query path needs, constructed once.
///
/// Opening verifies the substrate and selects the embedding provider up
/// front, so the first query pays no loading cost and a bad substrate or
/// forbidden provider fails at startup.
pub struct ServiceHandles {
    config: AuguryConfig,
    embedder: Arc<EmbeddingStrategy>,
    service: QueryService,
}

impl ServiceHandles {
    pub fn open(config: AuguryConfig) -> AuguryResult<Self> {
        let substrate = Substrate::open(&config)?;
        let embedder = Arc::new(EmbeddingStrategy::from_config(&config.embedding)?);
        Ok(Self::from_parts(config, substrate, embedder))
    }

    /// Assemble handles from an already-open substrate and embedder.
    pub fn from_parts(
        config: AuguryConfig,
        substrate: Substrate,
        embedder: Arc<EmbeddingStrategy>,
    ) -> Self {
        let engine = ExactEngine::from_config(substrate.matrix().clone(), &config.retrieval);
        info!(
            rows = substrate.rows(),
            dim = substrate.dim(),
            provider = embedder.provider_name(),
            cache_capacity = config.service.cache_capacity,
            "query service ready"
        );
        let service = QueryService::new(
            substrate,
            engine,
            embedder.clone(),
            &config.service,
            config.retrieval.normalization_eps,
        );
        Self {
            config,
            embedder,
            service,
        }
    }

    pub fn service(&self) -> &QueryService {
        &self.service
    }

    pub fn config(&self) -> &AuguryConfig {
        &self.config
    }

    pub fn embedder(&self) -> &EmbeddingStrategy {
        &self.embedder
    }

    /// Embedding fallbacks since the last drain.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.embedder.drain_events()
    }
}
