//! Fallback chain for the stand-in profile.
//!
//! Providers are tried in order. Each fallback past the first provider is
//! logged and recorded as a `DegradationEvent`. Only the stand-in profile
//! builds a chain; production has no fallback.

use std::sync::Mutex;

use augury_core::errors::{AuguryResult, EmbeddingError};
use augury_core::models::DegradationEvent;
use augury_core::traits::IEmbeddingProvider;
use chrono::Utc;
use tracing::warn;

pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
    dimensions: usize,
}

impl DegradationChain {
    /// Providers in priority order. All must share `dimensions`.
    pub fn new(dimensions: usize) -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
            dimensions,
        }
    }

    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Take the events recorded so far.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn record(&self, failed: &str, reason: &str, fallback: &str) {
        let event = DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{failed}: {reason}"),
            fallback_used: fallback.to_string(),
            timestamp: Utc::now(),
        };
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    fn run<T>(
        &self,
        op: impl Fn(&dyn IEmbeddingProvider) -> AuguryResult<T>,
    ) -> AuguryResult<T> {
        let mut last_failure: Option<(String, String)> = None;

        for provider in self.chain.iter().filter(|p| p.is_available()) {
            match op(provider.as_ref()) {
                Ok(value) => {
                    if let Some((failed, reason)) = &last_failure {
                        warn!(
                            failed = failed.as_str(),
                            fallback = provider.name(),
                            stand_in = provider.is_stand_in(),
                            "embedding degraded to fallback provider"
                        );
                        self.record(failed, reason, provider.name());
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, trying next in chain");
                    last_failure = Some((provider.name().to_string(), e.to_string()));
                }
            }
        }

        Err(EmbeddingError::ProviderUnavailable {
            provider: match last_failure {
                Some((name, reason)) => format!("all providers failed; last was {name}: {reason}"),
                None => "no available provider".to_string(),
            },
        }
        .into())
    }
}

impl IEmbeddingProvider for DegradationChain {
    fn embed(&self, text: &str) -> AuguryResult<Vec<f32>> {
        self.run(|p| p.embed(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AuguryResult<Vec<Vec<f32>>> {
        self.run(|p| p.embed_batch(texts))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "degradation-chain"
    }

    fn is_available(&self) -> bool {
        self.chain.iter().any(|p| p.is_available())
    }

    fn is_stand_in(&self) -> bool {
        self.chain.iter().any(|p| p.is_stand_in())
    }
}
