//! Provider selection by profile.
//!
//! | profile    | provider   | result                                   |
//! |------------|------------|------------------------------------------|
//! | production | api        | API provider, no fallback                |
//! | production | stand-in   | refused (`StandInForbidden`)             |
//! | stand-in   | stand-in   | hashing stand-in                         |
//! | stand-in   | api        | API provider, logged fallback to stand-in |

use std::sync::Arc;

use augury_core::config::{EmbeddingConfig, EmbeddingProfile, ProviderKind};
use augury_core::errors::{AuguryResult, EmbeddingError};
use augury_core::models::DegradationEvent;
use augury_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

use crate::degradation::DegradationChain;
use crate::providers::{ApiProvider, StandInProvider};

pub struct EmbeddingStrategy {
    profile: EmbeddingProfile,
    provider: Arc<dyn IEmbeddingProvider>,
    degradation: Option<Arc<DegradationChain>>,
}

impl EmbeddingStrategy {
    pub fn from_config(config: &EmbeddingConfig) -> AuguryResult<Self> {
        let strategy = match (config.profile, config.provider) {
            (EmbeddingProfile::Production, ProviderKind::Api) => {
                let api = ApiProvider::new(config)?;
                Self::single(EmbeddingProfile::Production, Arc::new(api))
            }
            (EmbeddingProfile::Production, ProviderKind::StandIn) => {
                return Err(forbidden());
            }
            (EmbeddingProfile::StandIn, ProviderKind::StandIn) => Self::single(
                EmbeddingProfile::StandIn,
                Arc::new(StandInProvider::new(config.dim)),
            ),
            (EmbeddingProfile::StandIn, ProviderKind::Api) => {
                warn!("stand-in profile: api failures fall back to the hashing stand-in");
                let mut chain = DegradationChain::new(config.dim);
                chain.push(Box::new(ApiProvider::new(config)?));
                chain.push(Box::new(StandInProvider::new(config.dim)));
                let chain = Arc::new(chain);
                Self {
                    profile: EmbeddingProfile::StandIn,
                    provider: chain.clone(),
                    degradation: Some(chain),
                }
            }
        };

        info!(
            profile = ?strategy.profile,
            provider = strategy.provider.name(),
            stand_in = strategy.is_stand_in(),
            "embedding provider selected"
        );
        Ok(strategy)
    }

    /// Wrap an explicit provider. Production refuses stand-in providers.
    pub fn with_provider(
        profile: EmbeddingProfile,
        provider: Box<dyn IEmbeddingProvider>,
    ) -> AuguryResult<Self> {
        if profile == EmbeddingProfile::Production && provider.is_stand_in() {
            return Err(forbidden());
        }
        Ok(Self::single(profile, Arc::from(provider)))
    }

    fn single(profile: EmbeddingProfile, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            profile,
            provider,
            degradation: None,
        }
    }

    pub fn embed(&self, text: &str) -> AuguryResult<Vec<f32>> {
        let vector = self.provider.embed(text)?;
        if vector.len() != self.provider.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.provider.dimensions(),
                actual: vector.len(),
            }
            .into());
        }
        Ok(vector)
    }

    /// Fallback events since the last call. Always empty outside the
    /// stand-in API chain.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.degradation
            .as_ref()
            .map(|chain| chain.drain_events())
            .unwrap_or_default()
    }

    pub fn profile(&self) -> EmbeddingProfile {
        self.profile
    }

    pub fn provider_name(&self) -> &str {
        match &self.degradation {
            Some(chain) => chain.active_provider_name(),
            None => self.provider.name(),
        }
    }

    pub fn is_stand_in(&self) -> bool {
        self.provider.is_stand_in()
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }
}

fn forbidden() -> augury_core::AuguryError {
    EmbeddingError::StandInForbidden {
        profile: "production".to_string(),
    }
    .into()
}
