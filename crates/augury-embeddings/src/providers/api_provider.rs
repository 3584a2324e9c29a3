//! HTTP embedding provider.
//!
//! POSTs `{"model", "input": [...]}` to the configured endpoint and reads
//! `{"data": [{"index", "embedding"}]}`. Calls are blocking: the provider
//! owns a small tokio runtime and drives each request to completion.

use std::time::Duration;

use augury_core::config::EmbeddingConfig;
use augury_core::errors::{AuguryResult, EmbeddingError};
use augury_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

pub struct ApiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl ApiProvider {
    /// Build from config. The endpoint is required; the API key is read from
    /// the configured environment variable if set.
    pub fn new(config: &EmbeddingConfig) -> AuguryResult<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| EmbeddingError::Misconfigured {
                reason: "embedding.endpoint is required for the api provider".to_string(),
            })?
            .to_string();
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| EmbeddingError::Misconfigured {
                reason: format!("http client: {e}"),
            })?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| EmbeddingError::Misconfigured {
                reason: format!("tokio runtime: {e}"),
            })?;

        Ok(Self {
            endpoint,
            model: config.model.clone(),
            api_key,
            dimensions: config.dim,
            client,
            runtime,
        })
    }

    fn request(&self, texts: &[String]) -> AuguryResult<Vec<Vec<f32>>> {
        let failed = |reason: String| EmbeddingError::InferenceFailed { reason };

        let mut data = self.runtime.block_on(async {
            let mut req = self.client.post(&self.endpoint).json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            });
            if let Some(key) = &self.api_key {
                req = req.bearer_auth(key);
            }
            let resp = req
                .send()
                .await
                .map_err(|e| failed(format!("request to {} failed: {e}", self.endpoint)))?
                .error_for_status()
                .map_err(|e| failed(format!("embedding service returned error: {e}")))?;
            resp.json::<EmbeddingResponse>()
                .await
                .map(|r| r.data)
                .map_err(|e| failed(format!("malformed embedding response: {e}")))
        })?;

        if data.len() != texts.len() {
            return Err(failed(format!(
                "requested {} embeddings, received {}",
                texts.len(),
                data.len()
            ))
            .into());
        }
        data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));

        let mut out = Vec::with_capacity(data.len());
        for datum in data {
            if datum.embedding.len() != self.dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: datum.embedding.len(),
                }
                .into());
            }
            out.push(datum.embedding);
        }
        debug!(count = out.len(), "embeddings received");
        Ok(out)
    }
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> AuguryResult<Vec<f32>> {
        let mut batch = self.request(&[text.to_string()])?;
        batch.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty embedding response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> AuguryResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "api"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoint_is_misconfigured() {
        let config = EmbeddingConfig::default();
        let err = ApiProvider::new(&config).err().unwrap();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn blank_endpoint_is_misconfigured() {
        let config = EmbeddingConfig {
            endpoint: Some("   ".to_string()),
            ..EmbeddingConfig::default()
        };
        assert!(ApiProvider::new(&config).is_err());
    }

    #[test]
    fn unreachable_endpoint_fails_inference() {
        let config = EmbeddingConfig {
            endpoint: Some("http://127.0.0.1:9/embeddings".to_string()),
            request_timeout_ms: 500,
            ..EmbeddingConfig::default()
        };
        let provider = ApiProvider::new(&config).unwrap();
        assert!(provider.embed("hello").is_err());
        assert!(provider.embed_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn response_shape_parses() {
        let body = r#"{"data":[{"index":1,"embedding":[0.5]},{"index":0,"embedding":[1.0]}]}"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        parsed.data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        assert_eq!(parsed.data[0].embedding, vec![1.0]);
    }
}
