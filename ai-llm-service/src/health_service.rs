//! Health checks for the completion backend (OpenAI-compatible, Ollama).
//!
//! Probes:
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//! - OpenAI: `GET {endpoint}/v1/models` with optional Bearer auth (best-effort model check)
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] is resilient and never fails (errors mapped to `ok=false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client })
    }

    /// Checks health for a single config, routing to the provider-specific probe.
    ///
    /// Never returns an error: any failure becomes `HealthStatus { ok: false, .. }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
            LlmProvider::OpenAI => self.try_probe_openai(cfg).await,
        };

        match result {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    async fn get(
        &self,
        provider: Provider,
        url: String,
        auth: Option<&str>,
    ) -> Result<(reqwest::Response, u128), AiLlmError> {
        debug!(%provider, "GET {}", url);
        let start = Instant::now();

        let mut req = self.client.get(&url);
        if let Some(key) = auth {
            let value = header::HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                ProviderError::new(
                    provider,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?;
            req = req.header(header::AUTHORIZATION, value);
        }

        let resp = req.send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet: make_snippet(&text),
                }),
            )
            .into());
        }
        Ok((resp, latency))
    }

    /// Strict Ollama probe: `GET /api/tags`, then look for the model name.
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let url = format!("{}/api/tags", cfg.base_url());
        let (resp, latency) = self.get(Provider::Ollama, url, None).await?;

        Ok(match resp.json::<Tags>().await {
            Ok(Tags {
                models: Some(models),
            }) => {
                if models.iter().any(|m| m.name == cfg.model) {
                    HealthStatus::new(cfg, true, latency, "Ollama is healthy; model is available")
                } else {
                    HealthStatus::new(
                        cfg,
                        false,
                        latency,
                        "Ollama is up, but model not found in /api/tags",
                    )
                }
            }
            Ok(Tags { models: None }) => HealthStatus::new(
                cfg,
                true,
                latency,
                "Ollama is healthy; tags response without `models` field",
            ),
            Err(e) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("Ollama is reachable; failed to decode /api/tags: {e}"),
            ),
        })
    }

    /// Strict OpenAI probe: `GET /v1/models`, then look for the model id.
    async fn try_probe_openai(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        #[derive(Deserialize)]
        struct ModelItem {
            id: String,
        }
        #[derive(Deserialize)]
        struct Models {
            data: Vec<ModelItem>,
        }

        let url = format!("{}/v1/models", cfg.base_url());
        let (resp, latency) = self
            .get(Provider::OpenAI, url, cfg.api_key.as_deref())
            .await?;

        Ok(match resp.json::<Models>().await {
            Ok(models) if models.data.iter().any(|m| m.id == cfg.model) => {
                HealthStatus::new(cfg, true, latency, "OpenAI is healthy; model is available")
            }
            Ok(_) => HealthStatus::new(
                cfg,
                false,
                latency,
                "OpenAI is up, but model not found in /v1/models",
            ),
            Err(e) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("OpenAI is reachable; failed to decode /v1/models: {e}"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};
    use serde_json::json;

    async fn spawn_models() -> String {
        let app = Router::new().route(
            "/v1/models",
            get(|| async { Json(json!({"data": [{"id": "known-model"}]})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn cfg(endpoint: String, model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: model.into(),
            endpoint,
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(2),
        }
    }

    #[tokio::test]
    async fn known_model_is_healthy() {
        let base = spawn_models().await;
        let svc = HealthService::new(Some(2)).unwrap();
        let status = svc.check(&cfg(base, "known-model")).await;
        assert!(status.ok, "{}", status.message);
        assert_eq!(status.provider, "OpenAI");
    }

    #[tokio::test]
    async fn unknown_model_is_not_ok() {
        let base = spawn_models().await;
        let svc = HealthService::new(Some(2)).unwrap();
        let status = svc.check(&cfg(base, "other")).await;
        assert!(!status.ok);
    }

    #[tokio::test]
    async fn missing_route_maps_to_failure() {
        let base = spawn_models().await;
        let svc = HealthService::new(Some(2)).unwrap();
        let mut c = cfg(base, "known-model");
        c.provider = LlmProvider::Ollama;
        let status = svc.check(&c).await;
        assert!(!status.ok);
        assert!(status.message.contains("404"));
    }
}
