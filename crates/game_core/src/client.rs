use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::protocol::{generate_route, GenerateRequest, GenerateResponse};
use tracing::{debug, warn};
use url::Url;

use crate::error::GenerateError;

/// Anything that can turn a topic/level into a round of facts.
#[async_trait]
pub trait FactService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest)
        -> Result<GenerateResponse, GenerateError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Displayable error text. Falsy values (`null`, `""`, `false`, `0`)
    /// count as absent.
    fn message(self) -> Option<String> {
        match self.error? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(text) if text.is_empty() => None,
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// `FactService` backed by the `/generate` HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpFactService {
    http: Client,
    endpoint: Url,
}

impl HttpFactService {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(server_url)?;
        let endpoint = base.join(generate_route())?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl FactService for HttpFactService {
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GenerateError> {
        debug!(endpoint = %self.endpoint, topic = %request.topic, "posting generate request");
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "generate request did not complete");
                GenerateError::from(err)
            })?;

        let status = res.status();
        let body = res.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice::<GenerateResponse>(&body).map_err(|err| {
                warn!(error = %err, "undecodable generate response");
                GenerateError::transport(format!("invalid response body: {err}"))
            });
        }

        let body: ErrorBody = serde_json::from_slice(&body).map_err(|err| {
            warn!(%status, error = %err, "undecodable error response");
            GenerateError::transport(format!("invalid error body ({status}): {err}"))
        })?;
        Err(GenerateError::service(status.as_u16(), body.message()))
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
