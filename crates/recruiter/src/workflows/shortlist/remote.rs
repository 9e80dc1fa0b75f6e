use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::BlindServiceConfig;

/// Client abstraction over the external CV blinding service.
#[async_trait]
pub trait CvBlinder: Send + Sync {
    /// Returns the blinded rendition of `cv_content`, or fails. No retry
    /// semantics are implied; callers decide how to recover.
    async fn blind(&self, cv_content: &str) -> Result<String, BlindError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlindError {
    #[error("blind service returned HTTP {status}")]
    Status { status: u16 },
    #[error("blind service unreachable: {0}")]
    Transport(String),
    #[error("blind service returned an invalid payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Serialize)]
struct BlindRequest<'a> {
    cv_content: &'a str,
}

#[derive(Debug, Deserialize)]
struct BlindResponse {
    blind_cv_content: String,
}

/// `POST {base_url}/blind-cv` client for the production blinding service.
/// Any non-2xx response is a failure; no structured error body is assumed.
pub struct HttpCvBlinder {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCvBlinder {
    pub fn new(config: &BlindServiceConfig) -> Result<Self, BlindError> {
        let client = reqwest::Client::builder()
            .user_agent("recruiter/0.1 (shortlist orchestrator)")
            .timeout(config.timeout())
            .build()
            .map_err(|err| BlindError::Transport(err.to_string()))?;

        let endpoint = format!("{}/blind-cv", config.base_url.trim_end_matches('/'));
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl CvBlinder for HttpCvBlinder {
    async fn blind(&self, cv_content: &str) -> Result<String, BlindError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&BlindRequest { cv_content })
            .send()
            .await
            .map_err(|err| BlindError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(BlindError::Status {
                status: response.status().as_u16(),
            });
        }

        let payload: BlindResponse = response
            .json()
            .await
            .map_err(|err| BlindError::InvalidPayload(err.to_string()))?;

        Ok(payload.blind_cv_content)
    }
}
