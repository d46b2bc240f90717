use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use crate::config::PredictionConfig;

use super::error::PredictionError;
use super::types::{Prediction, PredictionInput};

/// Environment variable holding the prediction service API key
pub const ENV_API_KEY_VAR: &str = "FRS_MODEL_API_KEY";

const DEPLOYMENT_HEADER: &str = "azureml-model-deployment";

/// Read the API key from FRS_MODEL_API_KEY.
/// Returns Some(key) if the env var is set and non-empty, None otherwise.
pub fn get_api_key_from_env() -> Option<String> {
    match std::env::var(ENV_API_KEY_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Client for the hosted binary risk model.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
    deployment: Option<String>,
    api_key: String,
    retries: u32,
}

impl PredictionClient {
    pub fn new(config: &PredictionConfig, api_key: String) -> Result<Self, PredictionError> {
        let timeout = humantime::parse_duration(config.timeout_str())
            .map_err(|e| PredictionError::InvalidTimeout(config.timeout_str().to_string(), e))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            deployment: config.deployment.clone(),
            api_key,
            retries: config.retries(),
        })
    }

    /// Build a client using the API key from the environment.
    pub fn from_env(config: Option<&PredictionConfig>) -> Result<Self, PredictionError> {
        let config = config.ok_or(PredictionError::NotConfigured)?;
        let api_key = get_api_key_from_env().ok_or(PredictionError::MissingApiKey)?;
        Self::new(config, api_key)
    }

    /// Send one patient to the service and interpret the answer.
    pub async fn predict(&self, input: &PredictionInput) -> Result<Prediction, PredictionError> {
        let body = input.to_request_body();

        // Retry strategy: exponential backoff, only for transient failures
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.retries as usize);

        let response = RetryIf::spawn(
            retry_strategy,
            || self.send_once(&body),
            |e: &PredictionError| e.is_retryable(),
        )
        .await?;

        Prediction::from_response(&response)
    }

    async fn send_once(&self, body: &Value) -> Result<Value, PredictionError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .bearer_auth(&self.api_key)
            .json(body);

        if let Some(ref deployment) = self.deployment {
            request = request.header(DEPLOYMENT_HEADER, deployment.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PredictionError::Unauthorized(status));
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(PredictionError::Status { status, body: text });
        }

        serde_json::from_str(&text)
            .map_err(|e| PredictionError::Malformed(format!("invalid JSON ({}): {}", e, text)))
    }
}
