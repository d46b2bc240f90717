use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("API key missing: set FRS_MODEL_API_KEY")]
    MissingApiKey,

    #[error("No prediction service configured. Add a `prediction` section to the config file.")]
    NotConfigured,

    #[error("Invalid timeout '{0}': {1}")]
    InvalidTimeout(String, humantime::DurationError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed ({0}). The API key may be invalid or expired.")]
    Unauthorized(StatusCode),

    #[error("Prediction service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed prediction response: {0}")]
    Malformed(String),
}

impl PredictionError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            PredictionError::Network(_) => true,
            PredictionError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        let server = PredictionError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        let client = PredictionError::Status {
            status: StatusCode::BAD_REQUEST,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!PredictionError::Unauthorized(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!PredictionError::Malformed("x".to_string()).is_retryable());
    }

    #[test]
    fn test_missing_key_names_variable() {
        assert!(PredictionError::MissingApiKey.to_string().contains("FRS_MODEL_API_KEY"));
    }
}
