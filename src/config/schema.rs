use serde::{Deserialize, Serialize};

use crate::patient::CholesterolUnit;

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// units: mg/dL
/// color: true
/// prediction:
///   endpoint: https://example.inference.ml.azure.com/score
///   deployment: fhmodel-reducedfeatures-2
///   timeout: 10s
///   retries: 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Unit of cholesterol values entered on the command line
    #[serde(default)]
    pub units: CholesterolUnit,

    /// Force colors on or off; auto-detected from the terminal when unset
    #[serde(default)]
    pub color: Option<bool>,

    /// Hosted prediction service, used only by `predict`
    #[serde(default)]
    pub prediction: Option<PredictionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PredictionConfig {
    /// Scoring endpoint URL (must be https)
    pub endpoint: String,

    /// Value of the `azureml-model-deployment` header
    #[serde(default)]
    pub deployment: Option<String>,

    /// Request timeout as a humantime duration, e.g. "10s" (default: 10s)
    #[serde(default)]
    pub timeout: Option<String>,

    /// Retries after a network error or 5xx response (default: 3)
    #[serde(default)]
    pub retries: Option<u32>,
}

pub const DEFAULT_TIMEOUT: &str = "10s";
pub const DEFAULT_RETRIES: u32 = 3;
pub const MAX_RETRIES: u32 = 10;

impl PredictionConfig {
    pub fn timeout_str(&self) -> &str {
        self.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(DEFAULT_RETRIES)
    }
}

impl Config {
    /// Template written by `init`.
    pub fn template() -> Self {
        Self {
            units: CholesterolUnit::MgPerDecilitre,
            color: None,
            prediction: Some(PredictionConfig {
                endpoint: "https://your-endpoint.inference.ml.azure.com/score".to_string(),
                deployment: Some("fhmodel-reducedfeatures-2".to_string()),
                timeout: Some(DEFAULT_TIMEOUT.to_string()),
                retries: Some(DEFAULT_RETRIES),
            }),
        }
    }
}
