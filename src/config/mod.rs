mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, PredictionConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT, MAX_RETRIES};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/framingham/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("framingham"))
}

/// Get the default config file path (~/.config/framingham/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref prediction) = config.prediction {
        if !prediction.endpoint.starts_with("https://") {
            errors.push(format!(
                "prediction.endpoint: must be an https URL, got '{}'",
                prediction.endpoint
            ));
        }

        if let Err(e) = humantime::parse_duration(prediction.timeout_str()) {
            errors.push(format!(
                "prediction.timeout: invalid duration '{}' - {}",
                prediction.timeout_str(),
                e
            ));
        }

        if prediction.retries() > MAX_RETRIES {
            errors.push(format!(
                "prediction.retries: must be at most {}, got {}",
                MAX_RETRIES,
                prediction.retries()
            ));
        }

        if let Some(ref deployment) = prediction.deployment {
            if deployment.trim().is_empty() {
                errors.push("prediction.deployment: must not be empty".to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
