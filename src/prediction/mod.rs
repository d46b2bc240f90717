//! Client for the separately hosted statistical risk model.
//!
//! This is independent of the Framingham engine: scoring never calls it and
//! works without network access.

pub mod client;
pub mod error;
pub mod types;

pub use client::{get_api_key_from_env, PredictionClient, ENV_API_KEY_VAR};
pub use error::PredictionError;
pub use types::{Prediction, PredictionInput, COLUMNS};
