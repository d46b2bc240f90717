//! Framingham Risk Score calculator.
//!
//! - `patient`: validated clinical inputs and unit conversion
//! - `scoring`: the table-driven FRS engine (no I/O)
//! - `output`: trace, summary and table rendering
//! - `batch`: scoring many patients from one file
//! - `config`: YAML configuration
//! - `prediction`: client for the separately hosted risk model

pub mod batch;
pub mod config;
pub mod output;
pub mod patient;
pub mod prediction;
pub mod scoring;
