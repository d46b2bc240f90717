use anyhow::{Context, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::patient::{CholesterolUnit, PatientError, PatientInput, PatientRecord};
use crate::scoring::{calculate_score, ScoreResult, ScoringError};

/// A file of patients to score together.
///
/// Example YAML:
/// ```yaml
/// units: mg/dL
/// patients:
///   - { name: "John Doe", gender: Male, age: 39, hdl: 54, total_cholesterol: 155, systolic_bp: 120 }
///   - { name: "Jane Doe", gender: Female, age: 33, hdl: 73, total_cholesterol: 150, systolic_bp: 118 }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    /// Unit of every cholesterol value in the file (default: mmol/L)
    #[serde(default)]
    pub units: CholesterolUnit,

    pub patients: Vec<PatientInput>,
}

/// A row that failed validation. Other rows are still scored.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based position in the file
    pub row: usize,
    pub label: String,
    pub error: PatientError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Sorted by risk descending, then by score descending
    pub scored: Vec<(PatientRecord, ScoreResult)>,
    pub rejected: Vec<RejectedRow>,
}

pub fn load_batch_file(path: &Path) -> Result<BatchFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read patient file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse patient file: invalid YAML in {}", path.display()))
}

/// Validate and score every patient in `file`.
///
/// Validation failures are collected per row. A scoring error means a broken
/// table and aborts the whole batch.
pub fn score_batch(file: BatchFile) -> Result<BatchOutcome, ScoringError> {
    let mut outcome = BatchOutcome::default();

    for (i, input) in file.patients.into_iter().enumerate() {
        let row = i + 1;
        let label = input
            .name
            .clone()
            .or_else(|| input.id.clone())
            .unwrap_or_else(|| format!("row {}", row));

        match PatientRecord::new(input.into_mmol(file.units)) {
            Ok(record) => {
                let result = calculate_score(&record)?;
                outcome.scored.push((record, result));
            }
            Err(error) => outcome.rejected.push(RejectedRow { row, label, error }),
        }
    }

    outcome.scored.sort_by(|a, b| {
        // Primary: risk descending
        let risk_cmp = b
            .1
            .interpretation
            .ten_year_risk
            .as_percent()
            .partial_cmp(&a.1.interpretation.ten_year_risk.as_percent())
            .unwrap_or(Ordering::Equal);
        if risk_cmp != Ordering::Equal {
            return risk_cmp;
        }
        // Tie-breaker: raw score descending (separates saturated results)
        b.1.score().cmp(&a.1.score())
    });

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskLevel;
    use std::env;

    const SAMPLE: &str = r#"
units: mmol/L
patients:
  - name: John Doe
    gender: Male
    age: 39
    hdl: 1.4
    total_cholesterol: 4.0
    systolic_bp: 120
  - name: Steven Smith
    gender: Male
    age: 59
    hdl: 0.5
    total_cholesterol: 7.2
    systolic_bp: 154
    hbp_treatment: true
    smoker: true
  - id: bad-row
    gender: male
    age: 50
    hdl: 1.2
    total_cholesterol: 5.0
    systolic_bp: 130
  - name: Shelley Smith
    gender: Female
    age: 75
    hdl: 0.9
    total_cholesterol: 6.2
    systolic_bp: 140
    smoker: true
"#;

    #[test]
    fn test_parse_batch_file() {
        let file: BatchFile = serde_saphyr::from_str(SAMPLE).unwrap();
        assert_eq!(file.units, CholesterolUnit::MmolPerLitre);
        assert_eq!(file.patients.len(), 4);
    }

    #[test]
    fn test_invalid_row_does_not_abort_batch() {
        let file: BatchFile = serde_saphyr::from_str(SAMPLE).unwrap();
        let outcome = score_batch(file).unwrap();
        assert_eq!(outcome.scored.len(), 3);
        assert_eq!(outcome.rejected.len(), 1);

        let rejected = &outcome.rejected[0];
        assert_eq!(rejected.row, 3);
        assert_eq!(rejected.label, "bad-row");
        assert_eq!(rejected.error, PatientError::InvalidGender("male".to_string()));
    }

    #[test]
    fn test_sorted_by_risk_then_score() {
        let file: BatchFile = serde_saphyr::from_str(SAMPLE).unwrap();
        let outcome = score_batch(file).unwrap();
        let labels: Vec<&str> = outcome.scored.iter().map(|(r, _)| r.label()).collect();
        // Both saturate at >30%; 23 points outranks 22
        assert_eq!(labels, vec!["Steven Smith", "Shelley Smith", "John Doe"]);
        assert_eq!(outcome.scored[2].1.interpretation.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_mgdl_units_are_converted() {
        let yaml = r#"
units: mg/dL
patients:
  - { name: John, gender: Male, age: 39, hdl: 54, total_cholesterol: 155, systolic_bp: 120 }
"#;
        let file: BatchFile = serde_saphyr::from_str(yaml).unwrap();
        let outcome = score_batch(file).unwrap();
        let (record, result) = &outcome.scored[0];
        assert_eq!(record.hdl(), 1.4);
        assert_eq!(result.score(), 1);
    }

    #[test]
    fn test_unlabeled_row_uses_position() {
        let yaml = r#"
patients:
  - { gender: Female, age: 1, hdl: 1.4, total_cholesterol: 4.0, systolic_bp: 120 }
"#;
        let file: BatchFile = serde_saphyr::from_str(yaml).unwrap();
        let outcome = score_batch(file).unwrap();
        assert!(outcome.scored.is_empty());
        assert_eq!(outcome.rejected[0].label, "row 1");
        assert_eq!(outcome.rejected[0].error, PatientError::InvalidAge(1));
    }

    #[test]
    fn test_load_batch_file_from_disk() {
        let path = env::temp_dir().join(format!("framingham-batch-{}.yaml", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();
        let file = load_batch_file(&path).unwrap();
        assert_eq!(file.patients.len(), 4);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_batch_file() {
        let path = env::temp_dir().join("framingham-batch-missing.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_batch_file(&path).is_err());
    }
}
