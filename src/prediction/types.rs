use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

use crate::patient::{CholesterolUnit, Gender, PatientError, PatientInput, PatientRecord};

use super::error::PredictionError;

/// Column order expected by the hosted model.
pub const COLUMNS: [&str; 6] = [
    "gender",
    "age",
    "smoking_status",
    "hdl",
    "total_cholesterol",
    "systolic_bp",
];

/// Raw clinical fields sent to the prediction service. Cholesterol values are
/// in mg/dL, exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub gender: Gender,
    pub age: i64,
    pub smoker: bool,
    pub hdl: f64,
    pub total_cholesterol: f64,
    pub systolic_bp: i64,
}

impl PredictionInput {
    /// Check the raw mg/dL inputs against the same bounds as a scored patient.
    /// The values sent stay as entered.
    pub fn from_patient_input(input: PatientInput) -> Result<Self, PatientError> {
        let record = PatientRecord::new(input.clone().into_mmol(CholesterolUnit::MgPerDecilitre))?;
        Ok(Self {
            gender: record.gender(),
            age: input.age,
            smoker: input.smoker,
            hdl: input.hdl,
            total_cholesterol: input.total_cholesterol,
            systolic_bp: input.systolic_bp,
        })
    }

    /// Build the `input_data` request body for a single row.
    pub fn to_request_body(&self) -> Value {
        let gender = match self.gender {
            Gender::Male => 1,
            Gender::Female => 0,
        };
        json!({
            "input_data": {
                "columns": COLUMNS,
                "index": [0],
                "data": [[
                    gender,
                    self.age,
                    u8::from(self.smoker),
                    self.hdl,
                    self.total_cholesterol,
                    self.systolic_bp,
                ]],
            }
        })
    }
}

/// Binary output of the hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Prediction {
    HighRisk,
    LowRisk,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::HighRisk => write!(f, "High"),
            Prediction::LowRisk => write!(f, "Low"),
        }
    }
}

impl Prediction {
    /// Interpret a response body. A non-empty array yields its first element.
    pub fn from_response(value: &Value) -> Result<Self, PredictionError> {
        let value = match value {
            Value::Array(items) => items
                .first()
                .ok_or_else(|| PredictionError::Malformed("empty prediction array".to_string()))?,
            other => other,
        };

        match value {
            Value::Bool(true) => Ok(Prediction::HighRisk),
            Value::Bool(false) => Ok(Prediction::LowRisk),
            Value::Number(n) => match n.as_f64() {
                Some(v) if v == 1.0 => Ok(Prediction::HighRisk),
                Some(v) if v == 0.0 => Ok(Prediction::LowRisk),
                _ => Err(PredictionError::Malformed(format!("unexpected prediction {}", n))),
            },
            Value::String(s) => match s.trim() {
                "1" => Ok(Prediction::HighRisk),
                "0" => Ok(Prediction::LowRisk),
                other => Err(PredictionError::Malformed(format!("unexpected prediction '{}'", other))),
            },
            other => Err(PredictionError::Malformed(format!("unexpected prediction {}", other))),
        }
    }
}
