use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::units::CholesterolUnit;

pub const MIN_AGE_EXCLUSIVE: i64 = 1;
pub const MAX_AGE: i64 = 999;
pub const MIN_SYSTOLIC_BP: i64 = 60;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatientError {
    #[error("invalid gender '{0}': must be exactly 'Male' or 'Female'")]
    InvalidGender(String),

    #[error("invalid age {0}: must be greater than 1 and at most 999")]
    InvalidAge(i64),

    #[error("invalid HDL-C {0} mmol/L: must be a finite value >= 0")]
    InvalidHdl(f64),

    #[error("invalid total cholesterol {0} mmol/L: must be a finite value >= 0")]
    InvalidCholesterol(f64),

    #[error("invalid systolic blood pressure {0} mmHg: must be >= 60")]
    InvalidBloodPressure(i64),
}

impl PatientError {
    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            PatientError::InvalidGender(_) => "gender",
            PatientError::InvalidAge(_) => "age",
            PatientError::InvalidHdl(_) => "hdl",
            PatientError::InvalidCholesterol(_) => "total_cholesterol",
            PatientError::InvalidBloodPressure(_) => "systolic_bp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = PatientError;

    /// Case-sensitive: "male" is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(PatientError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Clinical inputs as collected, before validation.
///
/// Example YAML:
/// ```yaml
/// id: "pt-001"
/// name: "John Doe"
/// gender: Male
/// age: 39
/// hdl: 1.4
/// total_cholesterol: 4.0
/// systolic_bp: 120
/// hbp_treatment: false
/// smoker: false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatientInput {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    pub gender: String,

    pub age: i64,

    /// HDL cholesterol, in mmol/L unless converted with `into_mmol`
    pub hdl: f64,

    /// Total cholesterol, in mmol/L unless converted with `into_mmol`
    pub total_cholesterol: f64,

    /// Systolic blood pressure in mmHg
    pub systolic_bp: i64,

    /// On antihypertensive therapy
    #[serde(default)]
    pub hbp_treatment: bool,

    /// Current or former smoker
    #[serde(default)]
    pub smoker: bool,
}

impl PatientInput {
    /// Convert both cholesterol fields from `unit` to mmol/L.
    pub fn into_mmol(mut self, unit: CholesterolUnit) -> Self {
        self.hdl = unit.to_mmoll(self.hdl);
        self.total_cholesterol = unit.to_mmoll(self.total_cholesterol);
        self
    }
}

/// A validated patient. Every numeric field is within bounds, so scoring
/// never re-checks it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    id: Option<String>,
    name: Option<String>,
    gender: Gender,
    age: u32,
    hdl: f64,
    total_cholesterol: f64,
    systolic_bp: u32,
    hbp_treatment: bool,
    smoker: bool,
}

impl PatientRecord {
    /// Validate `input` and build a record. The first failing field, checked in
    /// declaration order, is reported. HDL is rounded to 2 decimal places.
    pub fn new(input: PatientInput) -> Result<Self, PatientError> {
        let gender: Gender = input.gender.parse()?;

        if input.age <= MIN_AGE_EXCLUSIVE || input.age > MAX_AGE {
            return Err(PatientError::InvalidAge(input.age));
        }

        if !input.hdl.is_finite() || input.hdl < 0.0 {
            return Err(PatientError::InvalidHdl(input.hdl));
        }

        if !input.total_cholesterol.is_finite() || input.total_cholesterol < 0.0 {
            return Err(PatientError::InvalidCholesterol(input.total_cholesterol));
        }

        if input.systolic_bp < MIN_SYSTOLIC_BP {
            return Err(PatientError::InvalidBloodPressure(input.systolic_bp));
        }
        let systolic_bp = u32::try_from(input.systolic_bp)
            .map_err(|_| PatientError::InvalidBloodPressure(input.systolic_bp))?;

        Ok(Self {
            id: input.id,
            name: input.name,
            gender,
            // Bounded to (1, 999] above
            age: input.age as u32,
            hdl: round_to_hundredths(input.hdl).ok_or(PatientError::InvalidHdl(input.hdl))?,
            total_cholesterol: input.total_cholesterol,
            systolic_bp,
            hbp_treatment: input.hbp_treatment,
            smoker: input.smoker,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// HDL-C in mmol/L, rounded to 2 decimal places
    pub fn hdl(&self) -> f64 {
        self.hdl
    }

    /// Total cholesterol in mmol/L
    pub fn total_cholesterol(&self) -> f64 {
        self.total_cholesterol
    }

    pub fn systolic_bp(&self) -> u32 {
        self.systolic_bp
    }

    pub fn hbp_treatment(&self) -> bool {
        self.hbp_treatment
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }

    /// Short label for tables: name, then id, then a placeholder.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }
}

impl TryFrom<PatientInput> for PatientRecord {
    type Error = PatientError;

    fn try_from(input: PatientInput) -> Result<Self, Self::Error> {
        PatientRecord::new(input)
    }
}

/// Round from the exact decimal expansion of `value`. Scaling by 100 first
/// would round 1.295 (stored as 1.29499...) up to 1.3.
fn round_to_hundredths(value: f64) -> Option<f64> {
    format!("{:.2}", value).parse().ok()
}
