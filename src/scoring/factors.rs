use serde::Serialize;
use std::fmt;

use crate::patient::PatientRecord;

use super::error::ScoringError;
use super::tables::{
    AGE_TABLE, BP_TREATED_TABLE, BP_UNTREATED_TABLE, HDL_TABLE, SMOKER_POINTS,
    TOTAL_CHOLESTEROL_TABLE,
};

/// The five independent risk factors of the Framingham score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Age,
    BloodPressure,
    Hdl,
    TotalCholesterol,
    Smoking,
}

impl Factor {
    /// Fixed evaluation order, also the order of the verbose trace.
    pub const ORDER: [Factor; 5] = [
        Factor::Age,
        Factor::BloodPressure,
        Factor::Hdl,
        Factor::TotalCholesterol,
        Factor::Smoking,
    ];

    /// Label used in the verbose trace ("<label> Risk Points").
    pub fn label(self) -> &'static str {
        match self {
            Factor::Age => "Age",
            Factor::BloodPressure => "Systolic BP",
            Factor::Hdl => "HDL-C",
            Factor::TotalCholesterol => "Total Chol",
            Factor::Smoking => "Smoker",
        }
    }

    pub fn points(self, record: &PatientRecord) -> Result<i32, ScoringError> {
        match self {
            Factor::Age => age_points(record),
            Factor::BloodPressure => blood_pressure_points(record),
            Factor::Hdl => hdl_points(record),
            Factor::TotalCholesterol => total_cholesterol_points(record),
            Factor::Smoking => Ok(smoking_points(record)),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Age points; differ by gender.
pub fn age_points(record: &PatientRecord) -> Result<i32, ScoringError> {
    Ok(AGE_TABLE.classify(record.age())?.for_gender(record.gender()))
}

/// HDL-C points (mmol/L); same for both genders.
pub fn hdl_points(record: &PatientRecord) -> Result<i32, ScoringError> {
    HDL_TABLE.classify(record.hdl())
}

/// Total cholesterol points (mmol/L); differ by gender.
pub fn total_cholesterol_points(record: &PatientRecord) -> Result<i32, ScoringError> {
    Ok(TOTAL_CHOLESTEROL_TABLE
        .classify(record.total_cholesterol())?
        .for_gender(record.gender()))
}

/// Systolic BP points; differ by gender and by antihypertensive treatment.
pub fn blood_pressure_points(record: &PatientRecord) -> Result<i32, ScoringError> {
    let table = if record.hbp_treatment() {
        &BP_TREATED_TABLE
    } else {
        &BP_UNTREATED_TABLE
    };
    Ok(table.classify(record.systolic_bp())?.for_gender(record.gender()))
}

pub fn smoking_points(record: &PatientRecord) -> i32 {
    if record.smoker() {
        SMOKER_POINTS.for_gender(record.gender())
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientInput;

    fn record(gender: &str, age: i64, hdl: f64, chol: f64, bp: i64, treated: bool, smoker: bool) -> PatientRecord {
        PatientRecord::new(PatientInput {
            id: None,
            name: None,
            gender: gender.to_string(),
            age,
            hdl,
            total_cholesterol: chol,
            systolic_bp: bp,
            hbp_treatment: treated,
            smoker,
        })
        .unwrap()
    }

    #[test]
    fn test_young_ages_score_zero() {
        for age in 2..=34 {
            assert_eq!(age_points(&record("Male", age, 1.4, 4.0, 120, false, false)).unwrap(), 0);
            assert_eq!(age_points(&record("Female", age, 1.4, 4.0, 120, false, false)).unwrap(), 0);
        }
    }

    #[test]
    fn test_old_ages_score_top_bracket() {
        for age in [75, 80, 100, 999] {
            assert_eq!(age_points(&record("Male", age, 1.4, 4.0, 120, false, false)).unwrap(), 15);
            assert_eq!(age_points(&record("Female", age, 1.4, 4.0, 120, false, false)).unwrap(), 12);
        }
    }

    #[test]
    fn test_hdl_gender_independent() {
        let male = record("Male", 50, 1.0, 4.0, 120, false, false);
        let female = record("Female", 50, 1.0, 4.0, 120, false, false);
        assert_eq!(hdl_points(&male).unwrap(), 1);
        assert_eq!(hdl_points(&female).unwrap(), 1);
    }

    #[test]
    fn test_hdl_rounding_feeds_classification() {
        // 1.596 rounds to 1.6 at construction
        let r = record("Male", 50, 1.596, 4.0, 120, false, false);
        assert_eq!(hdl_points(&r).unwrap(), -2);
    }

    #[test]
    fn test_cholesterol_by_gender() {
        let male = record("Male", 50, 1.4, 5.5, 120, false, false);
        let female = record("Female", 50, 1.4, 5.5, 120, false, false);
        assert_eq!(total_cholesterol_points(&male).unwrap(), 2);
        assert_eq!(total_cholesterol_points(&female).unwrap(), 3);
    }

    #[test]
    fn test_blood_pressure_treated_vs_untreated() {
        let untreated = record("Female", 50, 1.4, 4.0, 155, false, false);
        let treated = record("Female", 50, 1.4, 4.0, 155, true, false);
        assert_eq!(blood_pressure_points(&untreated).unwrap(), 4);
        assert_eq!(blood_pressure_points(&treated).unwrap(), 6);
    }

    #[test]
    fn test_low_blood_pressure_is_negative() {
        let male = record("Male", 50, 1.4, 4.0, 60, false, false);
        let female = record("Female", 50, 1.4, 4.0, 60, false, false);
        assert_eq!(blood_pressure_points(&male).unwrap(), -2);
        assert_eq!(blood_pressure_points(&female).unwrap(), -3);
    }

    #[test]
    fn test_smoking_points() {
        assert_eq!(smoking_points(&record("Male", 50, 1.4, 4.0, 120, false, true)), 4);
        assert_eq!(smoking_points(&record("Female", 50, 1.4, 4.0, 120, false, true)), 3);
        assert_eq!(smoking_points(&record("Male", 50, 1.4, 4.0, 120, false, false)), 0);
    }

    #[test]
    fn test_factor_dispatch_matches_functions() {
        let r = record("Male", 59, 0.5, 7.2, 154, true, true);
        assert_eq!(Factor::Age.points(&r).unwrap(), age_points(&r).unwrap());
        assert_eq!(Factor::Smoking.points(&r).unwrap(), 4);
    }

    #[test]
    fn test_factor_labels() {
        let labels: Vec<&str> = Factor::ORDER.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["Age", "Systolic BP", "HDL-C", "Total Chol", "Smoker"]);
    }
}
