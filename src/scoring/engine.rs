use serde::Serialize;

use crate::patient::PatientRecord;

use super::error::ScoringError;
use super::factors::Factor;
use super::interpret::{interpret, Interpretation, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub points: i32,
}

/// The five sub-scores, each computed exactly once, in `Factor::ORDER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

impl ScoreBreakdown {
    /// Sum of all sub-scores. May be negative.
    pub fn total(&self) -> i32 {
        self.factors.iter().map(|c| c.points).sum()
    }

    pub fn points_for(&self, factor: Factor) -> Option<i32> {
        self.factors
            .iter()
            .find(|c| c.factor == factor)
            .map(|c| c.points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub breakdown: ScoreBreakdown,
    pub interpretation: Interpretation,
}

impl ScoreResult {
    pub fn score(&self) -> i32 {
        self.interpretation.score
    }

    pub fn as_tuple(&self) -> (f64, u32, RiskLevel) {
        self.interpretation.as_tuple()
    }
}

/// Compute every sub-score once, in the fixed factor order.
pub fn calculate_points(record: &PatientRecord) -> Result<ScoreBreakdown, ScoringError> {
    let factors = Factor::ORDER
        .iter()
        .map(|&factor| {
            Ok(FactorContribution {
                factor,
                points: factor.points(record)?,
            })
        })
        .collect::<Result<Vec<_>, ScoringError>>()?;

    Ok(ScoreBreakdown { factors })
}

/// Score a validated record end to end. Either the full result is returned or
/// nothing is.
pub fn calculate_score(record: &PatientRecord) -> Result<ScoreResult, ScoringError> {
    let breakdown = calculate_points(record)?;
    let interpretation = interpret(breakdown.total(), record.gender())?;
    Ok(ScoreResult {
        breakdown,
        interpretation,
    })
}
