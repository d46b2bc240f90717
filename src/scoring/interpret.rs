use serde::Serialize;
use std::fmt;

use crate::patient::Gender;

use super::error::ScoringError;
use super::tables::{
    HEART_AGE_TABLE, MALE_HEART_AGE_AT_15, MALE_HEART_AGE_AT_16, MALE_HEART_AGE_AT_ZERO,
    RISK_CEILING_SCORE, RISK_FLOOR_SCORE, RISK_TABLE,
};

/// Estimated 10-year cardiovascular risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum TenYearRisk {
    /// Under 1%
    BelowOnePercent,
    Percent(f64),
    /// Over 30%
    AboveThirtyPercent,
}

impl TenYearRisk {
    /// Numeric percentage, with 0.0 and 100.0 standing in for the two sentinels.
    pub fn as_percent(self) -> f64 {
        match self {
            TenYearRisk::BelowOnePercent => 0.0,
            TenYearRisk::Percent(p) => p,
            TenYearRisk::AboveThirtyPercent => 100.0,
        }
    }
}

/// Estimated vascular age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "years", rename_all = "snake_case")]
pub enum HeartAge {
    YoungerThan30,
    Years(u32),
    OlderThan80,
}

impl HeartAge {
    /// Numeric age, with 0 and 100 standing in for the two sentinels.
    pub fn as_years(self) -> u32 {
        match self {
            HeartAge::YoungerThan30 => 0,
            HeartAge::Years(y) => y,
            HeartAge::OlderThan80 => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Intermediate,
    High,
}

impl RiskLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 10.0 {
            RiskLevel::Low
        } else if percent < 20.0 {
            RiskLevel::Intermediate
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Intermediate => write!(f, "Intermediate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpretation {
    pub score: i32,
    pub ten_year_risk: TenYearRisk,
    pub heart_age: HeartAge,
    pub risk_level: RiskLevel,
}

impl Interpretation {
    /// `(ten_year_risk_percent, heart_age, risk_level)` with numeric sentinels.
    pub fn as_tuple(&self) -> (f64, u32, RiskLevel) {
        (
            self.ten_year_risk.as_percent(),
            self.heart_age.as_years(),
            self.risk_level,
        )
    }
}

/// Interpret a total point score. Pure: the same score and gender always give
/// the same result.
pub fn interpret(score: i32, gender: Gender) -> Result<Interpretation, ScoringError> {
    let ten_year_risk = ten_year_risk(score, gender)?;
    let heart_age = heart_age(score, gender)?;
    Ok(Interpretation {
        score,
        ten_year_risk,
        heart_age,
        risk_level: RiskLevel::from_percent(ten_year_risk.as_percent()),
    })
}

pub fn ten_year_risk(score: i32, gender: Gender) -> Result<TenYearRisk, ScoringError> {
    if score <= RISK_FLOOR_SCORE {
        return Ok(TenYearRisk::BelowOnePercent);
    }
    if score >= RISK_CEILING_SCORE {
        return Ok(TenYearRisk::AboveThirtyPercent);
    }

    RISK_TABLE
        .iter()
        .find(|(s, _, _)| *s == score)
        .map(|(_, male, female)| match gender {
            Gender::Male => *male,
            Gender::Female => *female,
        })
        .ok_or(ScoringError::UnmappedScore { score, gender })
}

pub fn heart_age(score: i32, gender: Gender) -> Result<HeartAge, ScoringError> {
    match gender {
        Gender::Male => match score {
            s if s < 0 => Ok(HeartAge::YoungerThan30),
            0 => Ok(HeartAge::Years(MALE_HEART_AGE_AT_ZERO)),
            15 => Ok(HeartAge::Years(MALE_HEART_AGE_AT_15)),
            16 => Ok(HeartAge::Years(MALE_HEART_AGE_AT_16)),
            s if s >= 17 => Ok(HeartAge::OlderThan80),
            s => heart_age_from_table(s, gender),
        },
        Gender::Female => match score {
            s if s < 1 => Ok(HeartAge::YoungerThan30),
            s if s >= 15 => Ok(HeartAge::OlderThan80),
            s => heart_age_from_table(s, gender),
        },
    }
}

fn heart_age_from_table(score: i32, gender: Gender) -> Result<HeartAge, ScoringError> {
    HEART_AGE_TABLE
        .iter()
        .find(|(s, _, _)| *s == score)
        .map(|(_, male, female)| match gender {
            Gender::Male => HeartAge::Years(*male),
            Gender::Female => HeartAge::Years(*female),
        })
        .ok_or(ScoringError::UnmappedHeartAge { score, gender })
}
