//! Framingham point tables.
//!
//! Every range table is a list of lower bounds sorted ascending. A value falls
//! in the last bracket whose lower bound is `<=` the value, so brackets are
//! disjoint half-open intervals and the top bracket is unbounded.

use crate::patient::Gender;

use super::error::ScoringError;
use super::factors::Factor;
use super::interpret::TenYearRisk;

/// Points awarded to (male, female) patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderPoints {
    pub male: i32,
    pub female: i32,
}

impl GenderPoints {
    pub const fn new(male: i32, female: i32) -> Self {
        Self { male, female }
    }

    pub fn for_gender(self, gender: Gender) -> i32 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

const fn gp(male: i32, female: i32) -> GenderPoints {
    GenderPoints::new(male, female)
}

#[derive(Debug)]
pub struct RangeTable<K: 'static, V: 'static> {
    pub factor: Factor,
    pub brackets: &'static [(K, V)],
}

impl<K, V> RangeTable<K, V>
where
    K: PartialOrd + Copy + Into<f64>,
    V: Copy,
{
    /// Find the bracket containing `value`.
    pub fn classify(&self, value: K) -> Result<V, ScoringError> {
        let idx = self.brackets.partition_point(|(lower, _)| *lower <= value);
        if idx == 0 {
            return Err(ScoringError::Unclassified {
                factor: self.factor,
                value: value.into(),
            });
        }
        Ok(self.brackets[idx - 1].1)
    }
}

/// Years: 0-34, 35-39, ..., 70-74, 75+
pub const AGE_TABLE: RangeTable<u32, GenderPoints> = RangeTable {
    factor: Factor::Age,
    brackets: &[
        (0, gp(0, 0)),
        (35, gp(2, 2)),
        (40, gp(5, 4)),
        (45, gp(7, 5)),
        (50, gp(8, 7)),
        (55, gp(10, 8)),
        (60, gp(11, 9)),
        (65, gp(12, 10)),
        (70, gp(14, 11)),
        (75, gp(15, 12)),
    ],
};

/// mmol/L, same for both genders
pub const HDL_TABLE: RangeTable<f64, i32> = RangeTable {
    factor: Factor::Hdl,
    brackets: &[(0.0, 2), (0.9, 1), (1.2, 0), (1.3, -1), (1.6, -2)],
};

/// mmol/L
pub const TOTAL_CHOLESTEROL_TABLE: RangeTable<f64, GenderPoints> = RangeTable {
    factor: Factor::TotalCholesterol,
    brackets: &[
        (0.0, gp(0, 0)),
        (4.1, gp(1, 1)),
        (5.2, gp(2, 3)),
        (6.2, gp(3, 4)),
        (7.21, gp(4, 5)),
    ],
};

/// Systolic mmHg, not on antihypertensive therapy
pub const BP_UNTREATED_TABLE: RangeTable<u32, GenderPoints> = RangeTable {
    factor: Factor::BloodPressure,
    brackets: &[
        (0, gp(-2, -3)),
        (120, gp(0, 0)),
        (130, gp(1, 1)),
        (140, gp(2, 2)),
        (150, gp(2, 4)),
        (160, gp(3, 5)),
    ],
};

/// Systolic mmHg, on antihypertensive therapy
pub const BP_TREATED_TABLE: RangeTable<u32, GenderPoints> = RangeTable {
    factor: Factor::BloodPressure,
    brackets: &[
        (0, gp(0, -1)),
        (120, gp(2, 2)),
        (130, gp(3, 3)),
        (140, gp(4, 5)),
        (150, gp(4, 6)),
        (160, gp(5, 7)),
    ],
};

pub const SMOKER_POINTS: GenderPoints = gp(4, 3);

/// Scores at or below this map to "under 1%".
pub const RISK_FLOOR_SCORE: i32 = -3;
/// Scores at or above this map to "over 30%".
pub const RISK_CEILING_SCORE: i32 = 21;

const fn pct(value: f64) -> TenYearRisk {
    TenYearRisk::Percent(value)
}

const UNDER: TenYearRisk = TenYearRisk::BelowOnePercent;
const OVER: TenYearRisk = TenYearRisk::AboveThirtyPercent;

/// Ten-year risk by total score: (score, male, female).
pub const RISK_TABLE: [(i32, TenYearRisk, TenYearRisk); 23] = [
    (-2, pct(1.1), UNDER),
    (-1, pct(1.4), pct(1.0)),
    (0, pct(1.6), pct(1.2)),
    (1, pct(1.9), pct(1.5)),
    (2, pct(2.3), pct(1.7)),
    (3, pct(2.8), pct(2.0)),
    (4, pct(3.3), pct(2.4)),
    (5, pct(3.9), pct(2.8)),
    (6, pct(4.7), pct(3.3)),
    (7, pct(5.6), pct(3.9)),
    (8, pct(6.7), pct(4.5)),
    (9, pct(7.9), pct(5.3)),
    (10, pct(9.4), pct(6.3)),
    (11, pct(11.2), pct(7.3)),
    (12, pct(13.3), pct(8.6)),
    (13, pct(15.6), pct(10.0)),
    (14, pct(18.4), pct(11.7)),
    (15, pct(21.6), pct(13.7)),
    (16, pct(25.3), pct(15.9)),
    (17, pct(29.4), pct(18.51)),
    (18, OVER, pct(21.5)),
    (19, OVER, pct(24.8)),
    (20, OVER, pct(27.5)),
];

/// Heart age in years for scores 1..=14: (score, male, female).
pub const HEART_AGE_TABLE: [(i32, u32, u32); 14] = [
    (1, 32, 31),
    (2, 34, 34),
    (3, 36, 36),
    (4, 38, 39),
    (5, 40, 42),
    (6, 42, 45),
    (7, 45, 48),
    (8, 48, 51),
    (9, 51, 55),
    (10, 54, 59),
    (11, 57, 64),
    (12, 60, 68),
    (13, 64, 73),
    (14, 68, 79),
];

/// Male heart age outside the shared table.
pub const MALE_HEART_AGE_AT_ZERO: u32 = 30;
pub const MALE_HEART_AGE_AT_15: u32 = 72;
pub const MALE_HEART_AGE_AT_16: u32 = 79;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted<K: PartialOrd + Copy, V>(brackets: &[(K, V)]) {
        for pair in brackets.windows(2) {
            assert!(pair[0].0 < pair[1].0, "lower bounds must be strictly ascending");
        }
    }

    #[test]
    fn test_tables_are_sorted() {
        assert_sorted(AGE_TABLE.brackets);
        assert_sorted(HDL_TABLE.brackets);
        assert_sorted(TOTAL_CHOLESTEROL_TABLE.brackets);
        assert_sorted(BP_UNTREATED_TABLE.brackets);
        assert_sorted(BP_TREATED_TABLE.brackets);
    }

    #[test]
    fn test_age_bracket_edges() {
        assert_eq!(AGE_TABLE.classify(34).unwrap(), gp(0, 0));
        assert_eq!(AGE_TABLE.classify(35).unwrap(), gp(2, 2));
        assert_eq!(AGE_TABLE.classify(39).unwrap(), gp(2, 2));
        assert_eq!(AGE_TABLE.classify(40).unwrap(), gp(5, 4));
        assert_eq!(AGE_TABLE.classify(74).unwrap(), gp(14, 11));
        assert_eq!(AGE_TABLE.classify(75).unwrap(), gp(15, 12));
        assert_eq!(AGE_TABLE.classify(999).unwrap(), gp(15, 12));
    }

    #[test]
    fn test_hdl_bracket_edges() {
        assert_eq!(HDL_TABLE.classify(0.0).unwrap(), 2);
        assert_eq!(HDL_TABLE.classify(0.89).unwrap(), 2);
        assert_eq!(HDL_TABLE.classify(0.9).unwrap(), 1);
        assert_eq!(HDL_TABLE.classify(1.19).unwrap(), 1);
        assert_eq!(HDL_TABLE.classify(1.2).unwrap(), 0);
        assert_eq!(HDL_TABLE.classify(1.29).unwrap(), 0);
        assert_eq!(HDL_TABLE.classify(1.3).unwrap(), -1);
        assert_eq!(HDL_TABLE.classify(1.59).unwrap(), -1);
        assert_eq!(HDL_TABLE.classify(1.6).unwrap(), -2);
        assert_eq!(HDL_TABLE.classify(3.5).unwrap(), -2);
    }

    #[test]
    fn test_hdl_values_between_published_edges() {
        // Values the inclusive reference ranges left uncovered
        assert_eq!(HDL_TABLE.classify(1.595).unwrap(), -1);
        assert_eq!(HDL_TABLE.classify(1.295).unwrap(), 0);
    }

    #[test]
    fn test_cholesterol_bracket_edges() {
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(4.09).unwrap(), gp(0, 0));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(4.1).unwrap(), gp(1, 1));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(5.19).unwrap(), gp(1, 1));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(5.2).unwrap(), gp(2, 3));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(6.2).unwrap(), gp(3, 4));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(7.2).unwrap(), gp(3, 4));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(7.205).unwrap(), gp(3, 4));
        assert_eq!(TOTAL_CHOLESTEROL_TABLE.classify(7.21).unwrap(), gp(4, 5));
    }

    #[test]
    fn test_bp_bracket_edges() {
        assert_eq!(BP_UNTREATED_TABLE.classify(119).unwrap(), gp(-2, -3));
        assert_eq!(BP_UNTREATED_TABLE.classify(120).unwrap(), gp(0, 0));
        assert_eq!(BP_UNTREATED_TABLE.classify(159).unwrap(), gp(2, 4));
        assert_eq!(BP_UNTREATED_TABLE.classify(160).unwrap(), gp(3, 5));
        assert_eq!(BP_TREATED_TABLE.classify(60).unwrap(), gp(0, -1));
        assert_eq!(BP_TREATED_TABLE.classify(149).unwrap(), gp(4, 5));
        assert_eq!(BP_TREATED_TABLE.classify(250).unwrap(), gp(5, 7));
    }

    #[test]
    fn test_value_below_first_bracket_is_unclassified() {
        let err = HDL_TABLE.classify(-0.5).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Unclassified {
                factor: Factor::Hdl,
                value: -0.5
            }
        );
    }

    #[test]
    fn test_nan_is_unclassified() {
        assert!(HDL_TABLE.classify(f64::NAN).is_err());
    }

    #[test]
    fn test_risk_table_covers_every_score() {
        let scores: Vec<i32> = RISK_TABLE.iter().map(|(s, _, _)| *s).collect();
        let expected: Vec<i32> = (RISK_FLOOR_SCORE + 1..RISK_CEILING_SCORE).collect();
        assert_eq!(scores, expected);
    }

    #[test]
    fn test_heart_age_table_covers_one_to_fourteen() {
        let scores: Vec<i32> = HEART_AGE_TABLE.iter().map(|(s, _, _)| *s).collect();
        assert_eq!(scores, (1..=14).collect::<Vec<_>>());
    }
}
