use crate::patient::Gender;

use super::factors::Factor;

/// Internal consistency failures. With a validated record and the built-in
/// tables none of these can occur; they surface only through a table bug.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("no {factor} bracket contains value {value}")]
    Unclassified { factor: Factor, value: f64 },

    #[error("no risk percentage for score {score} ({gender})")]
    UnmappedScore { score: i32, gender: Gender },

    #[error("no heart age for score {score} ({gender})")]
    UnmappedHeartAge { score: i32, gender: Gender },
}
