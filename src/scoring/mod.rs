pub mod engine;
pub mod error;
pub mod factors;
pub mod interpret;
pub mod tables;

pub use engine::{calculate_points, calculate_score, FactorContribution, ScoreBreakdown, ScoreResult};
pub use error::ScoringError;
pub use factors::{
    age_points, blood_pressure_points, hdl_points, smoking_points, total_cholesterol_points, Factor,
};
pub use interpret::{interpret, HeartAge, Interpretation, RiskLevel, TenYearRisk};
