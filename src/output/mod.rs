pub mod formatter;

pub use formatter::{
    format_batch_table, format_heart_age, format_heart_age_short, format_patient_detail,
    format_risk_percent, format_risk_short, format_summary, format_trace, format_tsv,
    should_use_colors, ScoredPatient,
};
