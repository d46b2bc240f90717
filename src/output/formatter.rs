use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::patient::PatientRecord;
use crate::scoring::{HeartAge, RiskLevel, ScoreResult, TenYearRisk};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Always at least one decimal place: 10.0%, 1.9%, 18.51%
fn format_percent(p: f64) -> String {
    format!("{:?}%", p)
}

/// Long form used by the verbose trace
pub fn format_risk_percent(risk: TenYearRisk) -> String {
    match risk {
        TenYearRisk::BelowOnePercent => "Less than 1%".to_string(),
        TenYearRisk::Percent(p) => format_percent(p),
        TenYearRisk::AboveThirtyPercent => "Greater than 30%".to_string(),
    }
}

/// Long form used by the verbose trace
pub fn format_heart_age(age: HeartAge) -> String {
    match age {
        HeartAge::YoungerThan30 => "Younger than 30 years old".to_string(),
        HeartAge::Years(y) => format!("{} years old", y),
        HeartAge::OlderThan80 => "Older than 80 years old".to_string(),
    }
}

/// Compact form for tables: "<1%", "1.9%", ">30%"
pub fn format_risk_short(risk: TenYearRisk) -> String {
    match risk {
        TenYearRisk::BelowOnePercent => "<1%".to_string(),
        TenYearRisk::Percent(p) => format_percent(p),
        TenYearRisk::AboveThirtyPercent => ">30%".to_string(),
    }
}

/// Compact form for tables: "<30", "32", ">80"
pub fn format_heart_age_short(age: HeartAge) -> String {
    match age {
        HeartAge::YoungerThan30 => "<30".to_string(),
        HeartAge::Years(y) => y.to_string(),
        HeartAge::OlderThan80 => ">80".to_string(),
    }
}

/// Patient attributes as scored, one per line (for verbose mode)
pub fn format_patient_detail(record: &PatientRecord) -> String {
    format!(
        "Patient Name: {}\nPatient ID: {}\nGender: {}\nAge: {} years\nHDL-C: {} mmol/L\nTotal Chol: {} mmol/L\nSystolic BP: {}\nIn HBP treatment: {}\nSmoker: {}",
        record.name().unwrap_or("-"),
        record.id().unwrap_or("-"),
        record.gender(),
        record.age(),
        record.hdl(),
        record.total_cholesterol(),
        record.systolic_bp(),
        record.hbp_treatment(),
        record.smoker()
    )
}

/// Per-factor points, the total, then the interpretation, one item per line.
pub fn format_trace(result: &ScoreResult) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .factors
        .iter()
        .map(|c| format!("{} Risk Points: {}", c.factor.label(), c.points))
        .collect();

    let interpretation = &result.interpretation;
    lines.push(format!("Total Risk Points: {}", result.breakdown.total()));
    lines.push(format!(
        "Risk Percentage: {}",
        format_risk_percent(interpretation.ten_year_risk)
    ));
    lines.push(format!(
        "Heart Age: {}",
        format_heart_age(interpretation.heart_age)
    ));
    lines.push(format!("Risk Level: {}", interpretation.risk_level));

    lines.join("\n")
}

fn paint_level(text: &str, level: RiskLevel, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match level {
        RiskLevel::Low => text.green().bold().to_string(),
        RiskLevel::Intermediate => text.yellow().bold().to_string(),
        RiskLevel::High => text.red().bold().to_string(),
    }
}

/// Multi-line result summary for a single patient
pub fn format_summary(record: &PatientRecord, result: &ScoreResult, use_colors: bool) -> String {
    let i = &result.interpretation;
    let header = format!("{} ({}, {})", record.label(), record.gender(), record.age());
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    format!(
        "{}\n  Ten-year risk: {}\n  Heart age:     {} years\n  Risk level:    {}",
        header,
        paint_level(&format_risk_short(i.ten_year_risk), i.risk_level, use_colors),
        format_heart_age_short(i.heart_age),
        paint_level(&i.risk_level.to_string(), i.risk_level, use_colors),
    )
}

/// A patient with its calculated result for display
pub struct ScoredPatient<'a> {
    pub record: &'a PatientRecord,
    pub result: &'a ScoreResult,
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format patients as a table with columns: Index, Risk, Heart age, Level, Score, Label.
/// No headers. Rows are rendered in the order given.
pub fn format_batch_table(patients: &[ScoredPatient], use_colors: bool) -> String {
    if patients.is_empty() {
        return "No patients scored.".to_string();
    }

    let term_width = get_terminal_width();

    // " 1." + risk(5) + heart(4) + level(12) + score(4), separated by two spaces
    let fixed_width = 3 + 1 + 5 + 2 + 4 + 2 + 12 + 2 + 4 + 2;

    patients
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let i = &scored.result.interpretation;
            let index_str = format!("{:>2}.", idx + 1);
            let risk = format!("{:>5}", format_risk_short(i.ten_year_risk));
            let heart = format!("{:>4}", format_heart_age_short(i.heart_age));
            let level = format!("{:<12}", i.risk_level.to_string());
            let score = format!("{:>4}", i.score);

            let label = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_label(scored.record.label(), width - fixed_width)
                }
                Some(_) => truncate_label(scored.record.label(), 20),
                None => scored.record.label().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str.dimmed(),
                    paint_level(&risk, i.risk_level, true),
                    heart,
                    paint_level(&level, i.risk_level, true),
                    score.dimmed(),
                    label
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str, risk, heart, level, score, label
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format patients as tab-separated values for scripting.
/// Columns: score, risk percent, heart age, risk level, label (numeric sentinels, no colors)
pub fn format_tsv(patients: &[ScoredPatient]) -> String {
    patients
        .iter()
        .map(|scored| {
            let (percent, heart_age, level) = scored.result.as_tuple();
            format!(
                "{}\t{:?}\t{}\t{}\t{}",
                scored.result.score(),
                percent,
                heart_age,
                level,
                scored.record.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
