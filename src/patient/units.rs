use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier from mg/dL to mmol/L used for both HDL and total cholesterol.
pub const MGDL_TO_MMOLL: f64 = 0.0259;

/// Convert a cholesterol value in mg/dL to mmol/L.
///
/// No validation happens here; a negative input converts to a negative output
/// and is rejected later when the record is built.
pub fn mgdl_to_mmoll(value: f64) -> f64 {
    value * MGDL_TO_MMOLL
}

/// Unit that cholesterol inputs arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum CholesterolUnit {
    #[default]
    #[serde(rename = "mmol/L", alias = "mmol")]
    MmolPerLitre,
    #[serde(rename = "mg/dL", alias = "mgdl")]
    MgPerDecilitre,
}

impl CholesterolUnit {
    /// Express `value` (given in this unit) in mmol/L.
    pub fn to_mmoll(self, value: f64) -> f64 {
        match self {
            CholesterolUnit::MmolPerLitre => value,
            CholesterolUnit::MgPerDecilitre => mgdl_to_mmoll(value),
        }
    }
}

impl fmt::Display for CholesterolUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CholesterolUnit::MmolPerLitre => write!(f, "mmol/L"),
            CholesterolUnit::MgPerDecilitre => write!(f, "mg/dL"),
        }
    }
}

impl FromStr for CholesterolUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mmol/l" | "mmol" => Ok(CholesterolUnit::MmolPerLitre),
            "mg/dl" | "mgdl" => Ok(CholesterolUnit::MgPerDecilitre),
            other => Err(format!("unknown cholesterol unit '{}' (expected mmol/L or mg/dL)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mgdl_to_mmoll_known_value() {
        assert!((mgdl_to_mmoll(60.0) - 1.554).abs() < 1e-9);
        assert!((mgdl_to_mmoll(200.0) - 5.18).abs() < 1e-9);
    }

    #[test]
    fn test_mgdl_to_mmoll_zero() {
        assert_eq!(mgdl_to_mmoll(0.0), 0.0);
    }

    #[test]
    fn test_unit_conversion_passthrough() {
        assert_eq!(CholesterolUnit::MmolPerLitre.to_mmoll(4.2), 4.2);
        assert!((CholesterolUnit::MgPerDecilitre.to_mmoll(60.0) - 1.554).abs() < 1e-9);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("mg/dL".parse::<CholesterolUnit>().unwrap(), CholesterolUnit::MgPerDecilitre);
        assert_eq!("MMOL/L".parse::<CholesterolUnit>().unwrap(), CholesterolUnit::MmolPerLitre);
        assert!("grams".parse::<CholesterolUnit>().is_err());
    }

    #[test]
    fn test_unit_yaml_names() {
        let unit: CholesterolUnit = serde_saphyr::from_str("\"mg/dL\"").unwrap();
        assert_eq!(unit, CholesterolUnit::MgPerDecilitre);
        let unit: CholesterolUnit = serde_saphyr::from_str("mmol/L").unwrap();
        assert_eq!(unit, CholesterolUnit::MmolPerLitre);
    }
}
