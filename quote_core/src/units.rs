//! # Unit Types
//!
//! Length units accepted from the order form and the newtypes the pricing
//! pipeline works in. Every length is normalized to inches before any
//! geometric formula runs; areas are carried in square feet.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{to_base_unit, LengthUnit, SqFt, SqIn};
//!
//! let height = to_base_unit(25.4, LengthUnit::Centimeters);
//! assert!((height.value() - 10.0).abs() < 1e-12);
//!
//! let area: SqFt = SqIn(288.0).into();
//! assert_eq!(area.value(), 2.0);
//! ```

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::QuoteError;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Square inches per square foot (12 x 12)
pub const SQ_IN_PER_SQ_FT: f64 = 144.0;

// ============================================================================
// Input Units
// ============================================================================

/// Unit of measure the dimensions were entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "inch")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "mm")]
    Millimeters,
}

impl LengthUnit {
    /// Short label used on quotations ("inch", "cm", "mm")
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Inches => "inch",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
        }
    }

    /// Divisor that converts a value in this unit to inches
    pub fn per_inch(&self) -> f64 {
        match self {
            LengthUnit::Inches => 1.0,
            LengthUnit::Centimeters => CM_PER_INCH,
            LengthUnit::Millimeters => MM_PER_INCH,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inch" | "inches" | "in" | "\"" => Ok(LengthUnit::Inches),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeters),
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeters),
            other => Err(QuoteError::invalid_input(
                "unit",
                other,
                "Expected one of: inch, cm, mm",
            )),
        }
    }
}

/// Convert a user-entered length to inches.
///
/// Blank-equivalent input (zero, NaN, infinity) maps to 0 rather than
/// propagating through the pipeline. Negative values pass through; the
/// geometry guard treats them as missing.
pub fn to_base_unit(value: f64, unit: LengthUnit) -> Inches {
    if !value.is_finite() || value == 0.0 {
        return Inches(0.0);
    }
    Inches(value / unit.per_inch())
}

// ============================================================================
// Length and Area
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl From<SqIn> for SqFt {
    fn from(sqin: SqIn) -> Self {
        SqFt(sqin.0 / SQ_IN_PER_SQ_FT)
    }
}

impl Add for Inches {
    type Output = Inches;
    fn add(self, rhs: Inches) -> Inches {
        Inches(self.0 + rhs.0)
    }
}

impl Mul<f64> for Inches {
    type Output = Inches;
    fn mul(self, rhs: f64) -> Inches {
        Inches(self.0 * rhs)
    }
}

impl Mul for Inches {
    type Output = SqIn;
    fn mul(self, rhs: Inches) -> SqIn {
        SqIn(self.0 * rhs.0)
    }
}

impl Inches {
    /// Length as a plain number
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the length can take part in an area formula
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl SqFt {
    /// Area as a plain number
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// Form Fields
// ============================================================================

/// A numeric field as it may arrive from an order form.
#[derive(Deserialize)]
#[serde(untagged)]
enum FormNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Read a numeric form field leniently.
///
/// Numbers pass through and numeric text is parsed. `null`, blank text and
/// anything else read as `None`, so callers can substitute their default.
pub fn deserialize_form_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FormNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(FormNumber::Number(n)) => Some(n),
        Some(FormNumber::Text(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(FormNumber::Other(value)) => value.as_f64(),
        None => None,
    })
}

/// A length field; blank or non-numeric input reads as 0.
pub fn deserialize_form_length<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_form_number(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_inches() {
        let inches = to_base_unit(254.0, LengthUnit::Centimeters);
        assert!((inches.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mm_to_inches() {
        let inches = to_base_unit(609.6, LengthUnit::Millimeters);
        assert!((inches.0 - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_inch_identity() {
        assert_eq!(to_base_unit(18.0, LengthUnit::Inches), Inches(18.0));
    }

    #[test]
    fn test_blank_inputs_map_to_zero() {
        assert_eq!(to_base_unit(0.0, LengthUnit::Centimeters), Inches(0.0));
        assert_eq!(to_base_unit(f64::NAN, LengthUnit::Millimeters), Inches(0.0));
        assert_eq!(to_base_unit(f64::INFINITY, LengthUnit::Inches), Inches(0.0));
    }

    #[test]
    fn test_area_conversion() {
        let area = Inches(24.0) * Inches(24.0);
        let sqft: SqFt = area.into();
        assert_eq!(sqft.0, 4.0);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeters);
        assert_eq!(" inch ".parse::<LengthUnit>().unwrap(), LengthUnit::Inches);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_form_lengths() {
        #[derive(Deserialize)]
        struct Field {
            #[serde(default, deserialize_with = "deserialize_form_length")]
            value: f64,
        }
        let read = |json: &str| serde_json::from_str::<Field>(json).unwrap().value;

        assert_eq!(read(r#"{"value":24.5}"#), 24.5);
        assert_eq!(read(r#"{"value":" 18 "}"#), 18.0);
        assert_eq!(read(r#"{"value":null}"#), 0.0);
        assert_eq!(read(r#"{"value":""}"#), 0.0);
        assert_eq!(read(r#"{"value":"abc"}"#), 0.0);
        assert_eq!(read(r#"{"value":true}"#), 0.0);
        assert_eq!(read(r#"{}"#), 0.0);
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(&LengthUnit::Millimeters).unwrap();
        assert_eq!(json, "\"mm\"");
        let roundtrip: LengthUnit = serde_json::from_str("\"inch\"").unwrap();
        assert_eq!(roundtrip, LengthUnit::Inches);
    }
}
