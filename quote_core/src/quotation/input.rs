//! # Batch Quotation Input
//!
//! A JSON-serializable description of a whole quotation, and the pure
//! `calculate(input) -> QuoteSummary` entry point built on [`Quotation`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "client": { "customer_name": "Asha", "project_name": "Terrace" },
//!   "unit": "inch",
//!   "tax_percent": 18,
//!   "primary": {
//!     "dimensions": { "shape": "square", "length": 24, "width": 24, "height": 12 },
//!     "quantity": 1,
//!     "thickness": 1.5
//!   },
//!   "supplementary": []
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{ClientDetails, LineItem, QuoteSummary, Quotation};
use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::{FormulaPolicy, DEFAULT_TAX_PERCENT};
use crate::units::LengthUnit;

fn default_tax_percent() -> f64 {
    DEFAULT_TAX_PERCENT
}

/// Everything needed to price a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    #[serde(default)]
    pub client: ClientDetails,

    #[serde(default)]
    pub unit: LengthUnit,

    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,

    /// The main planter; its shape sets the quotation's shape
    pub primary: LineItem,

    #[serde(default)]
    pub supplementary: Vec<LineItem>,
}

impl QuoteInput {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the parts of the input the engine cannot degrade to zero.
    pub fn validate(&self) -> QuoteResult<()> {
        if !self.tax_percent.is_finite() || self.tax_percent < 0.0 {
            return Err(QuoteError::invalid_input(
                "tax_percent",
                self.tax_percent.to_string(),
                "GST percentage must be zero or positive",
            ));
        }
        Ok(())
    }

    /// Build an un-recalculated quotation from this input.
    pub fn to_quotation(&self, policy: FormulaPolicy) -> Quotation {
        let mut quote = Quotation::with_policy(self.primary.shape(), policy);
        quote.client = self.client.clone();
        quote.set_unit(self.unit);
        quote.set_tax_percent(self.tax_percent);
        quote.primary = self.primary.clone();
        for item in &self.supplementary {
            quote.push_supplementary_item(item.clone());
        }
        quote
    }
}

/// Price a quotation from its input.
///
/// # Returns
///
/// * `Ok(QuoteSummary)` - Totals and per-line figures
/// * `Err(QuoteError)` - If the GST percentage is negative or not a number
pub fn calculate(input: &QuoteInput, policy: &FormulaPolicy) -> QuoteResult<QuoteSummary> {
    input.validate()?;

    let mut quote = input.to_quotation(*policy);
    quote.recalculate_all();
    Ok(quote.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{Dimensions, PlanterShape, Quantity, ThicknessTier};

    fn sample_input() -> QuoteInput {
        QuoteInput {
            client: ClientDetails::default(),
            unit: LengthUnit::Inches,
            tax_percent: 18.0,
            primary: LineItem::with(Dimensions::square(24.0, 24.0, 12.0), Quantity::ONE, ThicknessTier::Mm1_5),
            supplementary: vec![LineItem::with(
                Dimensions::square(36.0, 18.0, 24.0),
                Quantity::new(4),
                ThicknessTier::Mm3_5,
            )],
        }
    }

    #[test]
    fn test_calculate_square_with_supplementary() {
        let summary = calculate(&sample_input(), &FormulaPolicy::default()).unwrap();

        // 22.5 sqft x 1070 / 4 = 6018.75; 22.5 x 321 = 7222.5; + 22.5 x 150 = 3375
        let extra_rate = 6018.75 + 7222.5 + 3375.0;
        assert_eq!(summary.supplementary[0].rate.raw, extra_rate);
        assert_eq!(summary.supplementary_total.raw, extra_rate * 4.0);
        assert_eq!(summary.subtotal.raw, 16692.0 + extra_rate * 4.0);
        assert_eq!(summary.shape, PlanterShape::Square);
    }

    #[test]
    fn test_rejects_negative_tax() {
        let mut input = sample_input();
        input.tax_percent = -1.0;
        let err = calculate(&input, &FormulaPolicy::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "primary": {
                "dimensions": { "shape": "round", "top_diameter": 18, "height": 10 },
                "quantity": 10
            }
        }"#;
        let input = QuoteInput::from_json(json).unwrap();
        assert_eq!(input.tax_percent, DEFAULT_TAX_PERCENT);
        assert_eq!(input.unit, LengthUnit::Inches);
        assert!(input.supplementary.is_empty());
        assert_eq!(input.client.company_name, "Your Company Name");

        let summary = calculate(&input, &FormulaPolicy::default()).unwrap();
        assert_eq!(summary.shape, PlanterShape::Round);
        assert_eq!(summary.primary.rate.display, 2102.0);
    }

    #[test]
    fn test_blank_form_fields() {
        let json = r#"{
            "primary": {
                "dimensions": { "shape": "square", "length": null, "width": 24, "height": 12 },
                "quantity": null
            }
        }"#;
        let input = QuoteInput::from_json(json).unwrap();
        assert_eq!(input.primary.dimensions, Dimensions::square(0.0, 24.0, 12.0));
        assert_eq!(input.primary.quantity, Quantity::ONE);

        let summary = calculate(&input, &FormulaPolicy::default()).unwrap();
        assert_eq!(summary.primary.total.raw, 0.0);
        assert_eq!(summary.grand_total, 0.0);

        let json = r#"{
            "primary": {
                "dimensions": { "shape": "round", "top_diameter": "18", "height": "ten" },
                "quantity": "10",
                "thickness": ""
            }
        }"#;
        let input = QuoteInput::from_json(json).unwrap();
        assert_eq!(input.primary.dimensions, Dimensions::round(18.0, 0.0));
        assert_eq!(input.primary.quantity, Quantity::new(10));
        assert_eq!(input.primary.thickness, ThicknessTier::Mm1_5);
    }

    #[test]
    fn test_invalid_json() {
        assert!(QuoteInput::from_json("{").is_err());
    }
}
