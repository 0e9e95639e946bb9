//! # Configuration
//!
//! Business settings loaded from a JSON file. Every field is optional in the
//! file; anything left out keeps its default.
//!
//! ```json
//! {
//!   "company_name": "Green Pots FRP",
//!   "pin": "2468",
//!   "tax_percent": 18,
//!   "unit": "cm",
//!   "policy": { "precision": { "mode": "round_display_only" }, "circumference": "twenty_two_sevenths" }
//! }
//! ```
//!
//! Pricing constants (material and die rates, tier surcharges) are not
//! configurable; they live in [`crate::pricing`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AccessGate, DEFAULT_PIN};
use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::{FormulaPolicy, PlanterShape, DEFAULT_TAX_PERCENT};
use crate::quotation::{Quotation, DEFAULT_COMPANY_NAME};
use crate::units::LengthUnit;

/// Business settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Company name printed on every quotation
    pub company_name: String,
    /// Shared access PIN
    pub pin: String,
    /// Default GST percentage for new quotations
    pub tax_percent: f64,
    /// Default unit for new quotations
    pub unit: LengthUnit,
    /// Formula policy for new quotations
    pub policy: FormulaPolicy,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            pin: DEFAULT_PIN.to_string(),
            tax_percent: DEFAULT_TAX_PERCENT,
            unit: LengthUnit::default(),
            policy: FormulaPolicy::default(),
        }
    }
}

impl QuoteConfig {
    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        let config: QuoteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> QuoteResult<Self> {
        let path_str = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| QuoteError::config(&path_str, e.to_string()))?;
        let config = QuoteConfig::from_json(&json).map_err(|e| QuoteError::config(&path_str, e.to_string()))?;
        debug!(path = %path_str, "loaded configuration");
        Ok(config)
    }

    /// Check values the rest of the system relies on.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.pin.trim().is_empty() {
            return Err(QuoteError::invalid_input("pin", "", "PIN cannot be empty"));
        }
        if !self.tax_percent.is_finite() || self.tax_percent < 0.0 {
            return Err(QuoteError::invalid_input(
                "tax_percent",
                self.tax_percent.to_string(),
                "GST percentage must be zero or positive",
            ));
        }
        Ok(())
    }

    /// Access gate for the configured PIN
    pub fn access_gate(&self) -> AccessGate {
        AccessGate::new(self.pin.trim())
    }

    /// Blank quotation carrying the configured defaults.
    pub fn new_quotation(&self, shape: PlanterShape) -> Quotation {
        let mut quote = Quotation::with_policy(shape, self.policy);
        quote.client.company_name = self.company_name.clone();
        quote.set_unit(self.unit);
        quote.set_tax_percent(self.tax_percent);
        quote
    }
}
