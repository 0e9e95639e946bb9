//! # Quotation Summary
//!
//! A read-only snapshot of a recalculated quotation: what the PDF and
//! messaging exporters consume, and what the CLI prints as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientDetails, LineItem, Quotation};
use crate::pricing::{Dimensions, Figure, MetricKind, PlanterShape, ThicknessTier, TierRates};
use crate::units::LengthUnit;

/// One line of the quotation as it will be printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    /// "Main Planter" or "Planter N"
    pub label: String,
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub thickness: ThicknessTier,
    pub total_area: Figure,
    pub rates: TierRates,
    /// Per-piece rate for the selected thickness
    pub rate: Figure,
    /// rate x quantity
    pub total: Figure,
}

impl LineSummary {
    fn from_item(label: String, item: &LineItem) -> Self {
        LineSummary {
            label,
            dimensions: item.dimensions,
            quantity: item.quantity.get(),
            thickness: item.thickness,
            total_area: item.metrics.total_area,
            rates: item.metrics.rates,
            rate: item.metrics.selected_rate,
            total: item.metrics.item_total,
        }
    }
}

/// Snapshot of a quotation's inputs and totals.
///
/// ## JSON Example
///
/// ```json
/// {
///   "shape": "square",
///   "unit": "inch",
///   "tax_percent": 18.0,
///   "subtotal": { "raw": 16692.0, "display": 16692.0 },
///   "tax_amount": { "raw": 3004.56, "display": 3005.0 },
///   "grand_total": 19697.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub client: ClientDetails,
    pub shape: PlanterShape,
    pub unit: LengthUnit,
    pub tax_percent: f64,
    pub primary: LineSummary,
    pub supplementary: Vec<LineSummary>,
    pub primary_total: Figure,
    pub supplementary_total: Figure,
    pub subtotal: Figure,
    pub tax_amount: Figure,
    /// Rounded to the nearest rupee
    pub grand_total: f64,
    pub generated: DateTime<Utc>,
}

impl QuoteSummary {
    /// Build a summary from the quotation's current metrics.
    pub fn from_quotation(quote: &Quotation) -> Self {
        let display = |value: f64| {
            let figure = quote.policy.figure(MetricKind::Rate, value);
            Figure { raw: value, display: figure.display }
        };

        QuoteSummary {
            client: quote.client.clone(),
            shape: quote.shape,
            unit: quote.unit,
            tax_percent: quote.tax_percent,
            primary: LineSummary::from_item("Main Planter".to_string(), &quote.primary),
            supplementary: quote
                .supplementary
                .iter()
                .enumerate()
                .map(|(i, item)| LineSummary::from_item(format!("Planter {}", i + 1), item))
                .collect(),
            primary_total: display(quote.primary_total()),
            supplementary_total: display(quote.supplementary_total()),
            subtotal: display(quote.subtotal()),
            tax_amount: display(quote.tax_amount()),
            grand_total: quote.grand_total(),
            generated: Utc::now(),
        }
    }

    /// True when there is at least one supplementary line
    pub fn has_supplementary(&self) -> bool {
        !self.supplementary.is_empty()
    }

    /// Suggested file name for the PDF export
    pub fn pdf_file_name(&self) -> &'static str {
        match self.shape {
            PlanterShape::Square => "Square_Planter_Quotation.pdf",
            PlanterShape::Round => "Round_Planter_Quotation.pdf",
        }
    }
}
