//! # Line Items
//!
//! One planter on a quotation: its dimensions, quantity, selected thickness
//! and the metrics last computed for them.

use serde::{Deserialize, Serialize};

use crate::pricing::{price_item, ComputedMetrics, Dimensions, FormulaPolicy, PlanterShape, Quantity, ThicknessTier};
use crate::units::LengthUnit;

/// Addresses a line item on a [`Quotation`](super::Quotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRef {
    /// The main planter
    Primary,
    /// An additional planter, by position
    Supplementary(usize),
}

/// A planter being quoted.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dimensions": { "shape": "square", "length": 24.0, "width": 24.0, "height": 12.0 },
///   "quantity": 1,
///   "thickness": 1.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub dimensions: Dimensions,

    #[serde(default)]
    pub quantity: Quantity,

    #[serde(default)]
    pub thickness: ThicknessTier,

    /// Output of the last [`LineItem::recalculate`]
    #[serde(default)]
    pub metrics: ComputedMetrics,
}

impl LineItem {
    /// Blank item: zero dimensions, quantity 1, 1.5mm.
    pub fn new(shape: PlanterShape) -> Self {
        LineItem::with(Dimensions::zeroed(shape), Quantity::ONE, ThicknessTier::default())
    }

    /// Item with the given inputs and zeroed metrics.
    pub fn with(dimensions: Dimensions, quantity: Quantity, thickness: ThicknessTier) -> Self {
        LineItem {
            dimensions,
            quantity,
            thickness,
            metrics: ComputedMetrics::default(),
        }
    }

    /// Planter family of this item
    pub fn shape(&self) -> PlanterShape {
        self.dimensions.shape()
    }

    /// Recompute every metric from the current inputs.
    pub fn recalculate(&mut self, unit: LengthUnit, policy: &FormulaPolicy) -> &ComputedMetrics {
        self.metrics = price_item(&self.dimensions, unit, self.quantity, self.thickness, policy);
        &self.metrics
    }

    /// Extended total (rate x quantity) from the last recalculation
    pub fn total(&self) -> f64 {
        self.metrics.item_total.raw
    }
}
