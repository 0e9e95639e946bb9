//! # Quotation
//!
//! The `Quotation` is the root container for one customer quote: a primary
//! planter, any number of supplementary planters, a flat GST percentage and
//! free-text client details.
//!
//! ## Structure
//!
//! ```text
//! Quotation
//! ├── client: ClientDetails (company, customer, project, phone)
//! ├── unit / tax_percent / policy
//! ├── primary: LineItem
//! └── supplementary: Vec<LineItem> (insertion ordered)
//! ```
//!
//! Setters only change inputs. Call [`Quotation::recalculate`] (or
//! [`Quotation::recalculate_all`]) afterwards; the total readers work from the
//! metrics of the last recalculation.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::pricing::{Dimensions, PlanterShape, ThicknessTier};
//! use quote_core::quotation::{ItemRef, Quotation};
//!
//! let mut quote = Quotation::new(PlanterShape::Square);
//! quote.set_dimensions(ItemRef::Primary, Dimensions::square(24.0, 24.0, 12.0)).unwrap();
//! quote.recalculate_all();
//!
//! assert_eq!(quote.primary_total(), 16692.0);
//! assert_eq!(quote.grand_total(), 19697.0);
//! ```

pub mod input;
pub mod item;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use input::{calculate, QuoteInput};
pub use item::{ItemRef, LineItem};
pub use summary::{LineSummary, QuoteSummary};

use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::policy::round_half_up;
use crate::pricing::{
    ComputedMetrics, Dimensions, FormulaPolicy, MetricKind, PlanterShape, Quantity, ThicknessTier,
    DEFAULT_TAX_PERCENT,
};
use crate::units::LengthUnit;

/// Company name printed when none is configured
pub const DEFAULT_COMPANY_NAME: &str = "Your Company Name";

/// Free-text details printed on the quotation. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDetails {
    pub company_name: String,
    pub customer_name: String,
    pub project_name: String,
    pub phone_number: String,
}

impl Default for ClientDetails {
    fn default() -> Self {
        ClientDetails {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            customer_name: String::new(),
            project_name: String::new(),
            phone_number: String::new(),
        }
    }
}

/// One customer quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Client details for the exported quotation
    pub client: ClientDetails,

    /// Shape family of this quotation; new supplementary items use it
    pub shape: PlanterShape,

    /// Unit every item's dimensions are entered in
    pub unit: LengthUnit,

    /// Flat GST percentage applied to the subtotal
    pub tax_percent: f64,

    /// Rounding and circumference choices
    pub policy: FormulaPolicy,

    /// The main planter
    pub primary: LineItem,

    /// Additional planters, in insertion order
    pub supplementary: Vec<LineItem>,

    /// When this quotation was started
    pub created: DateTime<Utc>,
}

impl Quotation {
    /// Start a blank quotation with default settings.
    pub fn new(shape: PlanterShape) -> Self {
        Quotation::with_policy(shape, FormulaPolicy::default())
    }

    /// Start a blank quotation with an explicit formula policy.
    pub fn with_policy(shape: PlanterShape, policy: FormulaPolicy) -> Self {
        Quotation {
            client: ClientDetails::default(),
            shape,
            unit: LengthUnit::default(),
            tax_percent: DEFAULT_TAX_PERCENT,
            policy,
            primary: LineItem::new(shape),
            supplementary: Vec::new(),
            created: Utc::now(),
        }
    }

    // ========================================================================
    // Item access
    // ========================================================================

    /// Get a line item.
    pub fn item(&self, item: ItemRef) -> QuoteResult<&LineItem> {
        match item {
            ItemRef::Primary => Ok(&self.primary),
            ItemRef::Supplementary(index) => self
                .supplementary
                .get(index)
                .ok_or_else(|| QuoteError::item_not_found(index, self.supplementary.len())),
        }
    }

    /// Get a mutable line item.
    pub fn item_mut(&mut self, item: ItemRef) -> QuoteResult<&mut LineItem> {
        let len = self.supplementary.len();
        match item {
            ItemRef::Primary => Ok(&mut self.primary),
            ItemRef::Supplementary(index) => self
                .supplementary
                .get_mut(index)
                .ok_or_else(|| QuoteError::item_not_found(index, len)),
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Replace an item's dimensions.
    pub fn set_dimensions(&mut self, item: ItemRef, dimensions: Dimensions) -> QuoteResult<()> {
        self.item_mut(item)?.dimensions = dimensions;
        Ok(())
    }

    /// Set the unit for every item on the quotation.
    pub fn set_unit(&mut self, unit: LengthUnit) {
        self.unit = unit;
    }

    /// Set an item's quantity. Values below 1 become 1.
    pub fn set_quantity(&mut self, item: ItemRef, quantity: i64) -> QuoteResult<()> {
        self.item_mut(item)?.quantity = Quantity::new(quantity);
        Ok(())
    }

    /// Select an item's wall thickness.
    pub fn set_selected_tier(&mut self, item: ItemRef, tier: ThicknessTier) -> QuoteResult<()> {
        self.item_mut(item)?.thickness = tier;
        Ok(())
    }

    /// Set the GST percentage. Negative or non-finite values become 0.
    pub fn set_tax_percent(&mut self, percent: f64) {
        self.tax_percent = if percent.is_finite() && percent > 0.0 { percent } else { 0.0 };
    }

    // ========================================================================
    // Recalculation
    // ========================================================================

    /// Policy an item is priced with. Supplementary items may follow a
    /// different precision than the primary one.
    pub fn policy_for(&self, item: ItemRef) -> FormulaPolicy {
        match item {
            ItemRef::Primary => self.policy,
            ItemRef::Supplementary(_) => self.policy.for_supplementary(),
        }
    }

    /// Recompute one item's metrics from its current inputs.
    pub fn recalculate(&mut self, item: ItemRef) -> QuoteResult<&ComputedMetrics> {
        let unit = self.unit;
        let policy = self.policy_for(item);
        Ok(self.item_mut(item)?.recalculate(unit, &policy))
    }

    /// Recompute every item.
    pub fn recalculate_all(&mut self) {
        let unit = self.unit;
        let policy = self.policy;
        let supplementary_policy = self.policy.for_supplementary();
        self.primary.recalculate(unit, &policy);
        for item in &mut self.supplementary {
            item.recalculate(unit, &supplementary_policy);
        }
        debug!(
            items = 1 + self.supplementary.len(),
            grand_total = self.grand_total(),
            "recalculated quotation"
        );
    }

    // ========================================================================
    // Supplementary items
    // ========================================================================

    /// Append a blank item of the quotation's shape; returns its index.
    pub fn add_supplementary_item(&mut self) -> usize {
        self.push_supplementary_item(LineItem::new(self.shape))
    }

    /// Append an existing item; returns its index.
    pub fn push_supplementary_item(&mut self, item: LineItem) -> usize {
        self.supplementary.push(item);
        let index = self.supplementary.len() - 1;
        debug!(index, shape = %self.supplementary[index].shape(), "added supplementary item");
        index
    }

    /// Remove the item at `index`, shifting later items down by one.
    ///
    /// An out-of-range index is an error and leaves the collection unchanged.
    pub fn remove_supplementary_item(&mut self, index: usize) -> QuoteResult<LineItem> {
        if index >= self.supplementary.len() {
            return Err(QuoteError::item_not_found(index, self.supplementary.len()));
        }
        let removed = self.supplementary.remove(index);
        debug!(index, remaining = self.supplementary.len(), "removed supplementary item");
        Ok(removed)
    }

    // ========================================================================
    // Totals
    // ========================================================================

    /// Primary item rate x quantity
    pub fn primary_total(&self) -> f64 {
        self.primary.total()
    }

    /// Sum of every supplementary item total
    pub fn supplementary_total(&self) -> f64 {
        let sum: f64 = self.supplementary.iter().map(LineItem::total).sum();
        self.policy.for_supplementary().figure(MetricKind::Rate, sum).raw
    }

    /// Primary total + supplementary total
    pub fn subtotal(&self) -> f64 {
        self.primary_total() + self.supplementary_total()
    }

    /// GST on the subtotal
    pub fn tax_amount(&self) -> f64 {
        self.subtotal() * self.tax_percent / 100.0
    }

    /// Subtotal + GST, rounded to the nearest rupee
    pub fn grand_total(&self) -> f64 {
        round_half_up(self.subtotal() + self.tax_amount())
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Clear the primary item back to a blank planter.
    pub fn clear_primary(&mut self) {
        self.primary = LineItem::new(self.shape);
        let unit = self.unit;
        let policy = self.policy;
        self.primary.recalculate(unit, &policy);
    }

    /// Clear every item and setting back to defaults.
    ///
    /// The shape, formula policy and company name are kept.
    pub fn reset(&mut self) {
        let company_name = std::mem::take(&mut self.client.company_name);
        let mut fresh = Quotation::with_policy(self.shape, self.policy);
        fresh.client.company_name = company_name;
        *self = fresh;
        debug!(shape = %self.shape, "quotation reset");
    }

    /// Snapshot of inputs, metrics and totals for export.
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary::from_quotation(self)
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Quotation::new(PlanterShape::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_quote() -> Quotation {
        let mut quote = Quotation::new(PlanterShape::Square);
        quote
            .set_dimensions(ItemRef::Primary, Dimensions::square(24.0, 24.0, 12.0))
            .unwrap();
        quote.recalculate_all();
        quote
    }

    #[test]
    fn test_square_scenario_totals() {
        let quote = square_quote();
        assert_eq!(quote.primary_total(), 16692.0);
        assert_eq!(quote.supplementary_total(), 0.0);
        assert_eq!(quote.subtotal(), 16692.0);
        assert!((quote.tax_amount() - 3004.56).abs() < 1e-9);
        assert_eq!(quote.grand_total(), 19697.0);
    }

    #[test]
    fn test_setters_need_recalculate() {
        let mut quote = square_quote();
        quote.set_quantity(ItemRef::Primary, 2).unwrap();
        assert_eq!(quote.primary_total(), 16692.0);

        quote.recalculate(ItemRef::Primary).unwrap();
        // die per piece 6420, rate 3852 + 6420 = 10272
        assert_eq!(quote.primary_total(), 20544.0);
    }

    #[test]
    fn test_add_and_remove_supplementary() {
        let mut quote = square_quote();
        let first = quote.add_supplementary_item();
        let second = quote.add_supplementary_item();
        assert_eq!((first, second), (0, 1));
        assert_eq!(quote.supplementary[1], LineItem::new(PlanterShape::Square));

        quote
            .set_dimensions(ItemRef::Supplementary(1), Dimensions::square(12.0, 12.0, 12.0))
            .unwrap();
        quote.recalculate_all();
        let kept = quote.supplementary[1].clone();

        quote.remove_supplementary_item(0).unwrap();
        assert_eq!(quote.supplementary.len(), 1);
        assert_eq!(quote.supplementary[0], kept);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut quote = square_quote();
        quote.add_supplementary_item();

        let err = quote.remove_supplementary_item(5).unwrap_err();
        assert_eq!(err, QuoteError::item_not_found(5, 1));
        assert_eq!(quote.supplementary.len(), 1);

        assert!(quote.set_quantity(ItemRef::Supplementary(1), 3).is_err());
        assert!(quote.recalculate(ItemRef::Supplementary(9)).is_err());
    }

    #[test]
    fn test_zero_area_supplementary_contributes_nothing() {
        let mut quote = square_quote();
        quote.add_supplementary_item();
        quote.recalculate_all();
        assert_eq!(quote.supplementary_total(), 0.0);
        assert_eq!(quote.grand_total(), 19697.0);
    }

    #[test]
    fn test_tax_override() {
        let mut quote = square_quote();
        quote.set_tax_percent(0.0);
        assert_eq!(quote.grand_total(), 16692.0);

        quote.set_tax_percent(-5.0);
        assert_eq!(quote.tax_percent, 0.0);

        quote.set_tax_percent(150.0);
        assert_eq!(quote.grand_total(), round_half_up(16692.0 * 2.5));
    }

    #[test]
    fn test_clear_primary_and_reset() {
        let mut quote = square_quote();
        quote.client.company_name = "Green Pots".to_string();
        quote.client.customer_name = "Asha".to_string();
        quote.add_supplementary_item();
        quote.set_tax_percent(12.0);

        quote.clear_primary();
        assert_eq!(quote.primary_total(), 0.0);
        assert_eq!(quote.supplementary.len(), 1);

        quote.reset();
        assert!(quote.supplementary.is_empty());
        assert_eq!(quote.tax_percent, DEFAULT_TAX_PERCENT);
        assert_eq!(quote.client.company_name, "Green Pots");
        assert_eq!(quote.client.customer_name, "");
    }

    #[test]
    fn test_quotation_serialization() {
        let quote = square_quote();
        let json = serde_json::to_string_pretty(&quote).unwrap();
        assert!(json.contains("Your Company Name"));
        let roundtrip: Quotation = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.primary, quote.primary);
        assert_eq!(roundtrip.grand_total(), quote.grand_total());
    }
}
