//! # Pricing Pipeline
//!
//! The geometric-to-cost derivation shared by both planter families. Each
//! stage is a pure function over plain values:
//!
//! - [`geometry`] - dimensions to surface area (and circumference)
//! - [`cost`] - surface area to die cost and per-piece die cost
//! - [`tiers`] - area and die cost to the four thickness-tier unit rates
//! - [`policy`] - rounding and circumference policies that every stage honors
//!
//! ## Example
//!
//! ```rust
//! use quote_core::pricing::{price_item, Dimensions, FormulaPolicy, Quantity, ThicknessTier};
//! use quote_core::units::LengthUnit;
//!
//! let dims = Dimensions::square(24.0, 24.0, 12.0);
//! let metrics = price_item(&dims, LengthUnit::Inches, Quantity::new(1), ThicknessTier::Mm1_5, &FormulaPolicy::default());
//!
//! assert_eq!(metrics.total_area.raw, 12.0);
//! assert_eq!(metrics.selected_rate.display, 16692.0);
//! ```

pub mod cost;
pub mod geometry;
pub mod policy;
pub mod tiers;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cost::{derive_die_cost, DieCost, Quantity};
pub use geometry::{compute_area, AreaBreakdown, Dimensions, PlanterShape};
pub use policy::{CarryForward, CircumferenceConstant, Figure, FormulaPolicy, MetricKind, PrecisionPolicy};
pub use tiers::{compute_tier_rates, ThicknessTier, TierRates};

use crate::units::LengthUnit;

// ============================================================================
// Business Constants
// ============================================================================

/// FRP material rate per square foot (INR)
pub const MATERIAL_RATE_PER_SQFT: f64 = 321.0;

/// Die (mold) cost per square foot for square/rectangular planters (INR)
pub const SQUARE_DIE_RATE_PER_SQFT: f64 = 1070.0;

/// Die (mold) cost per square foot for round planters (INR)
pub const ROUND_DIE_RATE_PER_SQFT: f64 = 2140.0;

/// Default GST percentage
pub const DEFAULT_TAX_PERCENT: f64 = 18.0;

/// Every computed value for one line item.
///
/// `circumference` and `base_area` are 0 for shapes that have no such term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComputedMetrics {
    /// Top circumference in inches (round planters)
    pub circumference: Figure,
    /// Side wall area in sq ft
    pub lateral_area: Figure,
    /// Bottom area in sq ft (square planters)
    pub base_area: Figure,
    /// Total priced area in sq ft
    pub total_area: Figure,
    /// Die cost for the whole order
    pub die_cost: Figure,
    /// Die cost amortized over the quantity
    pub die_cost_per_piece: Figure,
    /// Unit rate for every thickness tier
    pub rates: TierRates,
    /// Unit rate for the selected tier
    pub selected_rate: Figure,
    /// Selected rate times quantity
    pub item_total: Figure,
}

impl ComputedMetrics {
    /// True when the item has no priceable area (blank or invalid dimensions)
    pub fn is_zero(&self) -> bool {
        self.total_area.raw == 0.0
    }
}

/// Run the full pipeline for one line item.
///
/// Never fails: missing or non-positive dimensions produce all-zero metrics.
pub fn price_item(
    dims: &Dimensions,
    unit: LengthUnit,
    quantity: Quantity,
    tier: ThicknessTier,
    policy: &FormulaPolicy,
) -> ComputedMetrics {
    let area = compute_area(dims, unit, policy);
    if area.total_area.raw <= 0.0 {
        debug!(shape = %dims.shape(), "dimensions incomplete, item priced at zero");
        return ComputedMetrics::default();
    }

    let die_area = policy.carried(area.total_area, area.unrounded_total);
    let die = derive_die_cost(die_area, dims.shape(), quantity, policy);
    let rates = compute_tier_rates(area.total_area.raw, die.die_cost_per_piece.raw, policy);
    let selected_rate = rates.rate(tier);
    let item_total = policy.figure(MetricKind::Rate, selected_rate.raw * quantity.as_f64());

    debug!(
        shape = %dims.shape(),
        total_sqft = area.total_area.raw,
        tier = %tier,
        rate = selected_rate.raw,
        item_total = item_total.raw,
        "priced line item"
    );

    ComputedMetrics {
        circumference: area.circumference,
        lateral_area: area.lateral_area,
        base_area: area.base_area,
        total_area: area.total_area,
        die_cost: die.die_cost,
        die_cost_per_piece: die.die_cost_per_piece,
        rates,
        selected_rate,
        item_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_base_case() {
        let dims = Dimensions::square(24.0, 24.0, 12.0);
        let m = price_item(&dims, LengthUnit::Inches, Quantity::new(1), ThicknessTier::Mm1_5, &FormulaPolicy::default());

        assert_eq!(m.lateral_area.raw, 8.0);
        assert_eq!(m.base_area.raw, 4.0);
        assert_eq!(m.total_area.raw, 12.0);
        assert_eq!(m.die_cost.raw, 12840.0);
        assert_eq!(m.die_cost_per_piece.raw, 12840.0);
        assert_eq!(m.selected_rate.raw, 16692.0);
        assert_eq!(m.item_total.raw, 16692.0);
    }

    #[test]
    fn test_round_base_case() {
        let dims = Dimensions::round(18.0, 10.0);
        let m = price_item(&dims, LengthUnit::Inches, Quantity::new(10), ThicknessTier::Mm1_5, &FormulaPolicy::default());

        assert!((m.circumference.raw - 56.5714).abs() < 1e-4);
        assert!((m.total_area.raw - 3.9286).abs() < 1e-4);
        assert!((m.die_cost.raw - 8407.14).abs() < 0.01);
        assert!((m.die_cost_per_piece.raw - 840.71).abs() < 0.01);
        assert!((m.selected_rate.raw - 2101.80).abs() < 0.05);
        assert_eq!(m.selected_rate.display, 2102.0);
        assert_eq!(m.base_area.raw, 0.0);
    }

    #[test]
    fn test_selected_tier_drives_item_total() {
        let dims = Dimensions::square(24.0, 24.0, 12.0);
        let m = price_item(&dims, LengthUnit::Inches, Quantity::new(2), ThicknessTier::Mm5_0, &FormulaPolicy::default());

        // die per piece 6420, base 3852 + 6420 = 10272, +250 * 12 = 13272
        assert_eq!(m.selected_rate.raw, 13272.0);
        assert_eq!(m.item_total.raw, 26544.0);
    }

    #[test]
    fn test_square_sheet_main_and_additional() {
        let dims = Dimensions::square(5.0, 5.0, 7.3);
        let policy = FormulaPolicy::square_sheet();

        let main = price_item(&dims, LengthUnit::Inches, Quantity::new(1), ThicknessTier::Mm2_5, &policy);
        assert_eq!(main.lateral_area.raw, 1.01);
        assert_eq!(main.base_area.raw, 0.17);
        assert_eq!(main.total_area.raw, 1.18);
        assert_eq!(main.die_cost_per_piece.raw, 1263.0);
        assert_eq!(main.item_total.raw, 1760.0);

        // 1.0139 + 0.1736 = 1.1875 before rounding
        let additional = price_item(
            &dims,
            LengthUnit::Inches,
            Quantity::new(1),
            ThicknessTier::Mm2_5,
            &policy.for_supplementary(),
        );
        assert_eq!(additional.total_area.raw, 1.19);
        assert_eq!(additional.die_cost_per_piece.raw, 1271.0);
        assert_eq!(additional.item_total.raw, 1772.0);
    }

    #[test]
    fn test_incomplete_dimensions_are_zero() {
        let dims = Dimensions::square(24.0, 0.0, 12.0);
        let m = price_item(&dims, LengthUnit::Inches, Quantity::new(5), ThicknessTier::Mm3_5, &FormulaPolicy::default());
        assert_eq!(m, ComputedMetrics::default());
        assert!(m.is_zero());
    }
}
