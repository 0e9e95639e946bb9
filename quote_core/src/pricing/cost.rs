//! # Die Cost
//!
//! The die (mold) is a one-time tooling cost proportional to surface area,
//! spread across every piece in the order.

use serde::{Deserialize, Deserializer, Serialize};

use super::geometry::PlanterShape;
use super::policy::{Figure, FormulaPolicy, MetricKind};
use crate::units::deserialize_form_number;

/// Order quantity. Always at least 1.
///
/// Zero, negative and non-finite inputs collapse to 1, so die cost
/// amortization never divides by zero. In JSON a blank or non-numeric
/// quantity also reads as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Quantity of one piece
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, flooring anything below 1 to 1.
    pub fn new(count: i64) -> Self {
        if count < 1 {
            Quantity::ONE
        } else {
            Quantity(u32::try_from(count).unwrap_or(u32::MAX))
        }
    }

    /// Piece count
    pub fn get(self) -> u32 {
        self.0
    }

    /// Piece count as a float for pricing math
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        if !value.is_finite() || value < 1.0 {
            return Quantity::ONE;
        }
        Quantity::new(value.trunc() as i64)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserialize_form_number(deserializer)?.map_or(Quantity::ONE, Quantity::from))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Die cost for the whole order and per piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DieCost {
    pub die_cost: Figure,
    pub die_cost_per_piece: Figure,
}

/// Derive die cost from the total area.
///
/// The per-piece value always divides the unrounded die cost; the policy
/// rounds only the quotient.
pub fn derive_die_cost(total_area_sqft: f64, shape: PlanterShape, quantity: Quantity, policy: &FormulaPolicy) -> DieCost {
    if total_area_sqft <= 0.0 {
        return DieCost::default();
    }

    let die = total_area_sqft * shape.die_rate_per_sqft();
    let die_cost = policy.figure(MetricKind::Money, die);
    let die_cost_per_piece = policy.figure(MetricKind::Money, die / quantity.as_f64());

    DieCost {
        die_cost,
        die_cost_per_piece,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_floor() {
        assert_eq!(Quantity::new(0).get(), 1);
        assert_eq!(Quantity::new(-7).get(), 1);
        assert_eq!(Quantity::new(12).get(), 12);
        assert_eq!(Quantity::from(f64::NAN).get(), 1);
        assert_eq!(Quantity::from(2.9).get(), 2);
    }

    #[test]
    fn test_quantity_json() {
        let q: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(q, Quantity::ONE);
        let q: Quantity = serde_json::from_str("25").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "25");

        for blank in ["null", "\"\"", "\"lots\""] {
            let q: Quantity = serde_json::from_str(blank).unwrap();
            assert_eq!(q, Quantity::ONE, "{}", blank);
        }
        let q: Quantity = serde_json::from_str("\"6\"").unwrap();
        assert_eq!(q.get(), 6);
    }

    #[test]
    fn test_square_die_cost() {
        let die = derive_die_cost(12.0, PlanterShape::Square, Quantity::new(1), &FormulaPolicy::default());
        assert_eq!(die.die_cost.raw, 12840.0);
        assert_eq!(die.die_cost_per_piece.raw, 12840.0);
    }

    #[test]
    fn test_round_die_cost_amortized() {
        let area = 22.0 / 7.0 * 18.0 * 10.0 / 144.0;
        let die = derive_die_cost(area, PlanterShape::Round, Quantity::new(10), &FormulaPolicy::default());
        assert!((die.die_cost.raw - 8407.142857).abs() < 1e-5);
        assert!((die.die_cost_per_piece.raw - 840.7142857).abs() < 1e-6);
        assert_eq!(die.die_cost_per_piece.display, 841.0);
    }

    #[test]
    fn test_each_step_amortizes_unrounded_die() {
        let policy = FormulaPolicy::square_sheet();
        // 1.38 x 1070 = 1476.6 -> 1477, but 1476.6 / 2 = 738.3 -> 738
        let die = derive_die_cost(1.38, PlanterShape::Square, Quantity::new(2), &policy);
        assert_eq!(die.die_cost.raw, 1477.0);
        assert_eq!(die.die_cost_per_piece.raw, 738.0);
    }

    #[test]
    fn test_zero_area() {
        let die = derive_die_cost(0.0, PlanterShape::Round, Quantity::new(4), &FormulaPolicy::default());
        assert_eq!(die, DieCost::default());
    }
}
