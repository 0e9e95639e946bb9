//! # Thickness Tiers
//!
//! Unit rate for each wall thickness. The 1.5mm "FRP" rate is the base:
//!
//! ```text
//! base = total_area x 321 + die_cost_per_piece
//! ```
//!
//! Thicker walls add a per-square-foot surcharge on top of the base rate.
//! Surcharges never stack on each other.
//!
//! | Tier   | Surcharge      |
//! |--------|----------------|
//! | 1.5 mm | 0              |
//! | 2.5 mm | area x 100     |
//! | 3.5 mm | area x 150     |
//! | 5.0 mm | area x 250     |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::policy::{Figure, FormulaPolicy, MetricKind};
use super::MATERIAL_RATE_PER_SQFT;
use crate::errors::QuoteError;
use crate::units::deserialize_form_number;

/// Wall thickness of a planter.
///
/// Serialized as its thickness in millimeters. Deserializing a number that
/// matches no tier, or a blank field, yields the base tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
#[serde(into = "f64")]
pub enum ThicknessTier {
    /// 1.5 mm, the base FRP rate
    #[default]
    Mm1_5,
    Mm2_5,
    Mm3_5,
    Mm5_0,
}

impl ThicknessTier {
    /// Every tier, thinnest first
    pub const ALL: [ThicknessTier; 4] = [
        ThicknessTier::Mm1_5,
        ThicknessTier::Mm2_5,
        ThicknessTier::Mm3_5,
        ThicknessTier::Mm5_0,
    ];

    /// Thickness in millimeters
    pub fn millimeters(&self) -> f64 {
        match self {
            ThicknessTier::Mm1_5 => 1.5,
            ThicknessTier::Mm2_5 => 2.5,
            ThicknessTier::Mm3_5 => 3.5,
            ThicknessTier::Mm5_0 => 5.0,
        }
    }

    /// Surcharge per square foot over the base rate
    pub fn surcharge_per_sqft(&self) -> f64 {
        match self {
            ThicknessTier::Mm1_5 => 0.0,
            ThicknessTier::Mm2_5 => 100.0,
            ThicknessTier::Mm3_5 => 150.0,
            ThicknessTier::Mm5_0 => 250.0,
        }
    }

    /// Look up a tier by thickness. Only exact tenths of a millimeter match.
    pub fn from_millimeters(mm: f64) -> Option<Self> {
        let tenths = mm * 10.0;
        if !tenths.is_finite() || (tenths.round() - tenths).abs() >= 1e-9 {
            return None;
        }
        match tenths.round() as i64 {
            15 => Some(ThicknessTier::Mm1_5),
            25 => Some(ThicknessTier::Mm2_5),
            35 => Some(ThicknessTier::Mm3_5),
            50 => Some(ThicknessTier::Mm5_0),
            _ => None,
        }
    }

    /// Tier for a thickness, falling back to the base tier when unrecognized.
    pub fn from_millimeters_or_base(mm: f64) -> Self {
        ThicknessTier::from_millimeters(mm).unwrap_or_else(|| {
            warn!(thickness_mm = mm, "unrecognized thickness, using 1.5mm base rate");
            ThicknessTier::Mm1_5
        })
    }
}

impl fmt::Display for ThicknessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}mm", self.millimeters())
    }
}

impl From<f64> for ThicknessTier {
    fn from(mm: f64) -> Self {
        ThicknessTier::from_millimeters_or_base(mm)
    }
}

impl<'de> Deserialize<'de> for ThicknessTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserialize_form_number(deserializer)?.map_or(ThicknessTier::Mm1_5, ThicknessTier::from))
    }
}

impl From<ThicknessTier> for f64 {
    fn from(tier: ThicknessTier) -> Self {
        tier.millimeters()
    }
}

impl FromStr for ThicknessTier {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches("mm").trim();
        let mm: f64 = trimmed
            .parse()
            .map_err(|_| QuoteError::invalid_input("thickness", s, "Expected a thickness such as 2.5 or 2.5mm"))?;
        ThicknessTier::from_millimeters(mm)
            .ok_or_else(|| QuoteError::invalid_input("thickness", s, "Expected one of 1.5, 2.5, 3.5, 5.0"))
    }
}

/// Unit rate for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierRates {
    /// 1.5 mm base FRP rate
    pub frp_1_5: Figure,
    pub mm_2_5: Figure,
    pub mm_3_5: Figure,
    pub mm_5_0: Figure,
}

impl TierRates {
    /// Rate for the given tier
    pub fn rate(&self, tier: ThicknessTier) -> Figure {
        match tier {
            ThicknessTier::Mm1_5 => self.frp_1_5,
            ThicknessTier::Mm2_5 => self.mm_2_5,
            ThicknessTier::Mm3_5 => self.mm_3_5,
            ThicknessTier::Mm5_0 => self.mm_5_0,
        }
    }

    /// (tier, rate) pairs, thinnest first
    pub fn iter(&self) -> impl Iterator<Item = (ThicknessTier, Figure)> + '_ {
        ThicknessTier::ALL.into_iter().map(move |tier| (tier, self.rate(tier)))
    }
}

/// Compute every tier rate from the stored area and per-piece die cost.
///
/// Surcharges are added to the base rate as the policy carries it forward.
pub fn compute_tier_rates(total_area_sqft: f64, die_cost_per_piece: f64, policy: &FormulaPolicy) -> TierRates {
    if total_area_sqft <= 0.0 {
        return TierRates::default();
    }

    let unrounded_base = total_area_sqft * MATERIAL_RATE_PER_SQFT + die_cost_per_piece;
    let base = policy.figure(MetricKind::Rate, unrounded_base);
    let carried_base = policy.carried(base, unrounded_base);
    let with_surcharge = |tier: ThicknessTier| {
        policy.figure(MetricKind::Rate, carried_base + total_area_sqft * tier.surcharge_per_sqft())
    };

    TierRates {
        frp_1_5: base,
        mm_2_5: with_surcharge(ThicknessTier::Mm2_5),
        mm_3_5: with_surcharge(ThicknessTier::Mm3_5),
        mm_5_0: with_surcharge(ThicknessTier::Mm5_0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lookup() {
        assert_eq!(ThicknessTier::from_millimeters(2.5), Some(ThicknessTier::Mm2_5));
        assert_eq!(ThicknessTier::from_millimeters(5.0), Some(ThicknessTier::Mm5_0));
        assert_eq!(ThicknessTier::from_millimeters(4.0), None);
        assert_eq!(ThicknessTier::from_millimeters(2.46), None);
        assert_eq!(ThicknessTier::from_millimeters(4.96), None);
        assert_eq!(ThicknessTier::from_millimeters(0.1 + 0.2 + 1.2), Some(ThicknessTier::Mm1_5));
        assert_eq!(ThicknessTier::from_millimeters_or_base(4.0), ThicknessTier::Mm1_5);
        assert_eq!(ThicknessTier::from_millimeters_or_base(2.46), ThicknessTier::Mm1_5);
        assert_eq!(ThicknessTier::from_millimeters_or_base(f64::NAN), ThicknessTier::Mm1_5);
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("3.5mm".parse::<ThicknessTier>().unwrap(), ThicknessTier::Mm3_5);
        assert_eq!("5".parse::<ThicknessTier>().unwrap(), ThicknessTier::Mm5_0);
        assert!("thick".parse::<ThicknessTier>().is_err());
        assert!("2.0".parse::<ThicknessTier>().is_err());
        assert!("4.96".parse::<ThicknessTier>().is_err());
        assert!("2.54mm".parse::<ThicknessTier>().is_err());
    }

    #[test]
    fn test_tier_json() {
        assert_eq!(serde_json::to_string(&ThicknessTier::Mm2_5).unwrap(), "2.5");
        let tier: ThicknessTier = serde_json::from_str("5").unwrap();
        assert_eq!(tier, ThicknessTier::Mm5_0);
        let fallback: ThicknessTier = serde_json::from_str("7.5").unwrap();
        assert_eq!(fallback, ThicknessTier::Mm1_5);
        let text: ThicknessTier = serde_json::from_str("\"3.5\"").unwrap();
        assert_eq!(text, ThicknessTier::Mm3_5);
        let blank: ThicknessTier = serde_json::from_str("null").unwrap();
        assert_eq!(blank, ThicknessTier::Mm1_5);
    }

    #[test]
    fn test_square_rates() {
        let rates = compute_tier_rates(12.0, 12840.0, &FormulaPolicy::default());
        assert_eq!(rates.frp_1_5.raw, 16692.0);
        assert_eq!(rates.mm_2_5.raw, 17892.0);
        assert_eq!(rates.mm_3_5.raw, 18492.0);
        assert_eq!(rates.mm_5_0.raw, 19692.0);
    }

    #[test]
    fn test_rates_are_monotonic() {
        let rates = compute_tier_rates(3.9286, 840.71, &FormulaPolicy::default());
        let values: Vec<f64> = rates.iter().map(|(_, rate)| rate.raw).collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_surcharge_on_carried_base() {
        // 1.18 x 321 + 1263 = 1641.78
        let main = compute_tier_rates(1.18, 1263.0, &FormulaPolicy::square_sheet());
        assert_eq!(main.frp_1_5.raw, 1642.0);
        // 1642 + 118 = 1760
        assert_eq!(main.mm_2_5.raw, 1760.0);

        // 1.19 x 321 + 1271 + 119 = 1771.99, rounded once
        let additional = compute_tier_rates(1.19, 1271.0, &FormulaPolicy::square_sheet().for_supplementary());
        assert_eq!(additional.frp_1_5.raw, 1653.0);
        assert_eq!(additional.mm_2_5.raw, 1772.0);
    }

    #[test]
    fn test_zero_area_rates() {
        assert_eq!(compute_tier_rates(0.0, 0.0, &FormulaPolicy::default()), TierRates::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(ThicknessTier::Mm5_0.to_string(), "5.0mm");
        assert_eq!(ThicknessTier::default().to_string(), "1.5mm");
    }
}
