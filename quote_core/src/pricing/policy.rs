//! # Formula Policies
//!
//! The pricing spreadsheet went through several revisions: rounding moved
//! from 4 decimals to 2 decimals to whole rupees, and round planters switched
//! from π to 22/7 for the circumference. Both choices are explicit inputs here
//! instead of being baked into the formulas.
//!
//! The default is the most recent revision: unrounded values are carried
//! forward and only display figures and the grand total are rounded, with
//! 22/7 as the circumference constant.
//!
//! The older sheets are available as presets. [`FormulaPolicy::square_sheet`]
//! and [`FormulaPolicy::round_sheet`] reproduce them figure for figure,
//! including the way each sheet priced its additional planters.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::pricing::{FormulaPolicy, MetricKind};
//!
//! let policy = FormulaPolicy::default();
//! let rate = policy.figure(MetricKind::Rate, 2101.7857);
//! assert_eq!(rate.raw, 2101.7857);
//! assert_eq!(rate.display, 2102.0);
//!
//! let legacy = FormulaPolicy::square_sheet();
//! assert_eq!(legacy.figure(MetricKind::Rate, 2101.7857).raw, 2102.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::geometry::PlanterShape;

/// Decimals shown for lengths (circumference)
pub const LENGTH_DISPLAY_DECIMALS: u32 = 4;

/// Decimals shown for areas
pub const AREA_DISPLAY_DECIMALS: u32 = 2;

/// Decimals shown for money (whole rupees)
pub const MONEY_DISPLAY_DECIMALS: u32 = 0;

/// What a computed number measures; selects its rounding granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Inches
    Length,
    /// Square feet
    Area,
    /// Die cost and die cost per piece, in rupees
    Money,
    /// Unit rates and line totals, in rupees
    Rate,
}

/// Which value a later formula reads once a step has been rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarryForward {
    /// Area sums, die cost and tier surcharges build on the unrounded value
    #[default]
    Raw,
    /// They build on the rounded value
    Rounded,
}

/// When intermediate values get rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PrecisionPolicy {
    /// Carry raw values forward; round only display figures and the grand total
    #[default]
    RoundDisplayOnly,
    /// Round every stored value at its step.
    ///
    /// Rates always read the stored (rounded) area and per-piece die cost.
    /// `carry` decides what area sums, die cost and tier surcharges read.
    /// Per-piece die cost is always the unrounded die cost over quantity.
    RoundEachStep {
        length_decimals: u32,
        area_decimals: u32,
        money_decimals: u32,
        /// `None` leaves rates and line totals unrounded
        #[serde(default)]
        rate_decimals: Option<u32>,
        #[serde(default)]
        carry: CarryForward,
    },
}

impl PrecisionPolicy {
    /// The square sheet's main planter: two-decimal areas, whole rupees,
    /// each step building on the rounded one before it
    pub fn spreadsheet() -> Self {
        PrecisionPolicy::RoundEachStep {
            length_decimals: 2,
            area_decimals: 2,
            money_decimals: 0,
            rate_decimals: Some(0),
            carry: CarryForward::Rounded,
        }
    }

    /// The square sheet's additional planters: same granularity, but the
    /// area total and die cost come from unrounded values and each rate is
    /// rounded once
    pub fn spreadsheet_additional() -> Self {
        PrecisionPolicy::RoundEachStep {
            length_decimals: 2,
            area_decimals: 2,
            money_decimals: 0,
            rate_decimals: Some(0),
            carry: CarryForward::Raw,
        }
    }

    /// The round sheet: four-decimal lengths and areas, two-decimal die
    /// cost, unrounded rates
    pub fn four_decimal() -> Self {
        PrecisionPolicy::RoundEachStep {
            length_decimals: 4,
            area_decimals: 4,
            money_decimals: 2,
            rate_decimals: None,
            carry: CarryForward::Raw,
        }
    }
}

/// Constant multiplied by the diameter to get a circumference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircumferenceConstant {
    /// π
    Pi,
    /// 22/7
    #[default]
    TwentyTwoSevenths,
}

impl CircumferenceConstant {
    /// Numeric value of the constant
    pub fn value(&self) -> f64 {
        match self {
            CircumferenceConstant::Pi => PI,
            CircumferenceConstant::TwentyTwoSevenths => 22.0 / 7.0,
        }
    }
}

/// The full set of formula choices applied to a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaPolicy {
    /// Precision for the primary item, and for supplementary items unless
    /// `supplementary` says otherwise
    pub precision: PrecisionPolicy,
    pub circumference: CircumferenceConstant,
    /// Precision for supplementary items, when it differs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<PrecisionPolicy>,
}

impl FormulaPolicy {
    /// The legacy square-planter sheet.
    pub fn square_sheet() -> Self {
        FormulaPolicy {
            precision: PrecisionPolicy::spreadsheet(),
            circumference: CircumferenceConstant::TwentyTwoSevenths,
            supplementary: Some(PrecisionPolicy::spreadsheet_additional()),
        }
    }

    /// The legacy round-planter sheet. Its additional planters were never
    /// rounded.
    pub fn round_sheet() -> Self {
        FormulaPolicy {
            precision: PrecisionPolicy::four_decimal(),
            circumference: CircumferenceConstant::Pi,
            supplementary: Some(PrecisionPolicy::RoundDisplayOnly),
        }
    }

    /// Legacy sheet for a planter family
    pub fn legacy_sheet(shape: PlanterShape) -> Self {
        match shape {
            PlanterShape::Square => FormulaPolicy::square_sheet(),
            PlanterShape::Round => FormulaPolicy::round_sheet(),
        }
    }

    /// The policy supplementary items are priced with.
    pub fn for_supplementary(&self) -> FormulaPolicy {
        FormulaPolicy {
            precision: self.supplementary.unwrap_or(self.precision),
            circumference: self.circumference,
            supplementary: None,
        }
    }

    /// Build a [`Figure`] for a freshly computed value.
    ///
    /// Under `RoundEachStep` the stored raw value is rounded too.
    pub fn figure(&self, kind: MetricKind, value: f64) -> Figure {
        let raw = match self.precision {
            PrecisionPolicy::RoundDisplayOnly => value,
            PrecisionPolicy::RoundEachStep {
                length_decimals,
                area_decimals,
                money_decimals,
                rate_decimals,
                ..
            } => match kind {
                MetricKind::Length => round_to(value, length_decimals),
                MetricKind::Area => round_to(value, area_decimals),
                MetricKind::Money => round_to(value, money_decimals),
                MetricKind::Rate => match rate_decimals {
                    Some(decimals) => round_to(value, decimals),
                    None => value,
                },
            },
        };
        Figure::new(raw, display_decimals(kind))
    }

    /// The value a dependent sum or product reads: the stored figure, or the
    /// unrounded value it was built from under [`CarryForward::Raw`].
    pub fn carried(&self, stored: Figure, unrounded: f64) -> f64 {
        match self.precision {
            PrecisionPolicy::RoundEachStep {
                carry: CarryForward::Rounded,
                ..
            } => stored.raw,
            _ => unrounded,
        }
    }
}

fn display_decimals(kind: MetricKind) -> u32 {
    match kind {
        MetricKind::Length => LENGTH_DISPLAY_DECIMALS,
        MetricKind::Area => AREA_DISPLAY_DECIMALS,
        MetricKind::Money | MetricKind::Rate => MONEY_DISPLAY_DECIMALS,
    }
}

/// A computed value in both of its representations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    /// Value carried into later formulas
    pub raw: f64,
    /// Value shown to the customer
    pub display: f64,
}

impl Figure {
    /// Exact zero in both representations
    pub const ZERO: Figure = Figure { raw: 0.0, display: 0.0 };

    fn new(raw: f64, decimals: u32) -> Self {
        Figure {
            raw,
            display: round_to(raw, decimals),
        }
    }
}

/// Round half up to the nearest integer (spreadsheet `ROUND` on positives).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half up to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return round_half_up(value);
    }
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}
