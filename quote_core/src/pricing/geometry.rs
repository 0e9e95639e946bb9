//! # Planter Geometry
//!
//! Surface area of the two planter families, in square feet.
//!
//! - **Square/rectangular**: four side walls plus the bottom.
//!   lateral = 2(L + W)H / 144, base = LW / 144
//! - **Round**: side wall only, no bottom term.
//!   circumference = kD, lateral = circumference x H / 144
//!
//! Any required dimension that is zero, negative or blank yields an all-zero
//! breakdown rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::policy::{Figure, FormulaPolicy, MetricKind};
use super::{ROUND_DIE_RATE_PER_SQFT, SQUARE_DIE_RATE_PER_SQFT};
use crate::units::{deserialize_form_length, to_base_unit, Inches, LengthUnit, SqFt, SqIn};

/// The two planter families priced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanterShape {
    #[default]
    Square,
    Round,
}

impl PlanterShape {
    /// Die cost per square foot for this shape
    pub fn die_rate_per_sqft(&self) -> f64 {
        match self {
            PlanterShape::Square => SQUARE_DIE_RATE_PER_SQFT,
            PlanterShape::Round => ROUND_DIE_RATE_PER_SQFT,
        }
    }

    /// Display name used in quotation headings
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanterShape::Square => "Square Planter",
            PlanterShape::Round => "Round Planter",
        }
    }
}

impl fmt::Display for PlanterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanterShape::Square => f.write_str("square"),
            PlanterShape::Round => f.write_str("round"),
        }
    }
}

/// User-entered lengths for one planter, in the quotation's unit.
///
/// Missing, `null` or non-numeric fields read as 0.
///
/// ## JSON Example
///
/// ```json
/// { "shape": "round", "top_diameter": 18.0, "height": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Dimensions {
    Square {
        #[serde(default, deserialize_with = "deserialize_form_length")]
        length: f64,
        #[serde(default, deserialize_with = "deserialize_form_length")]
        width: f64,
        #[serde(default, deserialize_with = "deserialize_form_length")]
        height: f64,
    },
    Round {
        #[serde(default, deserialize_with = "deserialize_form_length")]
        top_diameter: f64,
        #[serde(default, deserialize_with = "deserialize_form_length")]
        height: f64,
    },
}

impl Dimensions {
    /// Square/rectangular planter dimensions
    pub fn square(length: f64, width: f64, height: f64) -> Self {
        Dimensions::Square { length, width, height }
    }

    /// Round planter dimensions
    pub fn round(top_diameter: f64, height: f64) -> Self {
        Dimensions::Round { top_diameter, height }
    }

    /// Blank dimensions for a new line item of the given shape
    pub fn zeroed(shape: PlanterShape) -> Self {
        match shape {
            PlanterShape::Square => Dimensions::square(0.0, 0.0, 0.0),
            PlanterShape::Round => Dimensions::round(0.0, 0.0),
        }
    }

    /// Which planter family these dimensions describe
    pub fn shape(&self) -> PlanterShape {
        match self {
            Dimensions::Square { .. } => PlanterShape::Square,
            Dimensions::Round { .. } => PlanterShape::Round,
        }
    }

    /// Height, common to both shapes
    pub fn height(&self) -> f64 {
        match self {
            Dimensions::Square { height, .. } | Dimensions::Round { height, .. } => *height,
        }
    }
}

/// Area components of one planter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaBreakdown {
    /// Top circumference in inches (0 for square planters)
    pub circumference: Figure,
    /// Side wall area in sq ft
    pub lateral_area: Figure,
    /// Bottom area in sq ft (0 for round planters)
    pub base_area: Figure,
    /// lateral + base
    pub total_area: Figure,
    /// lateral + base as the policy carries it forward, before rounding
    pub unrounded_total: f64,
}

/// Compute the area breakdown for a planter.
pub fn compute_area(dims: &Dimensions, unit: LengthUnit, policy: &FormulaPolicy) -> AreaBreakdown {
    match *dims {
        Dimensions::Square { length, width, height } => square_area(
            to_base_unit(length, unit),
            to_base_unit(width, unit),
            to_base_unit(height, unit),
            policy,
        ),
        Dimensions::Round { top_diameter, height } => round_area(
            to_base_unit(top_diameter, unit),
            to_base_unit(height, unit),
            policy,
        ),
    }
}

fn square_area(length: Inches, width: Inches, height: Inches, policy: &FormulaPolicy) -> AreaBreakdown {
    if !(length.is_positive() && width.is_positive() && height.is_positive()) {
        return AreaBreakdown::default();
    }

    let perimeter = (length + width) * 2.0;
    let lateral: SqFt = (perimeter * height).into();
    let base: SqFt = (length * width).into();

    let lateral_area = policy.figure(MetricKind::Area, lateral.value());
    let base_area = policy.figure(MetricKind::Area, base.value());
    let unrounded_total =
        policy.carried(lateral_area, lateral.value()) + policy.carried(base_area, base.value());

    AreaBreakdown {
        circumference: Figure::ZERO,
        lateral_area,
        base_area,
        total_area: policy.figure(MetricKind::Area, unrounded_total),
        unrounded_total,
    }
}

fn round_area(diameter: Inches, height: Inches, policy: &FormulaPolicy) -> AreaBreakdown {
    if !(diameter.is_positive() && height.is_positive()) {
        return AreaBreakdown::default();
    }

    let exact_circumference = diameter.value() * policy.circumference.value();
    let circumference = policy.figure(MetricKind::Length, exact_circumference);
    let lateral: SqFt = SqIn(policy.carried(circumference, exact_circumference) * height.value()).into();
    let lateral_area = policy.figure(MetricKind::Area, lateral.value());

    AreaBreakdown {
        circumference,
        lateral_area,
        base_area: Figure::ZERO,
        total_area: lateral_area,
        unrounded_total: lateral.value(),
    }
}
