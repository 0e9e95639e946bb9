//! Number formatting shared by the PDF and message exporters.

use crate::pricing::policy::round_half_up;
use crate::pricing::{Dimensions, ThicknessTier};
use crate::units::LengthUnit;

/// Rupee sign
pub const RUPEE: &str = "₹";

/// Whole rupees with Indian digit grouping, e.g. `₹ 1,23,456`.
pub fn format_inr(amount: f64) -> String {
    format!("{} {}", RUPEE, group_indian(amount))
}

/// Whole-number Indian grouping: last three digits, then pairs.
pub fn group_indian(amount: f64) -> String {
    let rounded = if amount.is_finite() { round_half_up(amount) } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Area in square feet to two decimals.
pub fn format_area(sqft: f64) -> String {
    format!("{:.2}", sqft)
}

/// Dimensions as entered, e.g. `L 24 inch, W 24 inch, H 12 inch`.
pub fn format_dimensions(dims: &Dimensions, unit: LengthUnit) -> String {
    match *dims {
        Dimensions::Square { length, width, height } => {
            format!("L {} {unit}, W {} {unit}, H {} {unit}", length, width, height, unit = unit)
        }
        Dimensions::Round { top_diameter, height } => {
            format!("Top Dia {} {unit}, H {} {unit}", top_diameter, height, unit = unit)
        }
    }
}

/// Thickness label, e.g. `2.5 mm`.
pub fn format_thickness(tier: ThicknessTier) -> String {
    format!("{} mm", tier.millimeters())
}
