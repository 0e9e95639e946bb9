//! # WhatsApp Share
//!
//! Plain-text quotation message (WhatsApp `*bold*` markup) and the `wa.me`
//! link that opens it in a chat.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::export::whatsapp::share_url;
//!
//! let url = share_url("+91 98765-43210", "Hello & welcome");
//! assert_eq!(url, "https://wa.me/919876543210?text=Hello%20%26%20welcome");
//! ```

use super::format::{format_area, format_dimensions, format_inr, format_thickness};
use crate::pricing::Dimensions;
use crate::quotation::{LineSummary, QuoteSummary};
use crate::units::LengthUnit;

/// Country code prefixed to local phone numbers
pub const COUNTRY_CODE: &str = "91";

const WA_BASE_URL: &str = "https://wa.me/";

/// Build the quotation message text.
pub fn build_message(summary: &QuoteSummary) -> String {
    let client = &summary.client;
    let mut lines = vec![
        format!("*{}*", client.company_name),
        String::new(),
        format!("*{} QUOTATION*", summary.shape.display_name().to_uppercase()),
        String::new(),
        format!("*Customer:* {}", client.customer_name),
        format!("*Project:* {}", client.project_name),
        String::new(),
        "*MAIN PLANTER:*".to_string(),
    ];
    lines.extend(dimension_lines(&summary.primary.dimensions, summary.unit));
    lines.extend(line_figures(&summary.primary));
    lines.push(String::new());

    if summary.has_supplementary() {
        lines.push("*ADDITIONAL PLANTERS:*".to_string());
        for line in &summary.supplementary {
            lines.push(format!(
                "{}: {}, Qty {}, {}",
                line.label,
                format_dimensions(&line.dimensions, summary.unit),
                line.quantity,
                format_thickness(line.thickness)
            ));
            lines.push(format!("Amount: {}", format_inr(line.total.raw)));
            lines.push(String::new());
        }
    }

    lines.push("*SUMMARY:*".to_string());
    lines.push(format!("Main Planter: {}", format_inr(summary.primary_total.raw)));
    if summary.supplementary_total.raw > 0.0 {
        lines.push(format!("Additional: {}", format_inr(summary.supplementary_total.raw)));
    }
    lines.push(format!("Subtotal: {}", format_inr(summary.subtotal.raw)));
    lines.push(format!("GST ({}%): {}", summary.tax_percent, format_inr(summary.tax_amount.raw)));
    lines.push(String::new());
    lines.push(format!("*GRAND TOTAL (Incl GST): {}*", format_inr(summary.grand_total)));
    lines.push(String::new());
    lines.push("Thank you for your business!".to_string());

    lines.join("\n")
}

fn dimension_lines(dims: &Dimensions, unit: LengthUnit) -> Vec<String> {
    match *dims {
        Dimensions::Square { length, width, height } => vec![
            format!("Length: {} {}", length, unit),
            format!("Width: {} {}", width, unit),
            format!("Height: {} {}", height, unit),
        ],
        Dimensions::Round { top_diameter, height } => vec![
            format!("Top Dia: {} {}", top_diameter, unit),
            format!("Height: {} {}", height, unit),
        ],
    }
}

fn line_figures(line: &LineSummary) -> Vec<String> {
    vec![
        format!("Qty: {}", line.quantity),
        format!("Total Sqft: {}", format_area(line.total_area.raw)),
        format!("Selected Thickness: {}", format_thickness(line.thickness)),
        format!("Per Piece Rate: {}", format_inr(line.rate.raw)),
        format!("Subtotal: {}", format_inr(line.total.raw)),
    ]
}

/// `wa.me` link for a message.
///
/// Non-digits are stripped from the phone number and the country code is
/// prefixed. Without a number the link lets the user pick a chat.
pub fn share_url(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let number = match digits.strip_prefix(COUNTRY_CODE) {
        Some(local) if local.len() == 10 => local.to_string(),
        _ => digits,
    };
    let encoded = urlencoding::encode(message);

    if number.is_empty() {
        format!("{}?text={}", WA_BASE_URL, encoded)
    } else {
        format!("{}{}{}?text={}", WA_BASE_URL, COUNTRY_CODE, number, encoded)
    }
}

/// Message and link for a summary, using the client's phone number.
pub fn share_summary(summary: &QuoteSummary) -> (String, String) {
    let message = build_message(summary);
    let url = share_url(&summary.client.phone_number, &message);
    (message, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PlanterShape, ThicknessTier};
    use crate::quotation::{ItemRef, Quotation};

    fn sample_summary() -> QuoteSummary {
        let mut quote = Quotation::new(PlanterShape::Square);
        quote.client.customer_name = "Asha".to_string();
        quote.client.project_name = "Terrace Garden".to_string();
        quote.client.phone_number = "98765 43210".to_string();
        quote.set_dimensions(ItemRef::Primary, Dimensions::square(24.0, 24.0, 12.0)).unwrap();
        quote.add_supplementary_item();
        quote.set_dimensions(ItemRef::Supplementary(0), Dimensions::square(12.0, 12.0, 12.0)).unwrap();
        quote.set_quantity(ItemRef::Supplementary(0), 3).unwrap();
        quote.set_selected_tier(ItemRef::Supplementary(0), ThicknessTier::Mm2_5).unwrap();
        quote.recalculate_all();
        quote.summary()
    }

    #[test]
    fn test_message_contents() {
        let summary = sample_summary();
        let message = build_message(&summary);

        assert!(message.starts_with("*Your Company Name*"));
        assert!(message.contains("*SQUARE PLANTER QUOTATION*"));
        assert!(message.contains("*Customer:* Asha"));
        assert!(message.contains("Length: 24 inch"));
        assert!(message.contains("Per Piece Rate: ₹ 16,692"));
        assert!(message.contains("Planter 1: L 12 inch, W 12 inch, H 12 inch, Qty 3, 2.5 mm"));
        assert!(message.contains("GST (18%)"));
        assert!(message.ends_with("Thank you for your business!"));
    }

    #[test]
    fn test_message_layout() {
        let message = build_message(&sample_summary());
        assert!(message.contains("*Project:* Terrace Garden\n\n*MAIN PLANTER:*\nLength: 24 inch"));
        assert!(message.contains("Subtotal: ₹ 16,692\n\n*ADDITIONAL PLANTERS:*\nPlanter 1:"));
        assert!(message.contains("\n\n*SUMMARY:*\nMain Planter: ₹ 16,692\nAdditional: "));
        assert!(!message.ends_with('\n'));
    }

    #[test]
    fn test_message_without_supplementary() {
        let mut quote = Quotation::new(PlanterShape::Round);
        quote.set_dimensions(ItemRef::Primary, Dimensions::round(18.0, 10.0)).unwrap();
        quote.recalculate_all();
        let message = build_message(&quote.summary());

        assert!(message.contains("*ROUND PLANTER QUOTATION*"));
        assert!(message.contains("Top Dia: 18 inch"));
        assert!(!message.contains("ADDITIONAL PLANTERS"));
        assert!(!message.contains("Additional:"));
    }

    #[test]
    fn test_share_url() {
        assert_eq!(share_url("", "hi there"), "https://wa.me/?text=hi%20there");
        assert_eq!(share_url("98765-43210", "a"), "https://wa.me/919876543210?text=a");
        assert_eq!(share_url("(+91) 98765 43210", "a"), "https://wa.me/919876543210?text=a");
        assert_eq!(share_url("no digits", "x"), "https://wa.me/?text=x");
    }

    #[test]
    fn test_share_summary_encodes_message() {
        let (message, url) = share_summary(&sample_summary());
        assert!(url.starts_with("https://wa.me/919876543210?text="));
        assert!(!url.contains('\n'));
        assert!(url.len() > message.len());
    }
}
