//! # PDF Quotation
//!
//! Renders a [`QuoteSummary`] to PDF bytes using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is an embedded string constant
//! - Data is injected by placeholder replacement before compilation
//! - Fonts come from `typst-assets` and are loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::export::pdf::render_quotation_pdf;
//! use quote_core::pricing::{Dimensions, PlanterShape};
//! use quote_core::quotation::{ItemRef, Quotation};
//!
//! let mut quote = Quotation::new(PlanterShape::Square);
//! quote.set_dimensions(ItemRef::Primary, Dimensions::square(24.0, 24.0, 12.0)).unwrap();
//! quote.recalculate_all();
//!
//! let summary = quote.summary();
//! let pdf_bytes = render_quotation_pdf(&summary).unwrap();
//! std::fs::write(summary.pdf_file_name(), pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::info;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use super::format::{format_area, format_dimensions, format_inr, format_thickness};
use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::Dimensions;
use crate::quotation::{LineSummary, QuoteSummary};
use crate::units::LengthUnit;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling one in-memory document.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for a planter quotation
const QUOTATION_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 8pt, fill: gray)[{{COMPANY}}]],
      align(right)[#text(size: 8pt, fill: gray)[Page #counter(page).display()]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

#align(right)[#text(size: 9pt)[Date: {{DATE}}]]

#align(center)[
  #text(size: 18pt, weight: "bold")[{{COMPANY}}]
  #v(4pt)
  #block(width: 100%, fill: rgb("#eef5ee"), inset: 10pt, radius: 4pt)[
    #text(size: 13pt, weight: "bold")[{{TITLE}}]
  ]
]

#v(8pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 2pt,
  [*Customer:*], [{{CUSTOMER}}],
  [*Project:*], [{{PROJECT}}],
  [*Phone:*], [{{PHONE}}],
)

#v(8pt)

== Main Planter

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Item*], [*Value*]),
{{PRIMARY_ROWS}}
)

{{SUPPLEMENTARY_SECTION}}

#v(8pt)

== Summary

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right),
  [Main Planter Total], [{{PRIMARY_TOTAL}}],
{{ADDITIONAL_ROW}}
  [Subtotal], [{{SUBTOTAL}}],
  [GST ({{TAX_PERCENT}}%)], [{{TAX_AMOUNT}}],
  table.cell(fill: rgb("#eef5ee"))[*Grand Total (Incl GST)*],
  table.cell(fill: rgb("#eef5ee"))[*{{GRAND_TOTAL}}*],
)

#v(16pt)

#text(size: 9pt, fill: gray)[
  Rates are per piece and include die (mold) cost amortized over the quantity.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a quotation summary to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(QuoteError)` - If Typst compilation or PDF export fails
pub fn render_quotation_pdf(summary: &QuoteSummary) -> QuoteResult<Vec<u8>> {
    let source = build_source(summary);

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render_failed("typst compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render_failed("pdf export", error_msgs.join("; "))
    })?;

    info!(
        bytes = pdf_bytes.len(),
        lines = 1 + summary.supplementary.len(),
        "rendered quotation pdf"
    );
    Ok(pdf_bytes)
}

/// Fill the template with the summary's data.
fn build_source(summary: &QuoteSummary) -> String {
    let client = &summary.client;

    let additional_row = if summary.has_supplementary() {
        format!(
            "  [Additional Planters Total], [{}],",
            format_inr(summary.supplementary_total.raw)
        )
    } else {
        String::new()
    };

    let values = [
        ("COMPANY", escape_typst(&client.company_name)),
        ("DATE", summary.generated.format("%d-%m-%Y").to_string()),
        ("TITLE", format!("{} Quotation", summary.shape.display_name())),
        ("CUSTOMER", escape_typst(&client.customer_name)),
        ("PROJECT", escape_typst(&client.project_name)),
        ("PHONE", escape_typst(&client.phone_number)),
        ("PRIMARY_ROWS", build_primary_rows(&summary.primary, summary.unit)),
        ("SUPPLEMENTARY_SECTION", build_supplementary_section(summary)),
        ("PRIMARY_TOTAL", format_inr(summary.primary_total.raw)),
        ("ADDITIONAL_ROW", additional_row),
        ("SUBTOTAL", format_inr(summary.subtotal.raw)),
        ("TAX_PERCENT", summary.tax_percent.to_string()),
        ("TAX_AMOUNT", format_inr(summary.tax_amount.raw)),
        ("GRAND_TOTAL", format_inr(summary.grand_total)),
    ];
    fill_template(QUOTATION_TEMPLATE, &values)
}

/// Replace each `{{KEY}}` in one pass. Inserted values are never rescanned,
/// and unknown keys are copied as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let found = tail[2..].find("}}").and_then(|end| {
            let key = &tail[2..2 + end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end + 4))
        });
        match found {
            Some((value, len)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '/' => "\\/".to_string(),
            '~' => "\\~".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Rows for the main planter table
fn build_primary_rows(line: &LineSummary, unit: LengthUnit) -> String {
    let mut rows: Vec<(String, String)> = match line.dimensions {
        Dimensions::Square { length, width, height } => vec![
            ("Length".to_string(), format!("{} {}", length, unit)),
            ("Width".to_string(), format!("{} {}", width, unit)),
            ("Height".to_string(), format!("{} {}", height, unit)),
        ],
        Dimensions::Round { top_diameter, height } => vec![
            ("Top Diameter".to_string(), format!("{} {}", top_diameter, unit)),
            ("Height".to_string(), format!("{} {}", height, unit)),
        ],
    };
    rows.push(("Quantity".to_string(), line.quantity.to_string()));
    rows.push(("Total Sqft".to_string(), format_area(line.total_area.raw)));
    rows.push(("Selected Thickness".to_string(), format_thickness(line.thickness)));
    rows.push(("Per Piece Rate".to_string(), format_inr(line.rate.raw)));
    rows.push(("Main Planter Total".to_string(), format_inr(line.total.raw)));

    rows.iter()
        .map(|(label, value)| format!("  [{}], [{}],", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table of additional planters, or nothing when there are none
fn build_supplementary_section(summary: &QuoteSummary) -> String {
    if !summary.has_supplementary() {
        return String::new();
    }

    let rows = summary
        .supplementary
        .iter()
        .map(|line| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}], [{}],",
                line.label,
                format_dimensions(&line.dimensions, summary.unit),
                line.quantity,
                format_thickness(line.thickness),
                format_inr(line.rate.raw),
                format_inr(line.total.raw),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"
#v(8pt)

== Additional Planters

#table(
  columns: (auto, 1fr, auto, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, left, right, right, right, right),
  table.header([*No.*], [*Size*], [*Qty*], [*Thickness*], [*Rate*], [*Total*]),
{rows}
)
"##,
        rows = rows
    )
}
