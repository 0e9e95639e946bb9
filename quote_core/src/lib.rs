//! # quote_core - FRP Planter Quotation Engine
//!
//! `quote_core` prices custom fiberglass-reinforced-plastic planters for a
//! small fabrication shop. Dimensions, quantity and wall thickness go in;
//! surface area, die (mold) cost, tiered unit rates and a GST-inclusive grand
//! total come out.
//!
//! ## Design Philosophy
//!
//! - **Pure pricing**: the pipeline never fails; blank or invalid dimensions
//!   price at zero, and quantity is floored to 1 before any division
//! - **Raw and display figures**: every computed value keeps the unrounded
//!   number that later formulas use alongside the rounded one customers see
//! - **Versioned formulas**: rounding and circumference choices are explicit
//!   [`pricing::FormulaPolicy`] inputs
//! - **JSON-First**: inputs, summaries and errors are all serde types
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::pricing::{Dimensions, PlanterShape, ThicknessTier};
//! use quote_core::quotation::{ItemRef, Quotation};
//!
//! let mut quote = Quotation::new(PlanterShape::Square);
//! quote.set_dimensions(ItemRef::Primary, Dimensions::square(24.0, 24.0, 12.0)).unwrap();
//! quote.set_selected_tier(ItemRef::Primary, ThicknessTier::Mm1_5).unwrap();
//! quote.recalculate_all();
//!
//! assert_eq!(quote.grand_total(), 19697.0);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - inch/cm/mm input units and length/area newtypes
//! - [`pricing`] - geometry, die cost, thickness tiers and formula policies
//! - [`quotation`] - line items, the quotation container and its totals
//! - [`export`] - PDF and WhatsApp collaborators
//! - [`auth`] - shared-PIN access gate with explicit session tokens
//! - [`config`] - business settings loaded from JSON
//! - [`errors`] - structured error types

pub mod auth;
pub mod config;
pub mod errors;
pub mod export;
pub mod pricing;
pub mod quotation;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use auth::{AccessGate, Route, SessionToken};
pub use config::QuoteConfig;
pub use errors::{QuoteError, QuoteResult};
pub use pricing::{Dimensions, FormulaPolicy, PlanterShape, ThicknessTier};
pub use quotation::{calculate, ItemRef, QuoteInput, QuoteSummary, Quotation};
pub use units::LengthUnit;
