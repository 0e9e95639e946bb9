//! # Export
//!
//! Collaborators that turn a [`QuoteSummary`](crate::quotation::QuoteSummary)
//! into something a customer receives. Nothing here feeds back into pricing.
//!
//! - [`format`] - rupee amounts with Indian digit grouping, dimension labels
//! - [`whatsapp`] - message text and `wa.me` share link
//! - [`pdf`] - Typst-rendered PDF quotation

pub mod format;
pub mod pdf;
pub mod whatsapp;

pub use format::format_inr;
pub use pdf::render_quotation_pdf;
pub use whatsapp::{build_message, share_url};
