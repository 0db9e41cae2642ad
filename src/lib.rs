//! # gst-invoicing
//!
//! Invoice line-item pricing with GST: amounts per item, subtotal, tax and
//! grand total, plus the record keeping around it (clients, company
//! profile, invoice numbering, printable output and a JSON API).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The engine never rounds; rounding is a display concern.
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_invoicing::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Site inspection", dec!(2), dec!(100)).build(),
//!     LineItemBuilder::new("Report", dec!(1), dec!(50)).build(),
//! ];
//! let totals = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18)))?;
//!
//! assert_eq!(totals.subtotal, dec!(250));
//! assert_eq!(totals.tax_amount, dec!(45));
//! assert_eq!(totals.total, dec!(295));
//! assert_eq!(format_currency(totals.total), "₹295.00");
//! # Ok::<(), InvoiceError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Pricing engine, numeric coercion, records, builders, numbering, validation |
//! | `gst` | GSTIN validation, state codes, CGST/SGST/IGST split |
//! | `store` | In-memory invoices, clients, company profile, dashboard |
//! | `render` | Printable HTML invoice (askama template), CSV register |
//! | `server` | axum JSON API and the `gst-invoicing` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "gst")]
pub mod gst;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "server")]
pub mod server;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
