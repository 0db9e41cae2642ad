//! Pricing engine, invoice records, builders, numbering and validation.
//!
//! Line items plus a [`TaxPolicy`] go in, [`InvoiceTotals`] come out. The
//! engine is pure and never rounds; [`format_currency`] rounds for display.

mod builder;
mod error;
mod format;
mod numbering;
pub mod numeric;
mod pricing;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use format::*;
pub use numbering::*;
pub use numeric::{
    LineItemInput, Numeric, NumericMode, parse_decimal, resolve_items, resolve_tax_policy,
};
pub use pricing::*;
pub use types::*;
pub use validation::*;
