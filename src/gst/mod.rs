//! GST helpers: GSTIN validation, state codes and the CGST/SGST/IGST split.
//!
//! # Example
//!
//! ```
//! use gst_invoicing::gst::*;
//! use rust_decimal_macros::dec;
//!
//! let gstin = validate_gstin("27AAPFU0939F1ZV").unwrap();
//! assert_eq!(gstin.state_name(), Some("Maharashtra"));
//!
//! let split = split_tax(dec!(108), supply_kind("27", "27"));
//! assert_eq!(split.cgst, dec!(54));
//! assert_eq!(split.sgst, dec!(54));
//! ```

mod gstin;
mod split;
mod states;

pub use gstin::{Gstin, GstinFormatError, gstin_check_char, validate_gstin};
pub use split::{GstSplit, SupplyKind, split_tax, supply_kind};
pub use states::{is_known_state_code, state_name};
