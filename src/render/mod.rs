//! Presentation of stored invoices: printable HTML (askama templates) and a
//! CSV register.
//!
//! Rounding happens here and only here, through
//! [`CurrencyFormat`](crate::core::CurrencyFormat).

mod csv;
mod html;

pub use csv::{CSV_HEADER, invoices_to_csv};
pub use html::render_invoice_html;
