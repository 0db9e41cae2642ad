//! CSV register of invoices.
//!
//! One header row, then one row per invoice. Comma separators, CRLF line
//! endings, text fields always quoted, amounts with a dot and two decimals.

use rust_decimal::Decimal;

use crate::core::{Invoice, round_display};

/// Column names of [`invoices_to_csv`].
pub const CSV_HEADER: [&str; 8] = [
    "invoiceNumber",
    "clientName",
    "status",
    "createdAt",
    "dueDate",
    "subtotal",
    "tax",
    "total",
];

/// Export invoices as a CSV register.
pub fn invoices_to_csv<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push_str("\r\n");

    for inv in invoices {
        csv_field_str(&mut out, &inv.invoice_number);
        out.push(',');
        csv_field_str(&mut out, &inv.client_name);
        out.push(',');
        out.push_str(inv.status.as_str());
        out.push(',');
        out.push_str(&inv.created_at.format("%Y-%m-%d").to_string());
        out.push(',');
        out.push_str(&inv.due_date.format("%Y-%m-%d").to_string());
        out.push(',');
        csv_field_decimal(&mut out, inv.subtotal);
        out.push(',');
        csv_field_decimal(&mut out, inv.total_gst);
        out.push(',');
        csv_field_decimal(&mut out, inv.total);
        out.push_str("\r\n");
    }
    out
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn csv_field_decimal(out: &mut String, d: Decimal) {
    out.push_str(&format!("{:.2}", round_display(d, 2)));
}
