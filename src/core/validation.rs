use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::ValidateEmail;

use super::error::{InvoiceError, ValidationError};
use super::pricing::price_items;
use super::types::*;

/// Strict check of a single line item.
pub fn validate_line_item(item: &LineItem, index: usize) -> Result<(), InvoiceError> {
    if item.description.trim().is_empty() {
        return Err(InvoiceError::line(index, "description", "must not be empty"));
    }
    if item.quantity < Decimal::ZERO {
        return Err(InvoiceError::line(
            index,
            "quantity",
            format!("must not be negative (got {})", item.quantity),
        ));
    }
    if item.area.is_some_and(|area| area < Decimal::ZERO) {
        let area = item.area.unwrap_or_default();
        return Err(InvoiceError::line(
            index,
            "area",
            format!("must not be negative (got {area})"),
        ));
    }
    if item.rate < Decimal::ZERO {
        return Err(InvoiceError::line(
            index,
            "rate",
            format!("must not be negative (got {})", item.rate),
        ));
    }
    if item.tax_rate.is_some_and(|rate| !is_percentage(rate)) {
        let rate = item.tax_rate.unwrap_or_default();
        return Err(InvoiceError::line(
            index,
            "taxRate",
            format!("must be between 0 and 100 (got {rate})"),
        ));
    }
    Ok(())
}

/// Strict check of every item; the first failure wins.
pub fn validate_line_items(items: &[LineItem]) -> Result<(), InvoiceError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| validate_line_item(item, i))
}

/// Invoice-level rates must be percentages.
pub fn validate_tax_policy(policy: &TaxPolicy) -> Result<(), InvoiceError> {
    match policy {
        TaxPolicy::InvoiceLevel { rate } if !is_percentage(*rate) => Err(
            InvoiceError::InvalidTaxRate(format!("{rate} is outside 0..=100")),
        ),
        _ => Ok(()),
    }
}

/// Validate a stored invoice record: header, items and arithmetic.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = validate_header(invoice);

    if let Err(e) = validate_tax_policy(&invoice.tax_policy()) {
        errors.push(ValidationError::new("taxRate", e.to_string()));
    }

    for (i, priced) in invoice.items.iter().enumerate() {
        if let Err(e) = validate_line_item(&priced.item, i) {
            errors.push(ValidationError::new(format!("items.{i}"), e.to_string()));
        }
    }

    errors.extend(validate_arithmetic(invoice));
    errors
}

/// Checks that do not depend on line items: number, client, dates.
pub fn validate_header(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.invoice_number.trim().is_empty() {
        errors.push(ValidationError::new(
            "invoiceNumber",
            "invoice number must not be empty",
        ));
    }

    if invoice.client_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "clientName",
            "client name must not be empty",
        ));
    }

    let email = invoice.client_email.as_deref().unwrap_or("").trim();
    if !email.is_empty() && !email.validate_email() {
        errors.push(ValidationError::new(
            "clientEmail",
            format!("'{email}' is not a valid email address"),
        ));
    }

    if invoice.due_date < invoice.created_at {
        errors.push(ValidationError::new(
            "dueDate",
            "due date must not be before the creation date",
        ));
    }

    errors
}

/// Check the frozen amounts of an invoice against a fresh computation.
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let expected = match price_items(&invoice.line_items(), &invoice.tax_policy()) {
        Ok(expected) => expected,
        Err(e) => {
            errors.push(ValidationError::new("total", e.to_string()));
            return errors;
        }
    };

    for (i, (stored, fresh)) in invoice.items.iter().zip(&expected.items).enumerate() {
        if stored.amount != fresh.amount {
            errors.push(ValidationError::new(
                format!("items.{i}.amount"),
                format!(
                    "amount {} does not match computed {}",
                    stored.amount, fresh.amount
                ),
            ));
        }
        if stored.gst_amount != fresh.gst_amount {
            errors.push(ValidationError::new(
                format!("items.{i}.gstAmount"),
                format!(
                    "GST amount {} does not match computed {}",
                    stored.gst_amount, fresh.gst_amount
                ),
            ));
        }
    }

    let totals = expected.totals;
    if invoice.subtotal != totals.subtotal {
        errors.push(ValidationError::new(
            "subtotal",
            format!(
                "subtotal {} does not match sum of line amounts {}",
                invoice.subtotal, totals.subtotal
            ),
        ));
    }
    if invoice.total_gst != totals.tax_amount {
        errors.push(ValidationError::new(
            "totalGst",
            format!(
                "tax {} does not match computed {}",
                invoice.total_gst, totals.tax_amount
            ),
        ));
    }
    if invoice.subtotal.checked_add(invoice.total_gst) != Some(invoice.total) {
        errors.push(ValidationError::new(
            "total",
            format!(
                "total {} does not match subtotal {} + tax {}",
                invoice.total, invoice.subtotal, invoice.total_gst
            ),
        ));
    }

    errors
}

/// Validate a client record: a name and a well-formed email are required.
pub fn validate_client(client: &Client) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if client.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "client name must not be empty"));
    }
    if client.email.trim().is_empty() {
        errors.push(ValidationError::new("email", "email must not be empty"));
    } else if !client.email.trim().validate_email() {
        errors.push(ValidationError::new(
            "email",
            format!("'{}' is not a valid email address", client.email),
        ));
    }
    errors
}

fn is_percentage(rate: Decimal) -> bool {
    (Decimal::ZERO..=dec!(100)).contains(&rate)
}
