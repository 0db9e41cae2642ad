//! Line-item pricing and invoice aggregation.
//!
//! All functions are pure: the same items and policy always produce the
//! same totals. Nothing is rounded here; see [`super::format`] for display.
//!
//! ```
//! use gst_invoicing::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Site visit", dec!(2), dec!(100)).build(),
//!     LineItemBuilder::new("Report", dec!(1), dec!(50)).build(),
//! ];
//! let totals = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18))).unwrap();
//! assert_eq!(totals.subtotal, dec!(250));
//! assert_eq!(totals.tax_amount, dec!(45));
//! assert_eq!(totals.total, dec!(295));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::InvoiceError;
use super::numeric::{NumericMode, clamp_percentage};
use super::types::*;
use super::validation::{validate_line_items, validate_tax_policy};

const HUNDRED: Decimal = dec!(100);

/// `quantity * rate`, or `area * rate` when an area greater than zero is
/// present. Negative inputs count as zero.
pub fn compute_item_amount(item: &LineItem) -> Result<Decimal, InvoiceError> {
    item_amount(item, 0)
}

/// Tax owed on a single item. Zero under invoice-level mode, where tax is
/// charged once on the subtotal instead.
pub fn compute_item_tax(item: &LineItem, policy: &TaxPolicy) -> Result<Decimal, InvoiceError> {
    item_tax(item, item_amount(item, 0)?, policy, 0)
}

/// Subtotal, tax and total for `items` under `policy`.
///
/// Lenient about values: negatives count as zero and rates are clamped to
/// `0..=100`. An empty list yields [`InvoiceTotals::ZERO`]. The only error
/// is [`InvoiceError::Arithmetic`], when a sum leaves the `Decimal` range.
pub fn compute_invoice_totals(
    items: &[LineItem],
    policy: &TaxPolicy,
) -> Result<InvoiceTotals, InvoiceError> {
    price_items(items, policy).map(|p| p.totals)
}

/// Price every item and aggregate, lenient.
pub fn price_items(items: &[LineItem], policy: &TaxPolicy) -> Result<Pricing, InvoiceError> {
    let mut priced = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;
    let mut item_tax_sum = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let amount = item_amount(item, index)?;
        let gst_amount = item_tax(item, amount, policy, index)?;
        subtotal = checked(subtotal.checked_add(amount), index, "subtotal")?;
        item_tax_sum = checked(item_tax_sum.checked_add(gst_amount), index, "totalGst")?;
        priced.push(PricedLineItem {
            item: item.clone(),
            amount,
            gst_amount,
        });
    }

    let tax_amount = match policy {
        TaxPolicy::InvoiceLevel { rate } => subtotal
            .checked_mul(clamp_percentage(*rate) / HUNDRED)
            .ok_or_else(|| InvoiceError::Arithmetic("invoice tax overflows".into()))?,
        TaxPolicy::PerItem => item_tax_sum,
    };
    let total = subtotal
        .checked_add(tax_amount)
        .ok_or_else(|| InvoiceError::Arithmetic("invoice total overflows".into()))?;

    Ok(Pricing {
        items: priced,
        totals: InvoiceTotals {
            subtotal,
            tax_amount,
            total,
        },
    })
}

/// Strict counterpart of [`price_items`].
///
/// Every item and the policy are validated before anything is computed, so
/// either a complete [`Pricing`] or a single error comes back.
pub fn try_price_items(items: &[LineItem], policy: &TaxPolicy) -> Result<Pricing, InvoiceError> {
    validate_tax_policy(policy)?;
    validate_line_items(items)?;
    price_items(items, policy)
}

/// Strict counterpart of [`compute_invoice_totals`].
pub fn try_compute_invoice_totals(
    items: &[LineItem],
    policy: &TaxPolicy,
) -> Result<InvoiceTotals, InvoiceError> {
    try_price_items(items, policy).map(|p| p.totals)
}

/// Price under the given numeric mode.
pub fn price(
    items: &[LineItem],
    policy: &TaxPolicy,
    mode: NumericMode,
) -> Result<Pricing, InvoiceError> {
    match mode {
        NumericMode::Lenient => price_items(items, policy),
        NumericMode::Strict => try_price_items(items, policy),
    }
}

fn item_amount(item: &LineItem, index: usize) -> Result<Decimal, InvoiceError> {
    let measure = match item.basis() {
        BillingBasis::Area => item.area.map_or(Decimal::ZERO, floor_zero),
        BillingBasis::Quantity => floor_zero(item.quantity),
    };
    checked(measure.checked_mul(floor_zero(item.rate)), index, "amount")
}

// Rate is scaled first: `amount * rate` can overflow where the tax itself fits.
fn item_tax(
    item: &LineItem,
    amount: Decimal,
    policy: &TaxPolicy,
    index: usize,
) -> Result<Decimal, InvoiceError> {
    match policy {
        TaxPolicy::PerItem => {
            let rate = item.tax_rate.map_or(Decimal::ZERO, clamp_percentage) / HUNDRED;
            checked(amount.checked_mul(rate), index, "gstAmount")
        }
        TaxPolicy::InvoiceLevel { .. } => Ok(Decimal::ZERO),
    }
}

fn floor_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

fn checked(value: Option<Decimal>, index: usize, what: &str) -> Result<Decimal, InvoiceError> {
    value.ok_or_else(|| InvoiceError::Arithmetic(format!("{what} overflows at item #{index}")))
}
