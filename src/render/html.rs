//! Printable HTML invoice, rendered through the `templates/invoice.html`
//! askama template. Everything user-supplied is escaped by the template.

use askama::Template;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{
    BillingBasis, Client, CompanySettings, CurrencyFormat, Invoice, TaxPolicy, format_percent,
};
use crate::gst::{GstSplit, SupplyKind, split_tax, supply_kind, validate_gstin};

#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoicePage<'a> {
    invoice: &'a Invoice,
    company: &'a CompanySettings,
    logo: &'a str,
    company_address: Vec<&'a str>,
    created: String,
    due: String,
    client_address: Vec<&'a str>,
    client_email: &'a str,
    client_gstin: &'a str,
    description: Vec<&'a str>,
    per_item: bool,
    rows: Vec<ItemRow<'a>>,
    totals: Vec<TotalRow>,
    terms: Vec<Term<'a>>,
    notes: Vec<&'a str>,
}

struct ItemRow<'a> {
    position: usize,
    description: &'a str,
    quantity: String,
    area: String,
    rate: String,
    gst: String,
    amount: String,
}

struct TotalRow {
    class: &'static str,
    label: String,
    value: String,
}

struct Term<'a> {
    label: &'static str,
    text: &'a str,
}

/// Render a self-contained, printable HTML page for `invoice`.
///
/// When the company GSTIN is valid, the GST total is split into CGST and
/// SGST (same state as the client's GSTIN, or client unregistered) or IGST.
pub fn render_invoice_html(
    invoice: &Invoice,
    company: &CompanySettings,
    client: Option<&Client>,
    fmt: &CurrencyFormat,
) -> Result<String, askama::Error> {
    let per_item = invoice.tax_policy() == TaxPolicy::PerItem;

    let page = InvoicePage {
        invoice,
        company,
        logo: company.logo.as_deref().unwrap_or_default(),
        company_address: lines(&company.address),
        created: invoice.created_at.format("%d/%m/%Y").to_string(),
        due: invoice.due_date.format("%d/%m/%Y").to_string(),
        client_address: invoice.client_address.as_deref().map(lines).unwrap_or_default(),
        client_email: invoice.client_email.as_deref().unwrap_or_default(),
        client_gstin: client.and_then(|c| c.gstin.as_deref()).unwrap_or_default(),
        description: lines(&invoice.description),
        per_item,
        rows: item_rows(invoice, fmt),
        totals: total_rows(invoice, company, client, fmt),
        terms: [
            ("Delivery", &invoice.delivery_terms),
            ("Payment", &invoice.payment_terms),
            ("Note", &invoice.additional_terms),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(label, text)| Term { label, text })
        .collect(),
        notes: lines(&invoice.notes),
    };
    page.render()
}

fn item_rows<'a>(invoice: &'a Invoice, fmt: &CurrencyFormat) -> Vec<ItemRow<'a>> {
    invoice
        .items
        .iter()
        .enumerate()
        .map(|(i, priced)| {
            let item = &priced.item;
            let (quantity, area) = match item.basis() {
                BillingBasis::Area => ("-".to_string(), number(item.area.unwrap_or_default())),
                BillingBasis::Quantity => (number(item.quantity), "-".to_string()),
            };
            ItemRow {
                position: i + 1,
                description: &item.description,
                quantity,
                area,
                rate: fmt.format(item.rate),
                gst: format!(
                    "{} ({})",
                    fmt.format(priced.gst_amount),
                    format_percent(item.tax_rate.unwrap_or_default())
                ),
                amount: fmt.format(priced.amount),
            }
        })
        .collect()
}

fn total_rows(
    invoice: &Invoice,
    company: &CompanySettings,
    client: Option<&Client>,
    fmt: &CurrencyFormat,
) -> Vec<TotalRow> {
    let row = |class: &'static str, label: String, value: Decimal| TotalRow {
        class,
        label,
        value: fmt.format(value),
    };

    let rate = invoice.tax_rate;
    let tax_label = match rate {
        Some(rate) => format!("GST ({})", format_percent(rate)),
        None => "GST".to_string(),
    };

    let mut rows = vec![
        row("row", "Subtotal".into(), invoice.subtotal),
        row("row", tax_label, invoice.total_gst),
    ];

    if let Some((kind, split)) = gst_split(invoice, company, client) {
        match kind {
            SupplyKind::IntraState => {
                let suffix = rate
                    .map(|r| format!(" ({})", format_percent(r / dec!(2))))
                    .unwrap_or_default();
                rows.push(row("row split", format!("CGST{suffix}"), split.cgst));
                rows.push(row("row split", format!("SGST{suffix}"), split.sgst));
            }
            SupplyKind::InterState => {
                let suffix = rate
                    .map(|r| format!(" ({})", format_percent(r)))
                    .unwrap_or_default();
                rows.push(row("row split", format!("IGST{suffix}"), split.igst));
            }
        }
    }

    rows.push(row("row grand", "Total Amount".into(), invoice.total));
    rows
}

/// Split the invoice tax when the seller has a valid GSTIN.
fn gst_split(
    invoice: &Invoice,
    company: &CompanySettings,
    client: Option<&Client>,
) -> Option<(SupplyKind, GstSplit)> {
    let seller = validate_gstin(&company.gstin).ok()?;
    let buyer_state = client
        .and_then(|c| c.gstin.as_deref())
        .and_then(|g| validate_gstin(g).ok())
        .map(|g| g.state_code().to_string())
        .unwrap_or_default();
    let kind = supply_kind(seller.state_code(), &buyer_state);
    Some((kind, split_tax(invoice.total_gst, kind)))
}

fn number(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Lines of a free-text field; empty when the field is blank.
fn lines(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.lines().collect()
}
