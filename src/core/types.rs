use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::numeric::clamp_percentage;

/// One billable row on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What is being billed. Required to be non-empty in strict mode.
    pub description: String,
    /// Billed count when no area is given.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Billed area; takes precedence over `quantity` when greater than zero.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub area: Option<Decimal>,
    /// Price per unit (or per unit of area).
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Per-item GST percentage, only read under [`TaxPolicy::PerItem`].
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub tax_rate: Option<Decimal>,
}

impl LineItem {
    /// Which measure the item is billed on.
    pub fn basis(&self) -> BillingBasis {
        match self.area {
            Some(area) if area > Decimal::ZERO => BillingBasis::Area,
            _ => BillingBasis::Quantity,
        }
    }
}

/// Measure a line item's amount is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingBasis {
    /// `quantity * rate`
    Quantity,
    /// `area * rate`
    Area,
}

/// How tax is applied to an invoice. Exactly one mode per computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TaxPolicy {
    /// A single percentage applied once to the subtotal.
    InvoiceLevel {
        #[serde(with = "rust_decimal::serde::float")]
        rate: Decimal,
    },
    /// Every item's own `tax_rate` applied to its amount.
    PerItem,
}

impl TaxPolicy {
    pub fn invoice_level(rate: Decimal) -> Self {
        Self::InvoiceLevel { rate }
    }

    /// Policy implied by a stored invoice: a recorded invoice-level rate
    /// selects invoice-level mode, otherwise items carry their own GST.
    pub fn from_invoice_rate(rate: Option<Decimal>) -> Self {
        match rate {
            Some(rate) => Self::InvoiceLevel { rate },
            None => Self::PerItem,
        }
    }

    /// The invoice-level rate, if this is invoice-level mode.
    pub fn invoice_rate(&self) -> Option<Decimal> {
        match self {
            Self::InvoiceLevel { rate } => Some(*rate),
            Self::PerItem => None,
        }
    }
}

/// Subtotal, tax and grand total of a set of line items.
///
/// Values are unrounded; `total == subtotal + tax_amount` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl InvoiceTotals {
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        self.subtotal.is_zero() && self.tax_amount.is_zero() && self.total.is_zero()
    }
}

/// A line item together with its computed amount and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
    #[serde(flatten)]
    pub item: LineItem,
    /// `(area > 0 ? area : quantity) * rate`, unrounded.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Item tax; zero under invoice-level mode.
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,
}

/// Result of pricing a list of line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub items: Vec<PricedLineItem>,
    pub totals: InvoiceTotals,
}

impl Pricing {
    /// No line items were priced. Informational only: zero totals are valid.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Parse from the lowercase wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored invoice record with its frozen totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub description: String,
    pub items: Vec<PricedLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    /// Invoice-level rate; absent when items carry their own GST.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub tax_rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gst: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub notes: String,
    pub delivery_terms: String,
    pub payment_terms: String,
    pub additional_terms: String,
}

impl Invoice {
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy::from_invoice_rate(self.tax_rate)
    }

    /// The totals frozen into this record.
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            tax_amount: self.total_gst,
            total: self.total,
        }
    }

    /// Replace items and totals with a fresh pricing result.
    ///
    /// The stored invoice-level rate is the one pricing charged, clamped to
    /// `0..=100`.
    pub fn apply_pricing(&mut self, pricing: Pricing, policy: TaxPolicy) {
        self.subtotal = pricing.totals.subtotal;
        self.total_gst = pricing.totals.tax_amount;
        self.total = pricing.totals.total;
        self.tax_rate = policy.invoice_rate().map(clamp_percentage);
        self.items = pricing.items;
    }

    /// Raw line items without their computed amounts.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(|p| p.item.clone()).collect()
    }

    /// Explicitly marked overdue, or sent and past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            InvoiceStatus::Overdue => true,
            InvoiceStatus::Sent => now > self.due_date,
            _ => false,
        }
    }
}

/// A customer invoices are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Client's GSTIN, used to decide intra- vs inter-state supply.
    pub gstin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Issuing company profile printed on every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub gstin: String,
    pub state: String,
    pub bank_name: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub account_holder: String,
    /// Base64 data URL of the logo image.
    pub logo: Option<String>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: "YOUR ENGINEERING COMPANY".into(),
            tagline: "Professional Engineering Solutions".into(),
            address: "Your Company Address\nCity, State - PIN Code".into(),
            phone: "Your Phone Number".into(),
            email: "your.email@company.com".into(),
            gstin: "Your GSTIN Number".into(),
            state: "Your State Code".into(),
            bank_name: "Your Bank Name".into(),
            account_no: "Your Account Number".into(),
            ifsc_code: "Your IFSC Code".into(),
            account_holder: "Your Company Name".into(),
            logo: None,
        }
    }
}
