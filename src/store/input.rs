//! Request payloads accepted by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::core::{InvoiceStatus, LineItemInput, Numeric};

/// Payload for a new invoice. Numbers may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    /// Manual number; the next sequence number is used when absent.
    pub invoice_number: Option<String>,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    /// Invoice-level rate; absent or blank means per-item GST.
    pub tax_rate: Option<Numeric>,
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
    pub additional_terms: Option<String>,
}

/// Shallow patch of an invoice; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub description: Option<String>,
    /// Replaces all items and triggers re-pricing.
    pub items: Option<Vec<LineItemInput>>,
    /// `null` switches to per-item GST, a value to invoice-level tax.
    #[serde(default, deserialize_with = "double_option")]
    pub tax_rate: Option<Option<Numeric>>,
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
    pub additional_terms: Option<String>,
}

impl InvoicePatch {
    /// Whether applying the patch changes priced amounts.
    pub fn reprices(&self) -> bool {
        self.items.is_some() || self.tax_rate.is_some()
    }
}

/// Query filter for invoice listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    /// Case-insensitive match on number, client name or description.
    pub search: Option<String>,
}

impl InvoiceFilter {
    pub fn status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            search: None,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            status: None,
            search: Some(term.into()),
        }
    }
}

/// Payload for a new client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
}

/// Shallow patch of a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub gstin: Option<Option<String>>,
}

/// Shallow patch of the company profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gstin: Option<String>,
    pub state: Option<String>,
    pub bank_name: Option<String>,
    pub account_no: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_holder: Option<String>,
    /// `null` removes the logo.
    #[serde(default, deserialize_with = "double_option")]
    pub logo: Option<Option<String>>,
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
