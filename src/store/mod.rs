//! In-memory record keeping for invoices, clients and the company profile.
//!
//! The store turns loosely-typed request payloads into priced [`Invoice`]s,
//! assigns invoice numbers and keeps the dashboard figures. Nothing is
//! persisted.
//!
//! [`Invoice`]: crate::core::Invoice

mod dashboard;
mod input;
mod memory;

pub use dashboard::DashboardStats;
pub use input::{ClientPatch, CompanyPatch, InvoiceFilter, InvoicePatch, NewClient, NewInvoice};
pub use memory::{InvoiceStore, StoreOptions};

use uuid::Uuid;

use crate::core::InvoiceError;

/// Errors returned by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}
