use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceStatus};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_invoices: usize,
    /// Sum of totals of paid invoices.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Sum of totals of sent, unpaid invoices.
    #[serde(with = "rust_decimal::serde::float")]
    pub pending_amount: Decimal,
    pub overdue_invoices: usize,
}

impl DashboardStats {
    pub fn compute(invoices: &[Invoice], now: DateTime<Utc>) -> Self {
        let sum_by = |status: InvoiceStatus| -> Decimal {
            invoices
                .iter()
                .filter(|inv| inv.status == status)
                .fold(Decimal::ZERO, |acc, inv| acc.saturating_add(inv.total))
        };

        Self {
            total_invoices: invoices.len(),
            total_revenue: sum_by(InvoiceStatus::Paid),
            pending_amount: sum_by(InvoiceStatus::Sent),
            overdue_invoices: invoices.iter().filter(|inv| inv.is_overdue(now)).count(),
        }
    }
}
