use thiserror::Error;

/// Errors that can occur while pricing or building an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A line item carries a value the strict numeric mode refuses.
    #[error("invalid line item #{index}: {field} {reason}")]
    InvalidLineItem {
        /// Zero-based position of the item in the input list.
        index: usize,
        /// Offending field (`quantity`, `area`, `rate`, `taxRate`, `description`).
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Invoice-level tax rate outside 0..=100 or not a number.
    #[error("invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Checked arithmetic overflowed.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl InvoiceError {
    pub(crate) fn line(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidLineItem {
            index,
            field,
            reason: reason.into(),
        }
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items.2.amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join validation errors into a single [`InvoiceError::Validation`].
pub fn validation_failure(errors: &[ValidationError]) -> InvoiceError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    InvoiceError::Validation(msg)
}
