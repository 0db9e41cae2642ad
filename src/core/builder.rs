use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::{InvoiceError, validation_failure};
use super::numeric::NumericMode;
use super::pricing;
use super::types::*;
use super::validation;

/// Days between creation and the default due date.
pub const DEFAULT_DUE_DAYS: i64 = 30;
pub const DEFAULT_DELIVERY_TERMS: &str = "Within 20-30 days";
pub const DEFAULT_PAYMENT_TERMS: &str = "100% Advance payment";
pub const DEFAULT_ADDITIONAL_TERMS: &str = "Goods once sold can't be returned.";

/// Builder for priced, validated invoices.
///
/// ```
/// use gst_invoicing::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::Utc;
///
/// let invoice = InvoiceBuilder::new("Kumar Constructions")
///     .description("Structural survey")
///     .add_item(LineItemBuilder::new("Site inspection", dec!(2), dec!(100)).build())
///     .add_item(LineItemBuilder::new("Report", dec!(1), dec!(50)).build())
///     .tax_policy(TaxPolicy::invoice_level(dec!(18)))
///     .build("1", Utc::now())
///     .unwrap();
///
/// assert_eq!(invoice.total, dec!(295));
/// ```
pub struct InvoiceBuilder {
    client_id: Option<Uuid>,
    client_name: String,
    client_email: Option<String>,
    client_address: Option<String>,
    description: String,
    items: Vec<LineItem>,
    policy: TaxPolicy,
    mode: NumericMode,
    status: InvoiceStatus,
    due_date: Option<DateTime<Utc>>,
    due_days: i64,
    notes: String,
    delivery_terms: String,
    payment_terms: String,
    additional_terms: String,
}

impl InvoiceBuilder {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_id: None,
            client_name: client_name.into(),
            client_email: None,
            client_address: None,
            description: String::new(),
            items: Vec::new(),
            policy: TaxPolicy::PerItem,
            mode: NumericMode::Lenient,
            status: InvoiceStatus::Draft,
            due_date: None,
            due_days: DEFAULT_DUE_DAYS,
            notes: String::new(),
            delivery_terms: DEFAULT_DELIVERY_TERMS.to_string(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
            additional_terms: DEFAULT_ADDITIONAL_TERMS.to_string(),
        }
    }

    /// Address the invoice to a stored client.
    pub fn client(mut self, client: &Client) -> Self {
        self.client_id = Some(client.id);
        self.client_name = client.name.clone();
        self.client_email = Some(client.email.clone());
        self.client_address = client.address.clone();
        self
    }

    pub fn client_id(mut self, id: Uuid) -> Self {
        self.client_id = Some(id);
        self
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = Some(email.into());
        self
    }

    pub fn client_address(mut self, address: impl Into<String>) -> Self {
        self.client_address = Some(address.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn tax_policy(mut self, policy: TaxPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn numeric_mode(mut self, mode: NumericMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due_date(mut self, date: DateTime<Utc>) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Days after creation used when no explicit due date is set.
    pub fn due_in_days(mut self, days: i64) -> Self {
        self.due_days = days;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn delivery_terms(mut self, terms: impl Into<String>) -> Self {
        self.delivery_terms = terms.into();
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = terms.into();
        self
    }

    pub fn additional_terms(mut self, terms: impl Into<String>) -> Self {
        self.additional_terms = terms.into();
        self
    }

    /// Price the items and build the invoice.
    ///
    /// Strict mode validates the whole record, lenient mode only the header
    /// (number, client, dates); items are priced leniently in that case.
    pub fn build(
        self,
        number: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Invoice, InvoiceError> {
        if self.items.len() > 10_000 {
            return Err(InvoiceError::Builder(
                "invoice cannot have more than 10,000 line items".into(),
            ));
        }

        let pricing = pricing::price(&self.items, &self.policy, self.mode)?;
        let due_date = match self.due_date {
            Some(date) => date,
            None => now
                .checked_add_signed(Duration::days(self.due_days))
                .ok_or_else(|| InvoiceError::Builder("due date out of range".into()))?,
        };

        let mut invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number: number.into(),
            client_id: self.client_id,
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email,
            client_address: self.client_address,
            description: self.description,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax_rate: None,
            total_gst: Decimal::ZERO,
            total: Decimal::ZERO,
            status: self.status,
            created_at: now,
            updated_at: now,
            due_date,
            notes: self.notes,
            delivery_terms: self.delivery_terms,
            payment_terms: self.payment_terms,
            additional_terms: self.additional_terms,
        };
        invoice.apply_pricing(pricing, self.policy);

        let errors = match self.mode {
            NumericMode::Strict => validation::validate_invoice(&invoice),
            NumericMode::Lenient => validation::validate_header(&invoice),
        };
        if !errors.is_empty() {
            return Err(validation_failure(&errors));
        }

        Ok(invoice)
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    area: Option<Decimal>,
    rate: Decimal,
    tax_rate: Option<Decimal>,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            area: None,
            rate,
            tax_rate: None,
        }
    }

    /// Bill by area instead of quantity.
    pub fn area(mut self, area: Decimal) -> Self {
        self.area = Some(area);
        self
    }

    /// Per-item GST percentage.
    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity,
            area: self.area,
            rate: self.rate,
            tax_rate: self.tax_rate,
        }
    }
}
