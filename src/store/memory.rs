use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{
    Client, CompanySettings, DEFAULT_DUE_DAYS, Invoice, InvoiceBuilder, InvoiceNumberSequence,
    LineItemInput, Numeric, NumericMode, Pricing, price, resolve_items, resolve_tax_policy,
    validate_client, validate_header, validate_invoice, validation_failure,
};
use crate::gst::validate_gstin;

use super::StoreError;
use super::dashboard::DashboardStats;
use super::input::*;

/// Settings the store applies to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub numeric_mode: NumericMode,
    /// Days until the default due date.
    pub due_days: i64,
    /// Prefix of generated invoice numbers.
    pub invoice_prefix: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            numeric_mode: NumericMode::Lenient,
            due_days: DEFAULT_DUE_DAYS,
            invoice_prefix: String::new(),
        }
    }
}

/// In-memory invoices, clients and company profile.
///
/// Records live in insertion order and are lost with the process.
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    invoices: Vec<Invoice>,
    clients: Vec<Client>,
    company: CompanySettings,
    numbering: InvoiceNumberSequence,
    options: StoreOptions,
}

impl Default for InvoiceStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl InvoiceStore {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            invoices: Vec::new(),
            clients: Vec::new(),
            company: CompanySettings::default(),
            numbering: InvoiceNumberSequence::new(options.invoice_prefix.clone()),
            options,
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The number the next generated invoice will get.
    pub fn next_invoice_number(&self) -> String {
        self.numbering.peek()
    }

    // ── invoices ────────────────────────────────────────────────────────

    pub fn list_invoices(&self, filter: &InvoiceFilter) -> Vec<&Invoice> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.invoices
            .iter()
            .filter(|inv| filter.status.is_none_or(|s| inv.status == s))
            .filter(|inv| match &needle {
                None => true,
                Some(needle) => [&inv.invoice_number, &inv.client_name, &inv.description]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle.as_str())),
            })
            .collect()
    }

    pub fn get_invoice(&self, id: Uuid) -> Result<&Invoice, StoreError> {
        self.invoices
            .iter()
            .find(|inv| inv.id == id)
            .ok_or(StoreError::NotFound { kind: "Invoice", id })
    }

    /// Price, number and store a new invoice.
    pub fn create_invoice(
        &mut self,
        input: NewInvoice,
        now: DateTime<Utc>,
    ) -> Result<Invoice, StoreError> {
        let mode = self.options.numeric_mode;
        let items = resolve_items(&input.items, mode)?;
        let policy = resolve_tax_policy(input.tax_rate.as_ref(), mode)?;

        // Numbering runs on a copy that is only kept once the invoice builds.
        let mut numbering = self.numbering.clone();
        let number = match non_blank(input.invoice_number) {
            Some(number) => {
                numbering.observe(&number);
                number
            }
            None => numbering.next_number()?,
        };
        self.ensure_number_free(&number, None)?;

        let mut builder = InvoiceBuilder::new(String::new())
            .description(input.description)
            .items(items)
            .tax_policy(policy)
            .numeric_mode(mode)
            .due_in_days(self.options.due_days);

        if let Some(client_id) = input.client_id {
            builder = builder.client(self.known_client(client_id)?);
        }
        if let Some(name) = non_blank(input.client_name) {
            builder = builder.client_name(name);
        }
        if let Some(email) = non_blank(input.client_email) {
            builder = builder.client_email(email);
        }
        if let Some(address) = non_blank(input.client_address) {
            builder = builder.client_address(address);
        }
        if let Some(status) = input.status {
            builder = builder.status(status);
        }
        if let Some(due) = input.due_date {
            builder = builder.due_date(due);
        }
        if let Some(notes) = input.notes {
            builder = builder.notes(notes);
        }
        if let Some(terms) = input.delivery_terms {
            builder = builder.delivery_terms(terms);
        }
        if let Some(terms) = input.payment_terms {
            builder = builder.payment_terms(terms);
        }
        if let Some(terms) = input.additional_terms {
            builder = builder.additional_terms(terms);
        }

        let invoice = builder.build(number, now)?;
        self.numbering = numbering;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            items = invoice.items.len(),
            total = %invoice.total,
            "invoice created"
        );
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Apply a shallow patch. Item or tax-rate changes re-price the invoice.
    pub fn update_invoice(
        &mut self,
        id: Uuid,
        patch: InvoicePatch,
        now: DateTime<Utc>,
    ) -> Result<Invoice, StoreError> {
        let mode = self.options.numeric_mode;
        let mut invoice = self.get_invoice(id)?.clone();
        let reprice = patch.reprices();

        if let Some(number) = non_blank(patch.invoice_number) {
            self.ensure_number_free(&number, Some(id))?;
            invoice.invoice_number = number;
        }
        if let Some(client_id) = patch.client_id {
            let client = self.known_client(client_id)?;
            invoice.client_id = Some(client.id);
            invoice.client_name = client.name.clone();
            invoice.client_email = Some(client.email.clone());
            invoice.client_address = client.address.clone();
        }
        if let Some(name) = patch.client_name {
            invoice.client_name = name.trim().to_string();
        }
        if let Some(email) = patch.client_email {
            invoice.client_email = Some(email);
        }
        if let Some(address) = patch.client_address {
            invoice.client_address = Some(address);
        }
        if let Some(description) = patch.description {
            invoice.description = description;
        }
        if let Some(status) = patch.status {
            invoice.status = status;
        }
        if let Some(due) = patch.due_date {
            invoice.due_date = due;
        }
        if let Some(notes) = patch.notes {
            invoice.notes = notes;
        }
        if let Some(terms) = patch.delivery_terms {
            invoice.delivery_terms = terms;
        }
        if let Some(terms) = patch.payment_terms {
            invoice.payment_terms = terms;
        }
        if let Some(terms) = patch.additional_terms {
            invoice.additional_terms = terms;
        }

        if reprice {
            let items = match &patch.items {
                Some(inputs) => resolve_items(inputs, mode)?,
                None => invoice.line_items(),
            };
            let policy = match &patch.tax_rate {
                Some(raw) => resolve_tax_policy(raw.as_ref(), mode)?,
                None => invoice.tax_policy(),
            };
            let pricing = price(&items, &policy, mode)?;
            invoice.apply_pricing(pricing, policy);
        }
        invoice.updated_at = now;

        let errors = match mode {
            NumericMode::Strict => validate_invoice(&invoice),
            NumericMode::Lenient => validate_header(&invoice),
        };
        if !errors.is_empty() {
            return Err(validation_failure(&errors).into());
        }

        self.numbering.observe(&invoice.invoice_number);
        debug!(invoice_id = %id, repriced = reprice, "invoice updated");

        let slot = self
            .invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or(StoreError::NotFound { kind: "Invoice", id })?;
        *slot = invoice.clone();
        Ok(invoice)
    }

    pub fn delete_invoice(&mut self, id: Uuid) -> Result<Invoice, StoreError> {
        let pos = self
            .invoices
            .iter()
            .position(|inv| inv.id == id)
            .ok_or(StoreError::NotFound { kind: "Invoice", id })?;
        let removed = self.invoices.remove(pos);
        info!(invoice_id = %id, invoice_number = %removed.invoice_number, "invoice deleted");
        Ok(removed)
    }

    /// Price unsaved items under the store's numeric mode.
    pub fn quote(
        &self,
        items: &[LineItemInput],
        tax_rate: Option<&Numeric>,
    ) -> Result<Pricing, StoreError> {
        let mode = self.options.numeric_mode;
        let items = resolve_items(items, mode)?;
        let policy = resolve_tax_policy(tax_rate, mode)?;
        Ok(price(&items, &policy, mode)?)
    }

    fn ensure_number_free(&self, number: &str, except: Option<Uuid>) -> Result<(), StoreError> {
        let taken = self
            .invoices
            .iter()
            .any(|inv| inv.invoice_number == number && Some(inv.id) != except);
        if taken {
            return Err(StoreError::Conflict(format!(
                "invoice number '{number}' is already in use"
            )));
        }
        Ok(())
    }

    fn known_client(&self, id: Uuid) -> Result<&Client, StoreError> {
        self.get_client(id)
            .map_err(|_| StoreError::Invalid(format!("unknown client {id}")))
    }

    // ── clients ─────────────────────────────────────────────────────────

    pub fn list_clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn get_client(&self, id: Uuid) -> Result<&Client, StoreError> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound { kind: "Client", id })
    }

    pub fn create_client(
        &mut self,
        input: NewClient,
        now: DateTime<Utc>,
    ) -> Result<Client, StoreError> {
        let client = Client {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: non_blank(input.phone),
            address: non_blank(input.address),
            gstin: normalize_gstin(input.gstin)?,
            created_at: now,
            updated_at: None,
        };

        let errors = validate_client(&client);
        if !errors.is_empty() {
            return Err(validation_failure(&errors).into());
        }

        info!(client_id = %client.id, "client created");
        self.clients.push(client.clone());
        Ok(client)
    }

    pub fn update_client(
        &mut self,
        id: Uuid,
        patch: ClientPatch,
        now: DateTime<Utc>,
    ) -> Result<Client, StoreError> {
        let mut client = self.get_client(id)?.clone();

        if let Some(name) = patch.name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            client.email = email.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            client.phone = non_blank(Some(phone));
        }
        if let Some(address) = patch.address {
            client.address = non_blank(Some(address));
        }
        if let Some(gstin) = patch.gstin {
            client.gstin = normalize_gstin(gstin)?;
        }
        client.updated_at = Some(now);

        let errors = validate_client(&client);
        if !errors.is_empty() {
            return Err(validation_failure(&errors).into());
        }

        let slot = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound { kind: "Client", id })?;
        *slot = client.clone();
        Ok(client)
    }

    /// Remove a client. Invoices keep their copy of the client details.
    pub fn delete_client(&mut self, id: Uuid) -> Result<Client, StoreError> {
        let pos = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound { kind: "Client", id })?;
        info!(client_id = %id, "client deleted");
        Ok(self.clients.remove(pos))
    }

    // ── company ─────────────────────────────────────────────────────────

    pub fn company(&self) -> &CompanySettings {
        &self.company
    }

    /// Merge a patch into the company profile.
    ///
    /// A malformed GSTIN is stored as given (the profile starts out with
    /// placeholders) but logged; rendering then skips the GST split.
    pub fn update_company(&mut self, patch: CompanyPatch) -> &CompanySettings {
        let c = &mut self.company;
        let fields = [
            (&mut c.name, patch.name),
            (&mut c.tagline, patch.tagline),
            (&mut c.address, patch.address),
            (&mut c.phone, patch.phone),
            (&mut c.email, patch.email),
            (&mut c.state, patch.state),
            (&mut c.bank_name, patch.bank_name),
            (&mut c.account_no, patch.account_no),
            (&mut c.ifsc_code, patch.ifsc_code),
            (&mut c.account_holder, patch.account_holder),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(gstin) = patch.gstin {
            match validate_gstin(&gstin) {
                Ok(valid) => c.gstin = valid.to_string(),
                Err(e) => {
                    warn!(error = %e, "company GSTIN failed validation");
                    c.gstin = gstin;
                }
            }
        }
        if let Some(logo) = patch.logo {
            c.logo = logo;
        }

        info!("company settings updated");
        &self.company
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.invoices, now)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn normalize_gstin(value: Option<String>) -> Result<Option<String>, StoreError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => validate_gstin(&raw)
            .map(|g| Some(g.to_string()))
            .map_err(|e| StoreError::Invalid(e.to_string())),
    }
}
