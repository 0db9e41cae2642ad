use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::core::{
    Client, CompanySettings, CurrencyFormat, FormattedTotals, Invoice, InvoiceStatus,
    LineItemInput, Numeric, Pricing,
};
use crate::render::{invoices_to_csv, render_invoice_html};
use crate::store::{
    ClientPatch, CompanyPatch, DashboardStats, InvoiceFilter, InvoicePatch, NewClient, NewInvoice,
};

use super::AppState;
use super::error::ApiError;

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── invoices ────────────────────────────────────────────────────────────

/// `?status=&search=`; empty values mean no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ListQuery> for InvoiceFilter {
    type Error = ApiError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(
                InvoiceStatus::from_name(name)
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown status '{name}'")))?,
            ),
        };
        Ok(InvoiceFilter {
            status,
            search: query.search,
        })
    }
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Invoice>>> {
    let filter = InvoiceFilter::try_from(query)?;
    let store = state.store.read().await;
    Ok(Json(
        store.list_invoices(&filter).into_iter().cloned().collect(),
    ))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<NewInvoice>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    let Json(input) = payload?;
    let invoice = state.store.write().await.create_invoice(input, Utc::now())?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Invoice>> {
    let store = state.store.read().await;
    Ok(Json(store.get_invoice(id)?.clone()))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<InvoicePatch>, JsonRejection>,
) -> ApiResult<Json<Invoice>> {
    let Json(patch) = payload?;
    let invoice = state
        .store
        .write()
        .await
        .update_invoice(id, patch, Utc::now())?;
    Ok(Json(invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.write().await.delete_invoice(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    pub tax_rate: Option<Numeric>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub pricing: Pricing,
    pub formatted: FormattedTotals,
}

/// Live totals for an unsaved invoice form.
pub async fn quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApiResult<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let pricing = state
        .store
        .read()
        .await
        .quote(&request.items, request.tax_rate.as_ref())?;
    let formatted = pricing.totals.formatted();
    Ok(Json(QuoteResponse { pricing, formatted }))
}

pub async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let body = invoices_to_csv(store.list_invoices(&InvoiceFilter::default()));
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"invoices.csv\"",
            ),
        ],
        body,
    )
}

pub async fn print_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Html<String>> {
    let store = state.store.read().await;
    let invoice = store.get_invoice(id)?;
    let client = invoice.client_id.and_then(|cid| store.get_client(cid).ok());
    let fmt = CurrencyFormat::default();
    let page = render_invoice_html(invoice, store.company(), client, &fmt)?;
    Ok(Html(page))
}

// ── clients ─────────────────────────────────────────────────────────────

pub async fn list_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    Json(state.store.read().await.list_clients().to_vec())
}

pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<NewClient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let Json(input) = payload?;
    let client = state.store.write().await.create_client(input, Utc::now())?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Client>> {
    let store = state.store.read().await;
    Ok(Json(store.get_client(id)?.clone()))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ClientPatch>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let Json(patch) = payload?;
    let client = state
        .store
        .write()
        .await
        .update_client(id, patch, Utc::now())?;
    Ok(Json(client))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.store.write().await.delete_client(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── company & dashboard ─────────────────────────────────────────────────

pub async fn get_company(State(state): State<AppState>) -> Json<CompanySettings> {
    Json(state.store.read().await.company().clone())
}

pub async fn update_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyPatch>, JsonRejection>,
) -> ApiResult<Json<CompanySettings>> {
    let Json(patch) = payload?;
    let mut store = state.store.write().await;
    Ok(Json(store.update_company(patch).clone()))
}

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.store.read().await.dashboard(Utc::now()))
}
