//! JSON HTTP API over an in-memory [`InvoiceStore`].
//!
//! ```no_run
//! use gst_invoicing::server::{ServerConfig, serve};
//!
//! # async fn run() -> std::io::Result<()> {
//! serve(ServerConfig::default(), std::future::pending()).await
//! # }
//! ```

mod config;
mod error;
mod handlers;
mod telemetry;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handlers::{ListQuery, QuoteRequest, QuoteResponse};
pub use telemetry::init_tracing;

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::store::InvoiceStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InvoiceStore>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = InvoiceStore::new(config.store_options());
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}

/// Build the full router: API routes, optional static files, CORS and
/// request tracing.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/invoices",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route("/api/invoices/quote", post(handlers::quote))
        .route("/api/invoices/export.csv", get(handlers::export_csv))
        .route(
            "/api/invoices/:id",
            get(handlers::get_invoice)
                .put(handlers::update_invoice)
                .delete(handlers::delete_invoice),
        )
        .route("/api/invoices/:id/print", get(handlers::print_invoice))
        .route(
            "/api/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/api/clients/:id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route(
            "/api/company",
            get(handlers::get_company).put(handlers::update_company),
        )
        .route("/api/dashboard", get(handlers::dashboard));

    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .merge(api);

    if let Some(dir) = &state.config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn serve(
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let address = config.address();
    let strict = config.strict_numbers;
    let app = router(AppState::new(config));

    let listener = TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!(error = %e, addr = %address, "Failed to bind HTTP listener");
        e
    })?;

    tracing::info!(
        addr = %listener.local_addr()?,
        strict_numbers = strict,
        version = env!("CARGO_PKG_VERSION"),
        "Invoicing service ready to accept connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
