pub mod handlers;
pub mod index;
pub mod response;

use crate::error::Result;
use crate::services::QueryService;
use crate::utils::constants::API_PREFIX;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared per-request state. Handlers receive it through axum's `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: QueryService,
    pub site_title: Arc<str>,
}

impl AppState {
    pub fn new(service: QueryService, site_title: &str) -> Self {
        Self {
            service,
            site_title: Arc::from(site_title),
        }
    }
}

/// Build the router. Static routes win over the `:start` capture.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route(
            &format!("{API_PREFIX}/precipitation"),
            get(handlers::precipitation),
        )
        .route(&format!("{API_PREFIX}/stations"), get(handlers::stations))
        .route(&format!("{API_PREFIX}/tobs"), get(handlers::tobs))
        .route(&format!("{API_PREFIX}/:start"), get(handlers::start))
        .route(&format!("{API_PREFIX}/:start/:end"), get(handlers::start_end))
        .with_state(state)
}

pub async fn serve(state: AppState, bind_address: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received CTRL+C, shutting down");
}
