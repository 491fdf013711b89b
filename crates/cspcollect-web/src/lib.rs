use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};

use cspcollect_core::Collector;

mod extract;
mod handlers;
mod security;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) collector: Collector,
}

impl WebState {
    fn new(collector: Collector) -> Self {
        Self { collector }
    }
}

/// Start the report collection server and block until shutdown.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot
/// be bound, or the server exits with a runtime failure.
pub fn serve(collector: Collector, host: &str, port: u16) -> Result<()> {
    let state = WebState::new(collector);
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build collector runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind report collector at {bind_addr}"))?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "report collector listening");

        axum::serve(
            listener,
            app_router(state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("report collector server failed")
    })
}

pub(crate) fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/", post(handlers::submit))
        .route("/report", post(handlers::submit))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(security::security_headers_middleware))
        .with_state(state)
}
