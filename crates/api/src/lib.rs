//! # Booksync API
//!
//! The webhook surface for the booking assistant. A GET on `/webhook` serves
//! the Meta verification handshake; a POST delivers one inbound WhatsApp
//! message, which is reduced to the `(correspondent, text, timestamp)` triple
//! and handed to the session coordinator. The transport envelope never
//! crosses into the core.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement webhook processing
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use booksync_session::Coordinator;

/// Shared application state accessible to all request handlers.
pub struct ApiState {
    pub coordinator: Arc<Coordinator>,
    /// Token the Meta verification handshake must echo.
    pub verify_token: String,
}

/// Builds the application router. Split from [`start_server`] so tests can
/// drive it without binding a socket.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::webhook::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the webhook server: sets up logging, builds the router, and
/// serves until shutdown.
pub async fn start_server(config: config::ApiConfig, coordinator: Arc<Coordinator>) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        coordinator,
        verify_token: config.verify_token.clone(),
    });

    let app = router(state).layer(TimeoutLayer::new(std::time::Duration::from_secs(
        config.request_timeout,
    )));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Webhook server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
