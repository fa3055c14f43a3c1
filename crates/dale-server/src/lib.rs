//! Dale gateway HTTP surface.
//!
//! Routes:
//! - `/check` token check for reverse-proxy auth subrequests
//! - `/auth/login`, `/auth/logout` browser session flow
//! - `/oauth2/token` client-credentials grant for machine callers

pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

use axum::Router;
use axum::routing::{any, get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/check", any(handlers::check))
        .route(
            "/auth/login",
            get(handlers::login_page)
                .post(handlers::login)
                .fallback(handlers::method_not_allowed),
        )
        .route("/auth/logout", any(handlers::logout))
        .route(
            "/oauth2/token",
            post(handlers::token).fallback(handlers::method_not_allowed),
        )
        .route("/static/auth.png", get(handlers::logo))
        .route("/health", get(handlers::health))
        .fallback(handlers::root)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` (`host:port`, names resolved by the OS). When the all-interfaces
/// IPv6 address `[::]:port` cannot be bound, retries on `0.0.0.0:port`.
pub async fn bind_listener(addr: &str) -> std::io::Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(err) => match addr.strip_prefix("[::]:") {
            Some(port) => {
                tracing::warn!(error = %err, "IPv6 unavailable, binding IPv4 only");
                TcpListener::bind(format!("0.0.0.0:{port}")).await
            }
            None => Err(err),
        },
    }
}
