//! HTTP layer for cinepoll.
//!
//! This crate provides the browser-facing pages and a small admin API:
//!
//! - **Views**: movie listing, detail/voting form, results, vote and delete actions
//! - **Admin**: JSON endpoints for creating movies and choices
//! - **Templates**: tera templates compiled into the binary
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod admin;
pub mod response;
pub mod state;
pub mod templates;
pub mod views;

use axum::Router;
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

pub use state::AppState;
pub use templates::Templates;

/// Maximum accepted request body (forms and admin JSON are tiny).
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the application router without state or middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(views::router())
        .nest("/admin", admin::router())
}

/// Create the full application with middleware applied.
pub fn app(state: AppState) -> Router {
    router()
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
