//! Supplier Risk Gateway
//!
//! HTTP service that evaluates supplier composite risk and inventory risk on request.
//! Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod state;
mod types;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use handlers::{health, inventory_risk, supplier_risk};
pub use state::AppState;
pub use types::RiskQuery;

/// All routes, with permissive CORS, over shared state.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/suppliers/:supplier_id/risk", get(supplier_risk))
    .route("/inventory/:item_id/risk", get(inventory_risk))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
