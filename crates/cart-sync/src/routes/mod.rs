//! HTTP route handlers for cart-sync.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Cart reconciliation
//! GET  /cart/sync              - Reconcile a cart with the session identity
//!                                (params: token, cart, paypal) and redirect
//!                                to checkout
//! ```

pub mod cart_sync;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the cart-sync service.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cart/sync", get(cart_sync::sync))
}
