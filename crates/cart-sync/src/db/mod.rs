//! Database access for cart-sync `PostgreSQL`.
//!
//! The commerce backend owns every table this service touches; cart-sync
//! only reads from it:
//!
//! ## Tables
//!
//! - `oauth_token` - API tokens handed to the headless storefront
//! - `customer` - Customer accounts
//! - `sessions` - Tower-sessions storage (shared with the storefront)

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod customers;
pub mod tokens;

pub use customers::{CustomerLookupError, CustomerRepository};
pub use tokens::TokenRepository;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
