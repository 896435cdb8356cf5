//! Token lookup against the commerce backend's `oauth_token` table.

use sqlx::PgPool;

use crate::models::{AccessToken, CustomerId};
use crate::services::reconcile::TokenStore;

/// Row shape for token lookups.
#[derive(sqlx::FromRow)]
struct TokenRow {
    token: String,
    revoked: bool,
    customer_id: Option<CustomerId>,
}

impl From<TokenRow> for AccessToken {
    fn from(row: TokenRow) -> Self {
        Self {
            token: row.token,
            revoked: row.revoked,
            customer_id: row.customer_id,
        }
    }
}

/// Repository for token read operations.
pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl TokenStore for TokenRepository<'_> {
    /// Resolve an opaque token string to its record.
    ///
    /// Lookups never fail hard: an unknown token resolves to the empty
    /// record (which classifies as guest), and a database error is logged
    /// and degraded to the same empty record so the request still completes
    /// with a redirect.
    async fn lookup_by_value(&self, value: &str) -> AccessToken {
        let result = sqlx::query_as::<_, TokenRow>(
            "SELECT token, revoked, customer_id FROM oauth_token WHERE token = $1",
        )
        .bind(value)
        .fetch_optional(self.pool)
        .await;

        match result {
            Ok(Some(row)) => row.into(),
            Ok(None) => AccessToken::empty(),
            Err(e) => {
                tracing::warn!("Token lookup failed, treating as guest: {e}");
                AccessToken::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn test_unreachable_database_degrades_to_guest() {
        // Port 1 never serves Postgres: the first query fails and the
        // lookup degrades to the empty record instead of surfacing the
        // error.
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy("postgres://cart_sync@127.0.0.1:1/cart_sync")
            .expect("lazy pool construction does not connect");
        let repo = TokenRepository::new(&pool);

        let token = repo.lookup_by_value("tok123").await;

        assert!(token.token.is_empty());
        assert_eq!(token.bound_customer(), None);
    }
}
