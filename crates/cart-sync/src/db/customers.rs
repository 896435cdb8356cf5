//! Customer lookup against the commerce backend's `customer` table.

use sqlx::PgPool;
use thiserror::Error;

use crate::models::{Customer, CustomerId};
use crate::services::reconcile::CustomerDirectory;

/// Errors that can occur when resolving a customer.
///
/// The reconciliation handler matches these exhaustively: a missing
/// customer gets a different user-facing message than a business-rule or
/// infrastructure failure.
#[derive(Debug, Error)]
pub enum CustomerLookupError {
    /// No customer exists with this ID.
    #[error("customer {0} not found")]
    NotFound(CustomerId),

    /// The customer exists but the account is disabled.
    #[error("customer {0} is disabled")]
    Disabled(CustomerId),

    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row shape for customer lookups.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    email: String,
    is_active: bool,
}

/// Repository for customer read operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CustomerDirectory for CustomerRepository<'_> {
    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `CustomerLookupError::NotFound` if no such customer exists.
    /// Returns `CustomerLookupError::Disabled` if the account is inactive.
    /// Returns `CustomerLookupError::Database` if the query fails.
    async fn get_by_id(&self, id: CustomerId) -> Result<Customer, CustomerLookupError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, email, is_active FROM customer WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(CustomerLookupError::NotFound(id))?;

        if !row.is_active {
            return Err(CustomerLookupError::Disabled(id));
        }

        Ok(Customer {
            id: row.id,
            email: row.email,
            is_active: row.is_active,
        })
    }
}
