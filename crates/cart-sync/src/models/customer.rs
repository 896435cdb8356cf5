//! Customer types.

use serde::{Deserialize, Serialize};

/// Type-safe customer ID.
///
/// Newtype wrapper around `i64` so customer IDs can't be confused with
/// other numeric values flowing through the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

/// A customer account as seen by the cart-sync service.
///
/// Read-only projection of the commerce platform's customer record; this
/// service never mutates customers.
#[derive(Debug, Clone)]
pub struct Customer {
    /// Customer's database ID.
    pub id: CustomerId,
    /// Customer's email address.
    pub email: String,
    /// Whether the account is active. Inactive accounts cannot have their
    /// carts synchronized.
    pub is_active: bool,
}
