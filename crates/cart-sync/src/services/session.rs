//! Customer session adapter.
//!
//! Wraps a `tower_sessions::Session` behind the [`SessionIdentity`] seam so
//! the reconciliation logic never touches the session store directly.

use tower_sessions::Session;

use crate::models::{CurrentCustomer, CustomerId, session_keys};
use crate::services::reconcile::SessionIdentity;

/// The caller's customer session for the duration of one request.
pub struct CustomerSession<'a> {
    session: &'a Session,
}

impl<'a> CustomerSession<'a> {
    /// Wrap the request's session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Store a one-shot error message for the next checkout page render.
    ///
    /// A failed write is logged and swallowed: losing the message is
    /// preferable to failing a request that must end in a redirect.
    pub async fn remember_error(&self, message: &str) {
        if let Err(e) = self.session.insert(session_keys::FLASH_ERROR, message).await {
            tracing::warn!("Failed to store flash message in session: {e}");
        }
    }
}

impl SessionIdentity for CustomerSession<'_> {
    async fn current_customer(&self) -> Option<CustomerId> {
        self.session
            .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
            .await
            .ok()
            .flatten()
            .map(|customer| customer.id)
    }

    async fn login(&self, id: CustomerId) -> Result<(), tower_sessions::session::Error> {
        self.session
            .insert(session_keys::CURRENT_CUSTOMER, CurrentCustomer { id })
            .await
    }

    async fn logout(&self) -> Result<(), tower_sessions::session::Error> {
        self.session
            .remove::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
            .await?;
        Ok(())
    }
}
