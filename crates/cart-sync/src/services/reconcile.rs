//! Cart reconciliation decision logic.
//!
//! Given a sync request carrying an opaque token and a cart id, decide
//! whether the cart is a guest cart or a customer cart, align the session
//! identity with the token's identity (forcing a logout on mismatch),
//! trigger the matching cart synchronization in the commerce backend, and
//! produce a redirect outcome.
//!
//! The logic is written against trait seams so it stays independent of the
//! database, the session store, and the merge API. Production adapters live
//! in [`crate::db`] and the sibling service modules.

use rand::Rng;

use crate::db::CustomerLookupError;
use crate::models::{AccessToken, Customer, CustomerId};

/// Length of a freshly generated guest token.
const GUEST_TOKEN_LENGTH: usize = 32;

/// Resolves opaque token strings to token records.
#[allow(async_fn_in_trait)]
pub trait TokenStore {
    /// Resolve a token string. Never fails: unknown tokens resolve to
    /// [`AccessToken::empty`].
    async fn lookup_by_value(&self, value: &str) -> AccessToken;
}

/// Resolves customer IDs to customer records.
#[allow(async_fn_in_trait)]
pub trait CustomerDirectory {
    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `CustomerLookupError` if the customer is missing, disabled,
    /// or the lookup itself fails.
    async fn get_by_id(&self, id: CustomerId) -> Result<Customer, CustomerLookupError>;
}

/// The caller's session identity, owned by the external session store.
#[allow(async_fn_in_trait)]
pub trait SessionIdentity {
    /// The customer the session is currently logged in as, if any.
    async fn current_customer(&self) -> Option<CustomerId>;

    /// Log the session in as the given customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    async fn login(&self, id: CustomerId) -> Result<(), tower_sessions::session::Error>;

    /// Log the session out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    async fn logout(&self) -> Result<(), tower_sessions::session::Error>;
}

/// The commerce backend's cart merge operations.
///
/// Fire-and-forget from the handler's perspective: failures are the
/// adapter's to log, and nothing is consumed from the calls.
#[allow(async_fn_in_trait)]
pub trait CartSynchronizer {
    /// Merge a guest cart into the active checkout session.
    async fn synchronize_guest_cart(&self, cart_id: &str);

    /// Merge a customer's cart into the active checkout session.
    async fn synchronize_customer_cart(&self, customer_id: CustomerId, cart_id: &str);
}

/// A validated sync request.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// The opaque token string from the request. May be empty.
    pub token: String,
    /// The cart to reconcile. Non-empty (validated by the route).
    pub cart_id: String,
    /// Whether the request came from the PayPal button flow.
    pub paypal: bool,
}

/// User-facing message set on an error outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMessage {
    /// The token references a customer that no longer exists.
    MissingCustomer,
    /// The customer cart cannot be synchronized (disabled account,
    /// infrastructure failure, or a session write failure).
    CustomerCartUnavailable,
}

impl SyncMessage {
    /// The message shown to the shopper on the checkout page.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCustomer => "Required customer doesn't exist",
            Self::CustomerCartUnavailable => "Cannot synchronize customer cart",
        }
    }
}

/// Terminal outcome of a reconciliation pass. Every outcome is a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Redirect to the checkout path, with `button=1` when `button` is set.
    Checkout {
        /// Append the PayPal button parameter.
        button: bool,
    },
    /// Set a flash message, then redirect to the bare checkout path.
    CheckoutWithError(SyncMessage),
    /// Redirect back into the sync route so the request is retried after a
    /// forced logout.
    Reenter {
        /// Token to carry on the retry.
        token: String,
        /// Cart id to carry on the retry.
        cart_id: String,
    },
}

/// Reconcile a cart with the caller's session identity.
///
/// All paths are terminal within one request; the engine holds no state
/// across invocations.
pub async fn reconcile(
    tokens: &impl TokenStore,
    customers: &impl CustomerDirectory,
    session: &impl SessionIdentity,
    sync: &impl CartSynchronizer,
    request: &SyncRequest,
) -> SyncOutcome {
    let token = tokens.lookup_by_value(&request.token).await;

    match token.bound_customer() {
        // Guest cart.
        None => {
            if session.current_customer().await.is_some() {
                // A guest cart reached from an authenticated session: log
                // out and retry as a clean guest under a fresh token.
                best_effort_logout(session).await;
                return SyncOutcome::Reenter {
                    token: fresh_guest_token(),
                    cart_id: request.cart_id.clone(),
                };
            }

            sync.synchronize_guest_cart(&request.cart_id).await;
        }
        // Customer cart.
        Some(customer_id) => match session.current_customer().await {
            Some(current) if current != customer_id => {
                // The token belongs to a different customer than the
                // session: log out and retry with the original token.
                best_effort_logout(session).await;
                return SyncOutcome::Reenter {
                    token: request.token.clone(),
                    cart_id: request.cart_id.clone(),
                };
            }
            Some(current) => {
                sync.synchronize_customer_cart(current, &request.cart_id)
                    .await;
            }
            None => {
                let customer = match customers.get_by_id(customer_id).await {
                    Ok(customer) => customer,
                    Err(e @ CustomerLookupError::NotFound(_)) => {
                        tracing::error!("Cart sync aborted: {e}");
                        return SyncOutcome::CheckoutWithError(SyncMessage::MissingCustomer);
                    }
                    Err(e) => {
                        tracing::error!("Cart sync aborted: {e}");
                        return SyncOutcome::CheckoutWithError(SyncMessage::CustomerCartUnavailable);
                    }
                };

                if let Err(e) = session.login(customer.id).await {
                    tracing::error!("Failed to log customer {customer_id} in: {e}");
                    return SyncOutcome::CheckoutWithError(SyncMessage::CustomerCartUnavailable);
                }

                sync.synchronize_customer_cart(customer.id, &request.cart_id)
                    .await;
            }
        },
    }

    SyncOutcome::Checkout {
        button: request.paypal,
    }
}

/// Log the session out, logging (but not propagating) store failures.
async fn best_effort_logout(session: &impl SessionIdentity) {
    if let Err(e) = session.logout().await {
        tracing::warn!("Failed to clear session before re-entry: {e}");
    }
}

/// Generate a fresh opaque guest token.
///
/// Uses the thread-local CSPRNG; guest tokens gate cart access, so they
/// must be unpredictable.
#[must_use]
pub fn fresh_guest_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..GUEST_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}
