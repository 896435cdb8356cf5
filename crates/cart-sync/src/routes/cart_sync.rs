//! Cart sync route handler.
//!
//! The headless storefront sends the browser here with an opaque API token
//! and a cart id. The handler reconciles the cart with the session identity
//! and always answers with a redirect: to the checkout path, or back into
//! this route after a forced logout (the re-entry redirect).

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{CustomerRepository, TokenRepository};
use crate::services::{CustomerSession, SyncOutcome, SyncRequest, reconcile};
use crate::state::AppState;

/// Query parameters for the sync route.
#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    /// Opaque API token. The key must be present; the value may be empty.
    pub token: Option<String>,
    /// Cart to reconcile. Must be non-empty.
    pub cart: Option<String>,
    /// PayPal button flow marker.
    pub paypal: Option<String>,
}

/// Reconcile a cart with the caller's session identity and redirect to
/// checkout.
///
/// # Route
///
/// `GET /cart/sync?token=&cart=&paypal=`
#[instrument(skip(state, session, query))]
pub async fn sync(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SyncQuery>,
) -> Response {
    let checkout_path = state.config().checkout_path.as_str();
    let paypal = is_truthy_flag(query.paypal.as_deref());

    // Requests without the required parameters end quietly at checkout.
    let Some((token, cart_id)) = required_params(query) else {
        return Redirect::to(checkout_path).into_response();
    };

    let request = SyncRequest {
        token,
        cart_id,
        paypal,
    };

    let customer_session = CustomerSession::new(&session);
    let tokens = TokenRepository::new(state.pool());
    let customers = CustomerRepository::new(state.pool());

    let outcome = reconcile(
        &tokens,
        &customers,
        &customer_session,
        state.sync(),
        &request,
    )
    .await;

    match outcome {
        SyncOutcome::Checkout { button } => {
            Redirect::to(&checkout_redirect(checkout_path, button)).into_response()
        }
        SyncOutcome::CheckoutWithError(message) => {
            customer_session.remember_error(message.user_message()).await;
            Redirect::to(checkout_path).into_response()
        }
        SyncOutcome::Reenter { token, cart_id } => {
            Redirect::to(&reentry_redirect(&token, &cart_id)).into_response()
        }
    }
}

/// Extract the required parameters, if the request carries them.
///
/// The `token` key must be present but its value may be empty; `cart` must
/// be present and non-empty.
fn required_params(query: SyncQuery) -> Option<(String, String)> {
    let token = query.token?;
    let cart = query.cart.filter(|c| !c.is_empty())?;
    Some((token, cart))
}

/// Whether an optional flag parameter is truthy.
///
/// Mirrors the storefront's flag convention: absent, empty, and `"0"` are
/// all falsy.
fn is_truthy_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "0")
}

/// Build the final checkout redirect target.
fn checkout_redirect(checkout_path: &str, button: bool) -> String {
    if button {
        format!("{checkout_path}?button=1")
    } else {
        checkout_path.to_string()
    }
}

/// Build the re-entry redirect target back into this route.
fn reentry_redirect(token: &str, cart_id: &str) -> String {
    format!(
        "/cart/sync?token={}&cart={}",
        urlencoding::encode(token),
        urlencoding::encode(cart_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(token: Option<&str>, cart: Option<&str>) -> SyncQuery {
        SyncQuery {
            token: token.map(String::from),
            cart: cart.map(String::from),
            paypal: None,
        }
    }

    #[test]
    fn test_required_params_present() {
        assert_eq!(
            required_params(query(Some("tok123"), Some("cart9"))),
            Some(("tok123".to_string(), "cart9".to_string()))
        );
    }

    #[test]
    fn test_required_params_allows_empty_token_value() {
        // The token key only has to be present; its value may be empty.
        assert_eq!(
            required_params(query(Some(""), Some("cart9"))),
            Some((String::new(), "cart9".to_string()))
        );
    }

    #[test]
    fn test_required_params_rejects_missing_token_key() {
        assert_eq!(required_params(query(None, Some("cart9"))), None);
    }

    #[test]
    fn test_required_params_rejects_empty_cart() {
        assert_eq!(required_params(query(Some("tok123"), Some(""))), None);
        assert_eq!(required_params(query(Some("tok123"), None)), None);
    }

    #[test]
    fn test_truthy_flag() {
        assert!(is_truthy_flag(Some("1")));
        assert!(is_truthy_flag(Some("true")));
        assert!(!is_truthy_flag(Some("0")));
        assert!(!is_truthy_flag(Some("")));
        assert!(!is_truthy_flag(None));
    }

    #[test]
    fn test_checkout_redirect_without_button() {
        assert_eq!(checkout_redirect("/checkout", false), "/checkout");
    }

    #[test]
    fn test_checkout_redirect_with_button() {
        assert_eq!(checkout_redirect("/checkout", true), "/checkout?button=1");
    }

    #[test]
    fn test_reentry_redirect_encodes_params() {
        assert_eq!(
            reentry_redirect("tok 123", "cart/9"),
            "/cart/sync?token=tok%20123&cart=cart%2F9"
        );
    }
}
