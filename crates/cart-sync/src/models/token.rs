//! API access token record.
//!
//! Tokens are issued and persisted by the commerce backend; this service
//! only reads them by opaque string lookup to classify the cart carried in
//! a sync request as a guest cart or a customer cart.

use super::customer::CustomerId;

/// An opaque bearer token, optionally bound to a customer account.
#[derive(Debug, Clone, Default)]
pub struct AccessToken {
    /// The token value. Empty when the lookup found no matching token.
    pub token: String,
    /// Whether the token has been revoked.
    pub revoked: bool,
    /// The customer the token is bound to, if any. `None` marks a guest.
    pub customer_id: Option<CustomerId>,
}

impl AccessToken {
    /// The record returned when no token matches a lookup value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The customer this token identifies, if it identifies one at all.
    ///
    /// A token only identifies a customer when it has a value, is not
    /// revoked, and is bound to a customer account. Anything else is
    /// treated as a guest token.
    #[must_use]
    pub fn bound_customer(&self) -> Option<CustomerId> {
        if self.token.is_empty() || self.revoked {
            return None;
        }
        self.customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str, revoked: bool, customer_id: Option<i64>) -> AccessToken {
        AccessToken {
            token: value.to_string(),
            revoked,
            customer_id: customer_id.map(CustomerId::new),
        }
    }

    #[test]
    fn test_valid_bound_token_identifies_customer() {
        let t = token("tok123", false, Some(42));
        assert_eq!(t.bound_customer(), Some(CustomerId::new(42)));
    }

    #[test]
    fn test_every_other_combination_is_guest() {
        // All combinations of {has value, revoked, bound customer} except
        // the single customer-identifying one.
        let guests = [
            token("", false, None),
            token("", false, Some(42)),
            token("", true, None),
            token("", true, Some(42)),
            token("tok123", false, None),
            token("tok123", true, None),
            token("tok123", true, Some(42)),
        ];
        for t in &guests {
            assert_eq!(
                t.bound_customer(),
                None,
                "expected guest classification for {t:?}"
            );
        }
    }

    #[test]
    fn test_empty_record_is_guest() {
        assert_eq!(AccessToken::empty().bound_customer(), None);
    }
}
