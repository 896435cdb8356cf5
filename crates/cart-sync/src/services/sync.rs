//! Commerce backend cart merge API client.
//!
//! The actual merge of cart line items into the checkout session happens in
//! the commerce backend; this client only triggers it. Calls are
//! fire-and-forget from the handler's perspective: failures are logged and
//! never block the redirect.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::SyncApiConfig;
use crate::models::CustomerId;
use crate::services::reconcile::CartSynchronizer;

/// Errors that can occur when calling the merge API.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Client error: {0}")]
    Client(String),
}

#[derive(Serialize)]
struct GuestSyncRequest<'a> {
    cart_id: &'a str,
}

#[derive(Serialize)]
struct CustomerSyncRequest<'a> {
    customer_id: CustomerId,
    cart_id: &'a str,
}

/// Cart merge API client.
#[derive(Clone)]
pub struct SyncClient {
    client: reqwest::Client,
    base_url: String,
}

impl SyncClient {
    /// Create a new merge API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &SyncApiConfig) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| SyncError::Client(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<(), SyncError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

impl CartSynchronizer for SyncClient {
    async fn synchronize_guest_cart(&self, cart_id: &str) {
        let body = GuestSyncRequest { cart_id };
        if let Err(e) = self.post("/cart/sync/guest", &body).await {
            tracing::error!("Guest cart sync failed for cart {cart_id}: {e}");
        }
    }

    async fn synchronize_customer_cart(&self, customer_id: CustomerId, cart_id: &str) {
        let body = CustomerSyncRequest {
            customer_id,
            cart_id,
        };
        if let Err(e) = self.post("/cart/sync/customer", &body).await {
            tracing::error!("Customer cart sync failed for customer {customer_id}, cart {cart_id}: {e}");
        }
    }
}
