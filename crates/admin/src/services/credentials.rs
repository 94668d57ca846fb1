//! Credential delivery to the external fulfilment endpoint.
//!
//! When staff fulfil a digital order they paste the purchased
//! credentials into the back office; this service forwards them to the
//! configured delivery endpoint, which emails the customer. The caller
//! moves the order to `completed` only after delivery succeeds.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kinmel_core::{Order, OrderItem};

use crate::config::CredentialDeliveryConfig;

/// Errors from the delivery endpoint.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// No endpoint configured for this deployment.
    #[error("credential delivery is not configured")]
    NotConfigured,

    /// Request could not be sent or the response body not read.
    #[error("delivery request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status.
    #[error("delivery endpoint returned {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

/// One credential line staff deliver for an order, e.g. an account
/// email and password, or a gift card code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub label: String,
    pub value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryPayload<'a> {
    order_id: i32,
    order_number: &'a str,
    customer_email: &'a str,
    customer_name: &'a str,
    items: Vec<DeliveryItem<'a>>,
    credentials: &'a [CredentialEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Serialize)]
struct DeliveryItem<'a> {
    name: &'a str,
    variant: Option<&'a str>,
    quantity: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the credential delivery endpoint.
#[derive(Clone)]
pub struct CredentialDelivery {
    client: reqwest::Client,
    config: Option<CredentialDeliveryConfig>,
}

impl CredentialDelivery {
    #[must_use]
    pub const fn new(client: reqwest::Client, config: Option<CredentialDeliveryConfig>) -> Self {
        Self { client, config }
    }

    /// Whether an endpoint is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Send the order's credentials to the delivery endpoint.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when no endpoint is set, `Http` on
    /// transport failure and `Rejected` when the endpoint answers with
    /// a non-success status.
    pub async fn deliver(
        &self,
        order: &Order,
        items: &[OrderItem],
        credentials: &[CredentialEntry],
        notes: Option<&str>,
    ) -> Result<(), DeliveryError> {
        let config = self.config.as_ref().ok_or(DeliveryError::NotConfigured)?;

        let payload = DeliveryPayload {
            order_id: order.id.as_i32(),
            order_number: order.order_number.as_str(),
            customer_email: &order.customer_email,
            customer_name: &order.customer_name,
            items: items
                .iter()
                .map(|item| DeliveryItem {
                    name: &item.product_name,
                    variant: item.variant_label.as_deref(),
                    quantity: item.quantity,
                })
                .collect(),
            credentials,
            notes,
        };

        let response = self
            .client
            .post(&config.url)
            .bearer_auth(config.key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                order_number = %order.order_number,
                credential_count = credentials.len(),
                "Delivered credentials"
            );
            return Ok(());
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned(),
        };
        Err(DeliveryError::Rejected { status, message })
    }
}
