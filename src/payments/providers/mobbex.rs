//! Mobbex remote session client
//!
//! Implements the [`PaymentProcessor`] trait against the Mobbex checkout
//! API: an authenticated form-encoded POST per operation, a bounded
//! timeout, and transport-error mapping. No retries: a synchronous
//! checkout redirect fails fast and the buyer decides whether to try
//! again. Retry candidates are tagged via `GatewayError::is_retryable`.

use crate::audit::{AuditEntry, AuditLog, TracingAuditLog};
use crate::config::GatewayConfig;
use crate::payments::interpret::interpret;
use crate::payments::traits::PaymentProcessor;
use crate::payments::types::{PaymentSessionRequest, RawResponse, RefundRequest, SessionOutcome};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

/// Session-creation endpoint path
pub const CHECKOUT_ENDPOINT: &str = "/p/checkout/create";

/// Refund endpoint path
pub const REFUND_ENDPOINT: &str = "/p/refund";

/// Mobbex session client
pub struct MobbexClient {
    config: GatewayConfig,
    client: Client,
    audit: Arc<dyn AuditLog>,
}

impl MobbexClient {
    /// Create a new client with the default tracing-backed audit log.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_audit(config, Arc::new(TracingAuditLog))
    }

    /// Create a new client recording exchanges through the given audit log.
    pub fn with_audit(config: GatewayConfig, audit: Arc<dyn AuditLog>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            audit,
        }
    }

    /// Create a client from environment configuration.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = GatewayConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Make one authenticated form POST against the Mobbex API and
    /// interpret the response.
    async fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> SessionOutcome {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let request_token = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("x-access-token", &self.config.access_token)
            .header("x-request-token", &request_token)
            .form(fields)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();

                self.audit_exchange(endpoint, &request_token, fields, Some(status), Some(&body));

                interpret(&RawResponse { status, body })
            }
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("request to {} timed out after {}s", url, self.config.timeout_secs)
                } else if e.is_connect() {
                    format!("connection to {} failed: {}", url, e)
                } else {
                    format!("request to {} failed: {}", url, e)
                };
                error!("Mobbex transport error: {}", message);

                self.audit_exchange(endpoint, &request_token, fields, None, None);

                SessionOutcome::TransportError { message }
            }
        }
    }

    fn audit_exchange(
        &self,
        endpoint: &str,
        request_token: &str,
        fields: &[(String, String)],
        status: Option<u16>,
        body: Option<&str>,
    ) {
        if !self.config.debug {
            return;
        }

        let entry = AuditEntry::new(
            endpoint,
            vec![
                ("x-api-key".to_string(), self.config.api_key.clone()),
                ("x-access-token".to_string(), self.config.access_token.clone()),
                ("x-request-token".to_string(), request_token.to_string()),
            ],
            fields.to_vec(),
            status,
            body.map(str::to_string),
        );
        self.audit.record(&entry);
    }
}

#[async_trait]
impl PaymentProcessor for MobbexClient {
    async fn create_session(&self, request: &PaymentSessionRequest) -> SessionOutcome {
        info!(
            "Creating Mobbex session: {} {} {}",
            request.total, request.currency, request.reference
        );

        let fields = vec![
            ("total".to_string(), request.total.to_string()),
            ("reference".to_string(), request.reference.clone()),
            ("description".to_string(), request.description.clone()),
            ("return_url".to_string(), request.return_url.clone()),
        ];

        self.post_form(CHECKOUT_ENDPOINT, &fields).await
    }

    async fn refund(&self, request: &RefundRequest) -> SessionOutcome {
        info!(
            "Requesting Mobbex refund: order #{} amount {} transaction {}",
            request.order_id, request.amount, request.transaction_id
        );

        let fields = vec![
            ("payment_id".to_string(), request.transaction_id.clone()),
            ("total".to_string(), request.amount.to_string()),
            ("reason".to_string(), request.reason.clone()),
        ];

        self.post_form(REFUND_ENDPOINT, &fields).await
    }
}
