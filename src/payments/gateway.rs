//! Gateway adapter
//!
//! The narrow surface the host checkout framework calls. One concrete
//! type composes availability checks, request building, session creation
//! and reconciliation instead of subclassing a framework base class. The
//! remote client sits behind [`PaymentProcessor`], so flows run unchanged
//! against a stub.

use crate::audit::AuditLog;
use crate::config::{GatewayConfig, Warning};
use crate::error::{GatewayError, GatewayResult};
use crate::order::{Order, OrderStatus};
use crate::payments::interpret::interpret;
use crate::payments::providers::mobbex::MobbexClient;
use crate::payments::reconcile::{apply_outcome, Flow};
use crate::payments::request::build_session_request;
use crate::payments::traits::PaymentProcessor;
use crate::payments::types::{RawResponse, ReconcileCommand, RefundRequest, SessionOutcome};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Checkout capabilities advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Products,
    Refunds,
}

pub const SUPPORTED_FEATURES: &[Feature] = &[Feature::Products, Feature::Refunds];

/// Result of a checkout attempt.
///
/// `redirect_url` is where the host sends the buyer next: the processor's
/// session page for a created session, the thank-you page for an instant
/// approval, absent for a decline (the host shows the generic failure
/// message instead). `commands` go to the Order Store either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub outcome: SessionOutcome,
    pub redirect_url: Option<String>,
    pub commands: Vec<ReconcileCommand>,
}

/// Result of a refund attempt: the processor's answer plus the Order
/// Store commands derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundOutcome {
    pub outcome: SessionOutcome,
    pub commands: Vec<ReconcileCommand>,
}

/// Mobbex gateway adapter.
pub struct MobbexGateway {
    config: GatewayConfig,
    processor: Arc<dyn PaymentProcessor>,
}

impl MobbexGateway {
    /// Build a gateway backed by the real Mobbex client.
    pub fn new(config: GatewayConfig) -> Self {
        let processor = Arc::new(MobbexClient::new(config.clone()));
        Self { config, processor }
    }

    /// Build a gateway with an injected audit log for the client.
    pub fn with_audit(config: GatewayConfig, audit: Arc<dyn AuditLog>) -> Self {
        let processor = Arc::new(MobbexClient::with_audit(config.clone(), audit));
        Self { config, processor }
    }

    /// Build a gateway with a custom processor, e.g. a stub in tests.
    pub fn with_processor(config: GatewayConfig, processor: Arc<dyn PaymentProcessor>) -> Self {
        Self { config, processor }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Whether the gateway may be offered at checkout.
    pub fn is_available(&self) -> bool {
        self.config.is_available()
    }

    /// Environment warnings for the host's admin surface.
    pub fn check_environment(&self) -> Vec<Warning> {
        self.config.check_environment()
    }

    pub fn supported_features(&self) -> &'static [Feature] {
        SUPPORTED_FEATURES
    }

    /// Operator-facing link to the stored transaction, if any.
    pub fn transaction_url(&self, order: &Order) -> Option<String> {
        order
            .transaction_id
            .as_ref()
            .map(|id| format!("{}/console/payments/{}", self.config.base_url, id))
    }

    /// Run a checkout attempt: build the session request, create the
    /// remote session, and reconcile the outcome.
    ///
    /// Transport failures, malformed responses and state-machine
    /// violations surface as errors; the host maps retryable ones to the
    /// generic buyer message. A decline is a normal result: the order is
    /// marked failed and no redirect is issued.
    pub async fn checkout(&self, order: &Order) -> GatewayResult<Checkout> {
        if !self.is_available() {
            return Err(GatewayError::Configuration {
                message: "gateway is disabled or missing credentials".to_string(),
            });
        }

        let request = build_session_request(order)?;
        let outcome = self.processor.create_session(&request).await;
        let commands = apply_outcome(order, &outcome, &Flow::Payment)?;

        let redirect_url = match &outcome {
            SessionOutcome::Created { redirect_url } => {
                info!(
                    "Mobbex session created for order #{}, redirecting buyer",
                    order.id
                );
                Some(redirect_url.clone())
            }
            // Instant approval: the buyer skips the processor page and
            // lands straight on the thank-you page.
            SessionOutcome::Approved { .. } => Some(order.return_url.clone()),
            // Declines fall through; transport and parse failures were
            // already returned as errors by apply_outcome.
            _ => None,
        };

        Ok(Checkout {
            outcome,
            redirect_url,
            commands,
        })
    }

    /// Reconcile the processor's confirmation payload when the buyer
    /// returns from the session, or when the processor calls back.
    pub fn confirm(
        &self,
        order: &Order,
        response: &RawResponse,
    ) -> GatewayResult<Vec<ReconcileCommand>> {
        let outcome = interpret(response);
        apply_outcome(order, &outcome, &Flow::Payment)
    }

    /// Initiate a refund for a completed order.
    ///
    /// Precondition-checked before any network call: the order must be
    /// completed with a stored transaction id, and the amount (defaulting
    /// to the full total) must be positive and within the order total.
    pub async fn refund(
        &self,
        order: &Order,
        amount: Option<Decimal>,
        reason: &str,
    ) -> GatewayResult<RefundOutcome> {
        if order.status != OrderStatus::Completed {
            return Err(GatewayError::Precondition {
                reason: format!(
                    "order {} is {}, refunds require a completed order",
                    order.id, order.status
                ),
            });
        }

        let Some(transaction_id) = order.transaction_id.clone() else {
            return Err(GatewayError::Precondition {
                reason: format!("order {} has no stored transaction id", order.id),
            });
        };

        let amount = amount.unwrap_or(order.total);
        if amount <= Decimal::ZERO || amount > order.total {
            return Err(GatewayError::Precondition {
                reason: format!(
                    "refund amount {} is outside the order total {}",
                    amount, order.total
                ),
            });
        }

        let request = RefundRequest {
            order_id: order.id,
            amount,
            reason: reason.to_string(),
            transaction_id,
        };

        let outcome = self.processor.refund(&request).await;
        let commands = apply_outcome(
            order,
            &outcome,
            &Flow::Refund {
                amount,
                reason: reason.to_string(),
            },
        )?;

        Ok(RefundOutcome { outcome, commands })
    }
}
