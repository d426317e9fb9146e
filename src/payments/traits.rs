//! Remote processor trait definition
//!
//! Defines the narrow seam between the gateway and the remote processor,
//! so flows can run against the real client or a stub.

use crate::payments::types::{PaymentSessionRequest, RefundRequest, SessionOutcome};
use async_trait::async_trait;

/// Trait for the remote session client
///
/// Implementations own transport, timeout and error mapping for one
/// processor. Both methods resolve every failure into a [`SessionOutcome`]
/// variant instead of an error type, because the caller must handle the
/// full outcome set either way.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a remote payment session for a checkout attempt
    ///
    /// # Arguments
    /// * `request` - Session request containing total, reference, description and return URL
    ///
    /// # Returns
    /// * `SessionOutcome` - `Created` with the buyer redirect URL on success
    async fn create_session(&self, request: &PaymentSessionRequest) -> SessionOutcome;

    /// Request a refund for a previously completed payment
    ///
    /// # Arguments
    /// * `request` - Refund request carrying the stored transaction id
    ///
    /// # Returns
    /// * `SessionOutcome` - `Approved` on confirmed refund, `Declined` otherwise
    async fn refund(&self, request: &RefundRequest) -> SessionOutcome;
}
