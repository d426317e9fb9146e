//! Gateway error types
//!
//! Every fallible core operation returns `GatewayError`. Transport and
//! parse failures are the only retryable kinds; state-machine violations
//! are fatal to the current operation.

use crate::order::OrderStatus;
use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Generic message shown to buyers for any checkout-time failure.
pub const BUYER_FAILURE_MESSAGE: &str =
    "Payment could not be completed. Please try again or choose another payment method.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Malformed input order, caught before any network call
    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// Network-level failure (DNS, connect, timeout) or processor-side HTTP error
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// HTTP success whose body does not match the expected envelope
    #[error("malformed processor response: {raw}")]
    Malformed { raw: String },

    /// Well-formed decline from the processor
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    /// A different transaction id was already stored on the order
    #[error("order {order_id} already holds transaction {existing}, refusing to apply {incoming}")]
    InconsistentState {
        order_id: u64,
        existing: String,
        incoming: String,
    },

    /// The order state machine does not allow the attempted transition
    #[error("order {order_id} is {from}, cannot transition to {attempted}")]
    InvalidTransition {
        order_id: u64,
        from: OrderStatus,
        attempted: OrderStatus,
    },

    /// Refund requested against an order that never completed a payment
    #[error("refund precondition failed: {reason}")]
    Precondition { reason: String },

    /// Gateway misconfigured or unavailable
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl GatewayError {
    /// Whether a future retry layer could reasonably re-attempt the operation.
    /// State-machine violations and bad input never qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Transport { .. } | GatewayError::Malformed { .. }
        )
    }

    /// The single generic message surfaced to buyers. Operator-facing paths
    /// use the specific `Display` output instead.
    pub fn buyer_message(&self) -> &'static str {
        BUYER_FAILURE_MESSAGE
    }
}
