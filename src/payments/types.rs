//! Payment session types and data structures
//!
//! Common types for session creation, confirmation and refunds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outbound session-creation request, built fresh per checkout attempt
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSessionRequest {
    /// Order total in the order's currency
    pub total: Decimal,
    /// Currency code, matched to the order
    pub currency: String,
    /// Deterministic order reference, `#<order_id>`; remote reconciliation
    /// depends on parsing this back
    pub reference: String,
    /// Line item names, one per line, order preserved
    pub description: String,
    /// Thank-you URL plus the method marker query parameter
    pub return_url: String,
}

/// Refund request against a previously completed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefundRequest {
    pub order_id: u64,
    /// Amount to refund; callers default this to the full order total
    pub amount: Decimal,
    /// Free-text reason, surfaced to the operator and the audit note
    pub reason: String,
    /// Transaction id stored when the payment completed
    pub transaction_id: String,
}

/// Interpreted result of one exchange with the processor.
///
/// Exactly one variant is produced per call; every caller must handle the
/// enum exhaustively rather than assume success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Session created; send the buyer to the processor
    Created { redirect_url: String },
    /// Payment or refund confirmed by the processor
    Approved { transaction_id: String },
    /// Well-formed decline
    Declined { reason: String },
    /// Network-level failure or processor-side HTTP error; not retried
    TransportError { message: String },
    /// HTTP success whose body violates the expected envelope; indicates a
    /// processor contract change rather than a network problem
    MalformedResponse { raw: String },
}

/// Raw HTTP response handed to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Mutation command for the external Order Store.
///
/// The gateway never touches order storage; it emits these and the host
/// applies them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ReconcileCommand {
    /// Hand this URL to the host's redirect mechanism
    RedirectBuyer { url: String },
    /// Transition to completed and store the transaction id
    MarkCompleted { transaction_id: String },
    /// Transition to failed
    MarkFailed { reason: String },
    /// Transition to refunded
    MarkRefunded { amount: Decimal, reason: String },
    /// Append an audit note to the order
    AppendNote { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let outcome = SessionOutcome::Created {
            redirect_url: "https://pay.example/s1".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "created");
        assert_eq!(json["redirect_url"], "https://pay.example/s1");
    }

    #[test]
    fn test_reconcile_command_round_trip() {
        let command = ReconcileCommand::MarkRefunded {
            amount: dec!(500.00),
            reason: "duplicate order".to_string(),
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: ReconcileCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
