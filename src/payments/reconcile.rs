//! Order reconciliation
//!
//! Applies an interpreted session outcome to an order and produces the
//! mutation commands the external Order Store executes. The state machine
//! lives entirely here: `pending -> on-hold -> completed | failed`,
//! `completed -> refunded` one-way, with `refunded` and `failed` terminal.

use crate::error::{GatewayError, GatewayResult};
use crate::order::{Order, OrderStatus};
use crate::payments::types::{ReconcileCommand, SessionOutcome};
use rust_decimal::Decimal;

/// Which exchange produced the outcome being applied. The refund flow
/// carries amount and reason for the audit note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Payment,
    Refund { amount: Decimal, reason: String },
}

/// Apply an outcome to an order, returning Order Store commands.
///
/// Transport and parse failures return errors and never mutate the order;
/// the caller decides how to surface them. State-machine violations are
/// hard failures: they signal data-corruption risk and must not be
/// swallowed.
pub fn apply_outcome(
    order: &Order,
    outcome: &SessionOutcome,
    flow: &Flow,
) -> GatewayResult<Vec<ReconcileCommand>> {
    match outcome {
        SessionOutcome::TransportError { message } => Err(GatewayError::Transport {
            message: message.clone(),
        }),
        SessionOutcome::MalformedResponse { raw } => {
            Err(GatewayError::Malformed { raw: raw.clone() })
        }
        SessionOutcome::Created { redirect_url } => {
            // Status changes only on a later confirmation step; here the
            // buyer is just sent to the processor.
            Ok(vec![ReconcileCommand::RedirectBuyer {
                url: redirect_url.clone(),
            }])
        }
        SessionOutcome::Approved { transaction_id } => match flow {
            Flow::Payment => payment_approved(order, transaction_id),
            Flow::Refund { amount, reason } => refund_approved(order, transaction_id, amount, reason),
        },
        SessionOutcome::Declined { reason } => match flow {
            Flow::Payment => payment_declined(order, reason),
            Flow::Refund { .. } => refund_declined(order, reason),
        },
    }
}

fn payment_approved(order: &Order, transaction_id: &str) -> GatewayResult<Vec<ReconcileCommand>> {
    match order.status {
        OrderStatus::Pending | OrderStatus::OnHold => {
            if let Some(existing) = &order.transaction_id {
                if existing != transaction_id {
                    return Err(inconsistent(order, existing, transaction_id));
                }
            }
            Ok(vec![
                ReconcileCommand::MarkCompleted {
                    transaction_id: transaction_id.to_string(),
                },
                ReconcileCommand::AppendNote {
                    text: format!("Mobbex payment approved (ID: {})", transaction_id),
                },
            ])
        }
        OrderStatus::Completed => match &order.transaction_id {
            // Replayed confirmation for the same payment: nothing to do.
            Some(existing) if existing == transaction_id => Ok(Vec::new()),
            Some(existing) => Err(inconsistent(order, existing, transaction_id)),
            None => Err(invalid_transition(order, OrderStatus::Completed)),
        },
        OrderStatus::Refunded | OrderStatus::Failed => {
            Err(invalid_transition(order, OrderStatus::Completed))
        }
    }
}

fn payment_declined(order: &Order, reason: &str) -> GatewayResult<Vec<ReconcileCommand>> {
    match order.status {
        OrderStatus::Pending | OrderStatus::OnHold => {
            let text = if reason.is_empty() {
                "Mobbex payment declined".to_string()
            } else {
                format!("Mobbex payment declined: {}", reason)
            };
            Ok(vec![
                ReconcileCommand::MarkFailed {
                    reason: reason.to_string(),
                },
                ReconcileCommand::AppendNote { text },
            ])
        }
        _ => Err(invalid_transition(order, OrderStatus::Failed)),
    }
}

fn refund_approved(
    order: &Order,
    refund_id: &str,
    amount: &Decimal,
    reason: &str,
) -> GatewayResult<Vec<ReconcileCommand>> {
    match order.status {
        OrderStatus::Completed => Ok(vec![
            ReconcileCommand::MarkRefunded {
                amount: *amount,
                reason: reason.to_string(),
            },
            ReconcileCommand::AppendNote {
                text: format!("Refunded {} - Refund ID: {}", amount, refund_id),
            },
        ]),
        _ => Err(invalid_transition(order, OrderStatus::Refunded)),
    }
}

fn refund_declined(order: &Order, reason: &str) -> GatewayResult<Vec<ReconcileCommand>> {
    match order.status {
        // The order stays completed; the operator sees the reason.
        OrderStatus::Completed => {
            let text = if reason.is_empty() {
                "Error in refunding the order".to_string()
            } else {
                format!("Error in refunding the order: {}", reason)
            };
            Ok(vec![ReconcileCommand::AppendNote { text }])
        }
        _ => Err(invalid_transition(order, OrderStatus::Refunded)),
    }
}

fn inconsistent(order: &Order, existing: &str, incoming: &str) -> GatewayError {
    GatewayError::InconsistentState {
        order_id: order.id,
        existing: existing.to_string(),
        incoming: incoming.to_string(),
    }
}

fn invalid_transition(order: &Order, attempted: OrderStatus) -> GatewayError {
    GatewayError::InvalidTransition {
        order_id: order.id,
        from: order.status,
        attempted,
    }
}
