//! Session request builder
//!
//! Pure construction of the outbound session-creation request from an
//! order: no network, no mutation.

use crate::error::{GatewayError, GatewayResult};
use crate::order::Order;
use crate::payments::types::PaymentSessionRequest;
use rust_decimal::Decimal;

/// Query parameter appended to the return URL so the host can recognize
/// which payment method the buyer comes back from.
pub const METHOD_MARKER: &str = "wcm_p_method=mobbex";

/// Build the session-creation request for an order.
///
/// Deterministic: the same order always produces the same request. Fails
/// with `InvalidOrder` before any network call when the order cannot be
/// charged.
pub fn build_session_request(order: &Order) -> GatewayResult<PaymentSessionRequest> {
    if order.items.is_empty() {
        return Err(GatewayError::InvalidOrder {
            reason: format!("order {} has no line items", order.id),
        });
    }

    if order.total <= Decimal::ZERO {
        return Err(GatewayError::InvalidOrder {
            reason: format!("order {} total must be positive, got {}", order.id, order.total),
        });
    }

    let description = order
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(PaymentSessionRequest {
        total: order.total,
        currency: order.currency.clone(),
        reference: format!("#{}", order.id),
        description,
        return_url: with_method_marker(&order.return_url),
    })
}

fn with_method_marker(return_url: &str) -> String {
    let separator = if return_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", return_url, separator, METHOD_MARKER)
}
