//! Integration tests for the checkout, confirmation and refund flows
//!
//! The flows run against a stub processor, so no network is involved:
//! the stub answers with a fixed outcome and records every call it
//! receives.

use async_trait::async_trait;
use mobbex_gateway::{
    GatewayConfig, GatewayError, LineItem, MobbexGateway, Order, OrderStatus, PaymentProcessor,
    PaymentSessionRequest, RawResponse, ReconcileCommand, RefundRequest, SessionOutcome,
};
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

/// Stub processor answering with canned outcomes and recording calls.
struct StubProcessor {
    session_outcome: SessionOutcome,
    refund_outcome: SessionOutcome,
    calls: Mutex<Vec<String>>,
}

impl StubProcessor {
    fn new(session_outcome: SessionOutcome, refund_outcome: SessionOutcome) -> Self {
        Self {
            session_outcome,
            refund_outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for StubProcessor {
    async fn create_session(&self, request: &PaymentSessionRequest) -> SessionOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_session {}", request.reference));
        self.session_outcome.clone()
    }

    async fn refund(&self, request: &RefundRequest) -> SessionOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(format!("refund {}", request.transaction_id));
        self.refund_outcome.clone()
    }
}

fn config() -> GatewayConfig {
    GatewayConfig {
        api_key: "test-key".to_string(),
        access_token: "test-token".to_string(),
        ..GatewayConfig::default()
    }
}

fn pending_order() -> Order {
    Order {
        id: 101,
        items: vec![LineItem {
            name: "Widget".to_string(),
            quantity: 1,
        }],
        total: dec!(500.00),
        currency: "ARS".to_string(),
        status: OrderStatus::Pending,
        transaction_id: None,
        return_url: "https://shop.example/thanks/101".to_string(),
    }
}

fn completed_order(transaction_id: &str) -> Order {
    Order {
        status: OrderStatus::Completed,
        transaction_id: Some(transaction_id.to_string()),
        ..pending_order()
    }
}

fn gateway_with(stub: Arc<StubProcessor>) -> MobbexGateway {
    MobbexGateway::with_processor(config(), stub)
}

fn declined(reason: &str) -> SessionOutcome {
    SessionOutcome::Declined {
        reason: reason.to_string(),
    }
}

#[tokio::test]
async fn test_checkout_redirects_buyer_to_created_session() {
    let stub = Arc::new(StubProcessor::new(
        SessionOutcome::Created {
            redirect_url: "https://pay.example/s1".to_string(),
        },
        declined("unused"),
    ));
    let gateway = gateway_with(stub.clone());

    let checkout = gateway.checkout(&pending_order()).await.unwrap();

    assert_eq!(
        checkout.redirect_url.as_deref(),
        Some("https://pay.example/s1")
    );
    assert_eq!(
        checkout.commands,
        vec![ReconcileCommand::RedirectBuyer {
            url: "https://pay.example/s1".to_string()
        }]
    );
    assert_eq!(stub.calls(), vec!["create_session #101"]);
}

#[tokio::test]
async fn test_checkout_decline_marks_order_failed_without_redirect() {
    let stub = Arc::new(StubProcessor::new(
        declined("insufficient funds"),
        declined("unused"),
    ));
    let gateway = gateway_with(stub);

    let checkout = gateway.checkout(&pending_order()).await.unwrap();

    assert_eq!(checkout.redirect_url, None);
    assert_eq!(
        checkout.commands[0],
        ReconcileCommand::MarkFailed {
            reason: "insufficient funds".to_string()
        }
    );
}

#[tokio::test]
async fn test_checkout_transport_failure_leaves_order_untouched() {
    let stub = Arc::new(StubProcessor::new(
        SessionOutcome::TransportError {
            message: "request to https://mobbex.com/p/checkout/create timed out after 45s"
                .to_string(),
        },
        declined("unused"),
    ));
    let gateway = gateway_with(stub.clone());

    let err = gateway.checkout(&pending_order()).await.unwrap_err();

    // No redirect, no commands: the buyer sees the generic failure only.
    assert!(matches!(err, GatewayError::Transport { .. }));
    assert!(err.is_retryable());
    assert_eq!(stub.calls(), vec!["create_session #101"]);
}

#[tokio::test]
async fn test_checkout_rejects_invalid_order_before_any_network_call() {
    let stub = Arc::new(StubProcessor::new(declined("unused"), declined("unused")));
    let gateway = gateway_with(stub.clone());

    let mut order = pending_order();
    order.items.clear();

    let err = gateway.checkout(&order).await.unwrap_err();

    assert!(matches!(err, GatewayError::InvalidOrder { .. }));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_confirmation_completes_the_order_idempotently() {
    let stub = Arc::new(StubProcessor::new(declined("unused"), declined("unused")));
    let gateway = gateway_with(stub);

    let payload = RawResponse {
        status: 200,
        body: r#"{"result":true,"data":{"id":"tx-9"}}"#.to_string(),
    };

    // First confirmation on a pending order completes it.
    let commands = gateway.confirm(&pending_order(), &payload).unwrap();
    assert_eq!(
        commands[0],
        ReconcileCommand::MarkCompleted {
            transaction_id: "tx-9".to_string()
        }
    );

    // Replaying the same payload after the store applied it is a no-op.
    let replay = gateway.confirm(&completed_order("tx-9"), &payload).unwrap();
    assert!(replay.is_empty());

    // A different transaction id for the same order is data corruption.
    let conflicting = RawResponse {
        status: 200,
        body: r#"{"result":true,"data":{"id":"tx-10"}}"#.to_string(),
    };
    let err = gateway
        .confirm(&completed_order("tx-9"), &conflicting)
        .unwrap_err();
    assert!(matches!(err, GatewayError::InconsistentState { .. }));
}

#[tokio::test]
async fn test_refund_transitions_completed_order_to_refunded() {
    let stub = Arc::new(StubProcessor::new(
        declined("unused"),
        SessionOutcome::Approved {
            transaction_id: "rf-1".to_string(),
        },
    ));
    let gateway = gateway_with(stub.clone());

    let refund = gateway
        .refund(&completed_order("tx-9"), Some(dec!(500.00)), "duplicate order")
        .await
        .unwrap();

    assert_eq!(
        refund.commands[0],
        ReconcileCommand::MarkRefunded {
            amount: dec!(500.00),
            reason: "duplicate order".to_string()
        }
    );
    assert!(matches!(
        &refund.commands[1],
        ReconcileCommand::AppendNote { text } if text.contains("500.00")
    ));
    assert_eq!(stub.calls(), vec!["refund tx-9"]);
}

#[tokio::test]
async fn test_refund_amount_defaults_to_full_total() {
    let stub = Arc::new(StubProcessor::new(
        declined("unused"),
        SessionOutcome::Approved {
            transaction_id: "rf-1".to_string(),
        },
    ));
    let gateway = gateway_with(stub);

    let refund = gateway
        .refund(&completed_order("tx-9"), None, "order cancelled")
        .await
        .unwrap();

    assert_eq!(
        refund.commands[0],
        ReconcileCommand::MarkRefunded {
            amount: dec!(500.00),
            reason: "order cancelled".to_string()
        }
    );
}

#[tokio::test]
async fn test_refund_on_pending_order_fails_before_any_network_call() {
    let stub = Arc::new(StubProcessor::new(declined("unused"), declined("unused")));
    let gateway = gateway_with(stub.clone());

    let err = gateway
        .refund(&pending_order(), Some(dec!(500.00)), "changed mind")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Precondition { .. }));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_refund_decline_keeps_order_completed_and_surfaces_reason() {
    let stub = Arc::new(StubProcessor::new(
        declined("unused"),
        declined("refund window expired"),
    ));
    let gateway = gateway_with(stub);

    let refund = gateway
        .refund(&completed_order("tx-9"), None, "operator request")
        .await
        .unwrap();

    assert_eq!(refund.commands.len(), 1);
    assert!(matches!(
        &refund.commands[0],
        ReconcileCommand::AppendNote { text } if text.contains("refund window expired")
    ));
}

#[tokio::test]
async fn test_disabled_gateway_refuses_checkout() {
    let stub = Arc::new(StubProcessor::new(declined("unused"), declined("unused")));
    let mut config = config();
    config.enabled = false;
    let gateway = MobbexGateway::with_processor(config, stub.clone());

    let err = gateway.checkout(&pending_order()).await.unwrap_err();

    assert!(matches!(err, GatewayError::Configuration { .. }));
    assert!(stub.calls().is_empty());
}
