//! Mobbex checkout gateway
//!
//! Integrates a host checkout platform with the Mobbex payment
//! processor: creates a remote payment session for an order, hands back
//! the buyer redirect URL, and reconciles session outcomes (completion,
//! decline, refund) into mutation commands for the host's Order Store.
//!
//! The host calls through [`MobbexGateway`]; orders and their storage
//! stay on the host's side of the seam.

pub mod audit;
pub mod config;
pub mod error;
pub mod order;
pub mod payments;

pub use audit::{AuditEntry, AuditLog, MemoryAuditLog, TracingAuditLog};
pub use config::{GatewayConfig, Warning};
pub use error::{GatewayError, GatewayResult};
pub use order::{LineItem, Order, OrderStatus};
pub use payments::gateway::{Checkout, Feature, MobbexGateway, RefundOutcome};
pub use payments::interpret::interpret;
pub use payments::providers::MobbexClient;
pub use payments::reconcile::{apply_outcome, Flow};
pub use payments::request::build_session_request;
pub use payments::traits::PaymentProcessor;
pub use payments::types::{
    PaymentSessionRequest, RawResponse, ReconcileCommand, RefundRequest, SessionOutcome,
};
