//! Order view and payment-status state machine
//!
//! Orders are owned by the host's Order Store. The gateway only reads this
//! view and emits mutation commands; it never persists anything itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single order line, as far as the gateway needs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Awaiting a payment attempt
    Pending,
    /// Session created, awaiting external confirmation
    OnHold,
    /// Payment confirmed, transaction id stored
    Completed,
    /// Refund confirmed, one-way from completed
    Refunded,
    /// Payment declined
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::OnHold => write!(f, "on-hold"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Refunded => write!(f, "refunded"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

impl OrderStatus {
    /// All states reachable from this one.
    pub fn valid_transitions(&self) -> Vec<OrderStatus> {
        match self {
            OrderStatus::Pending => vec![
                OrderStatus::OnHold,
                OrderStatus::Completed,
                OrderStatus::Failed,
            ],
            OrderStatus::OnHold => vec![OrderStatus::Completed, OrderStatus::Failed],
            OrderStatus::Completed => vec![OrderStatus::Refunded],
            // Terminal states - no valid transitions
            OrderStatus::Refunded => vec![],
            OrderStatus::Failed => vec![],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Refunded | OrderStatus::Failed)
    }

    /// Convert from the host's status string
    pub fn from_status_str(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "on-hold" | "on_hold" => Some(OrderStatus::OnHold),
            "completed" => Some(OrderStatus::Completed),
            "refunded" => Some(OrderStatus::Refunded),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }

    /// Convert to the host's status string
    pub fn as_status_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }
}

/// Read-only view of an order in the host's Order Store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    pub items: Vec<LineItem>,
    /// Order total in the order's currency
    pub total: Decimal,
    /// Currency code (ARS, USD, etc.)
    pub currency: String,
    pub status: OrderStatus,
    /// Remote transaction id, set at most once per successful session
    pub transaction_id: Option<String>,
    /// The host's thank-you URL for this order
    pub return_url: String,
}
