use std::fmt;

use serde::{Deserialize, Serialize};

/// The two tradable ESOP classes. Performance ESOPs rest in their own FIFO
/// queue on the sell side; buyers always take delivery as non-performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsopKind {
    Performance,
    NonPerformance,
}

impl fmt::Display for EsopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsopKind::Performance => write!(f, "PERFORMANCE"),
            EsopKind::NonPerformance => write!(f, "NON-PERFORMANCE"),
        }
    }
}

/// Order side. Only sell orders carry an ESOP kind, so a buy order with a
/// kind attached is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell(EsopKind),
}

impl Side {
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    pub fn esop_kind(&self) -> Option<EsopKind> {
        match self {
            Side::Buy => None,
            Side::Sell(kind) => Some(*kind),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell(_) => write!(f, "SELL"),
        }
    }
}

/// Fill state. Transitions only run forward:
/// Unfilled -> PartiallyFilled -> Filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Unfilled,
    PartiallyFilled,
    Filled,
}

/// One trade leg as recorded on an order. Both parties to a trade receive a
/// record with the same `execution_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub execution_id: u64,
    pub price: u64,
    pub quantity: u64,
}

/// An admitted order. Identity and terms are fixed at creation; only the
/// fill state (`status`, `remaining_quantity`, `executions`) mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub username: String,
    pub side: Side,
    pub quantity: u64,
    pub price: u64,
    pub status: OrderStatus,
    pub remaining_quantity: u64,
    pub executions: Vec<ExecutionRecord>,
}

impl Order {
    pub fn new(order_id: u64, username: &str, side: Side, quantity: u64, price: u64) -> Self {
        Order {
            order_id,
            username: username.to_string(),
            side,
            quantity,
            price,
            status: OrderStatus::Unfilled,
            remaining_quantity: quantity,
            executions: Vec::new(),
        }
    }

    /// Applies one fill. The execution quantity never exceeds the remaining
    /// quantity (the engine trades `min` of the two remainders).
    pub fn record_execution(&mut self, execution: ExecutionRecord) {
        if execution.quantity == self.remaining_quantity {
            self.status = OrderStatus::Filled;
        } else {
            self.status = OrderStatus::PartiallyFilled;
        }
        self.remaining_quantity -= execution.quantity;
        self.executions.push(execution);
    }

    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }
}
