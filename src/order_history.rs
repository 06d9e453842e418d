use serde::Serialize;

use crate::order::{Order, OrderStatus};

/// One execution-log line (or the open remainder) in an order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillLine {
    pub price: u64,
    pub quantity: u64,
}

/// Client-facing projection of one order's current state. Exactly one of
/// the three optional blocks is populated per status, except
/// partially-filled orders which carry both `partially_filled` (executions
/// so far, chronological) and `unfilled` (the open remainder at the order's
/// own price).
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: u64,
    pub quantity: u64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partially_filled: Option<Vec<FillLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfilled: Option<Vec<FillLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<Vec<FillLine>>,
}

impl OrderSummary {
    pub fn from_order(order: &Order) -> Self {
        let executed: Vec<FillLine> = order
            .executions
            .iter()
            .map(|execution| FillLine { price: execution.price, quantity: execution.quantity })
            .collect();

        let mut summary = OrderSummary {
            order_id: order.order_id,
            quantity: order.quantity,
            order_type: order.side.to_string(),
            price: order.price,
            partially_filled: None,
            unfilled: None,
            filled: None,
        };

        match order.status {
            OrderStatus::Unfilled => {
                summary.unfilled =
                    Some(vec![FillLine { price: order.price, quantity: order.quantity }]);
            }
            OrderStatus::PartiallyFilled => {
                summary.partially_filled = Some(executed);
                summary.unfilled = Some(vec![FillLine {
                    price: order.price,
                    quantity: order.remaining_quantity,
                }]);
            }
            OrderStatus::Filled => {
                summary.filled = Some(executed);
            }
        }

        summary
    }
}
