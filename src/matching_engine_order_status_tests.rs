#[cfg(test)]
mod order_status_tests {
    use crate::configure::TradingLimits;
    use crate::matching_engine::{Exchange, OrderRequest};
    use crate::order::{EsopKind, OrderStatus, Side};

    fn buy(quantity: u64, price: u64) -> OrderRequest {
        OrderRequest { side: Side::Buy, quantity, price }
    }

    fn sell(kind: EsopKind, quantity: u64, price: u64) -> OrderRequest {
        OrderRequest { side: Side::Sell(kind), quantity, price }
    }

    fn create_test_exchange() -> Exchange {
        let mut exchange = Exchange::new(TradingLimits::default());
        exchange.register_user("jake").unwrap();
        exchange.register_user("amy").unwrap();
        exchange.deposit_money("jake", 10_000).unwrap();
        exchange.credit_esops("amy", 100, EsopKind::NonPerformance).unwrap();
        exchange.credit_esops("amy", 100, EsopKind::Performance).unwrap();
        exchange
    }

    #[test]
    fn test_resting_order_reports_unfilled() {
        let mut exchange = create_test_exchange();
        let ack = exchange.submit("jake", buy(10, 5)).unwrap();

        let history = exchange.order_history("jake").unwrap();
        assert_eq!(history.len(), 1);
        let summary = &history[0];
        assert_eq!(summary.order_id, ack.order_id);
        assert_eq!(summary.order_type, "BUY");
        assert_eq!(summary.quantity, 10);
        assert_eq!(summary.price, 5);
        assert!(summary.partially_filled.is_none());
        assert!(summary.filled.is_none());

        let unfilled = summary.unfilled.as_ref().unwrap();
        assert_eq!(unfilled.len(), 1);
        assert_eq!(unfilled[0].price, 5);
        assert_eq!(unfilled[0].quantity, 10);
    }

    #[test]
    fn test_partial_fill_reports_both_blocks() {
        let mut exchange = create_test_exchange();
        exchange.submit("jake", buy(10, 5)).unwrap();
        exchange.submit("amy", sell(EsopKind::NonPerformance, 4, 5)).unwrap();

        let history = exchange.order_history("jake").unwrap();
        let summary = &history[0];

        let partially_filled = summary.partially_filled.as_ref().unwrap();
        assert_eq!(partially_filled.len(), 1);
        assert_eq!(partially_filled[0].price, 5);
        assert_eq!(partially_filled[0].quantity, 4);

        let unfilled = summary.unfilled.as_ref().unwrap();
        assert_eq!(unfilled[0].price, 5);
        assert_eq!(unfilled[0].quantity, 6, "Remainder, not the original size");
        assert!(summary.filled.is_none());
    }

    #[test]
    fn test_filled_order_lists_every_execution_chronologically() {
        let mut exchange = create_test_exchange();
        exchange.submit("jake", buy(10, 8)).unwrap();
        exchange.submit("amy", sell(EsopKind::NonPerformance, 4, 5)).unwrap();
        exchange.submit("amy", sell(EsopKind::NonPerformance, 6, 7)).unwrap();

        let history = exchange.order_history("jake").unwrap();
        let summary = &history[0];
        assert!(summary.unfilled.is_none());
        assert!(summary.partially_filled.is_none());

        let filled = summary.filled.as_ref().unwrap();
        assert_eq!(filled.len(), 2);
        assert_eq!((filled[0].price, filled[0].quantity), (5, 4));
        assert_eq!((filled[1].price, filled[1].quantity), (7, 6));
    }

    #[test]
    fn test_status_progression_is_monotonic() {
        let mut exchange = create_test_exchange();
        let ack = exchange.submit("jake", buy(9, 5)).unwrap();

        let order = exchange.order_details(ack.order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Unfilled);
        assert_eq!(order.remaining_quantity, 9);

        exchange.submit("amy", sell(EsopKind::NonPerformance, 3, 5)).unwrap();
        let order = exchange.order_details(ack.order_id).unwrap();
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert_eq!(order.remaining_quantity, 6);

        exchange.submit("amy", sell(EsopKind::NonPerformance, 3, 5)).unwrap();
        let order = exchange.order_details(ack.order_id).unwrap();
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert_eq!(order.remaining_quantity, 3);

        exchange.submit("amy", sell(EsopKind::NonPerformance, 3, 5)).unwrap();
        let order = exchange.order_details(ack.order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.remaining_quantity, 0);
    }

    #[test]
    fn test_both_parties_share_the_execution_id() {
        let mut exchange = create_test_exchange();
        let buy_ack = exchange.submit("jake", buy(2, 10)).unwrap();
        let sell_ack = exchange.submit("amy", sell(EsopKind::NonPerformance, 2, 10)).unwrap();

        let buy_executions = &exchange.order_details(buy_ack.order_id).unwrap().executions;
        let sell_executions = &exchange.order_details(sell_ack.order_id).unwrap().executions;
        assert_eq!(buy_executions.len(), 1);
        assert_eq!(sell_executions.len(), 1);
        assert_eq!(buy_executions[0], sell_executions[0]);
    }

    #[test]
    fn test_history_keeps_admission_order_and_filled_orders() {
        let mut exchange = create_test_exchange();
        exchange.submit("amy", sell(EsopKind::NonPerformance, 5, 10)).unwrap();
        exchange.submit("amy", sell(EsopKind::Performance, 5, 10)).unwrap();
        exchange.submit("jake", buy(5, 10)).unwrap();

        // Performance sell filled even though it arrived second; both stay
        // in the seller's history in admission order
        let history = exchange.order_history("amy").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].unfilled.is_some(), "Non-performance sell untouched");
        assert!(history[1].filled.is_some(), "Performance sell filled first");
    }

    #[test]
    fn test_history_serializes_to_contract_shape() {
        let mut exchange = create_test_exchange();
        exchange.submit("jake", buy(10, 5)).unwrap();
        exchange.submit("amy", sell(EsopKind::NonPerformance, 4, 5)).unwrap();

        let history = exchange.order_history("jake").unwrap();
        let value = serde_json::to_value(&history).unwrap();

        let entry = &value[0];
        assert_eq!(entry["order_id"], 1);
        assert_eq!(entry["type"], "BUY");
        assert_eq!(entry["quantity"], 10);
        assert_eq!(entry["price"], 5);
        assert_eq!(entry["partially_filled"][0]["quantity"], 4);
        assert_eq!(entry["unfilled"][0]["quantity"], 6);
        assert!(entry.get("filled").is_none(), "Absent, not null");
    }

    #[test]
    fn test_empty_history_for_user_with_no_orders() {
        let exchange = create_test_exchange();
        assert!(exchange.order_history("amy").unwrap().is_empty());
    }
}
