use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::configure::TradingLimits;
use crate::error::{EngineError, RejectReason};
use crate::fees::{commission_fee, net_proceeds, FeeLedger};
use crate::order::{EsopKind, ExecutionRecord, Order, Side};
use crate::order_book::OrderBook;
use crate::order_history::OrderSummary;
use crate::users::UserDirectory;

/// Terms of an incoming order as handed over by the transport layer. Shape
/// validation (missing fields, types) happens there; business validation
/// happens here at admission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub quantity: u64,
    pub price: u64,
}

/// Acknowledgement for an admitted order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderAck {
    pub order_id: u64,
    pub side: Side,
    pub quantity: u64,
    pub price: u64,
}

/// The exchange aggregate: user accounts, the order store, the three-queue
/// book and the fee accumulator, with the admission and matching logic that
/// ties them together.
///
/// All entry points take `&mut self`, so one owner serializes admission and
/// match cycles end to end. Settlement mutates two accounts; nothing can
/// observe the book between the seller-side and buyer-side halves.
pub struct Exchange {
    users: UserDirectory,
    book: OrderBook,
    orders: FxHashMap<u64, Order>,
    fees: FeeLedger,
    limits: TradingLimits,
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new(TradingLimits::default())
    }
}

impl Exchange {
    pub fn new(limits: TradingLimits) -> Self {
        Exchange {
            users: UserDirectory::new(),
            book: OrderBook::new(),
            orders: FxHashMap::default(),
            fees: FeeLedger::default(),
            limits,
        }
    }

    // ----- user / funding surface -----

    pub fn register_user(&mut self, username: &str) -> Result<(), EngineError> {
        self.users.register(username)
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.exists(username)
    }

    pub fn deposit_money(&mut self, username: &str, amount: u64) -> Result<(), EngineError> {
        let account = self.account_mut(username)?;
        account.wallet.deposit(amount);
        Ok(())
    }

    pub fn credit_esops(
        &mut self,
        username: &str,
        quantity: u64,
        kind: EsopKind,
    ) -> Result<(), EngineError> {
        let account = self.account_mut(username)?;
        account.inventory_mut(kind).credit(quantity);
        Ok(())
    }

    pub fn account(&self, username: &str) -> Option<&Account> {
        self.users.account(username)
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&str, &Account)> {
        self.users.iter().map(|user| (user.username.as_str(), &user.account))
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    // ----- order surface -----

    /// Admits one order: aggregated validation, reservation, enqueue, then
    /// one full match cycle, synchronously.
    pub fn submit(
        &mut self,
        username: &str,
        request: OrderRequest,
    ) -> Result<OrderAck, EngineError> {
        let account = self
            .users
            .account(username)
            .ok_or_else(|| EngineError::UnknownUser(username.to_string()))?;

        let violations = match request.side {
            Side::Buy => validate_buy(&self.limits, account, request.quantity, request.price),
            Side::Sell(kind) => {
                validate_sell(&self.limits, account, kind, request.quantity, request.price)
            }
        };
        if !violations.is_empty() {
            debug!(
                "order rejected for {}: {} {} @ {}: {:?}",
                username, request.side, request.quantity, request.price, violations
            );
            return Err(EngineError::Rejected(violations));
        }

        // Reserve. Validation passed on this same account, so the lock holds.
        let account = self.account_mut(username)?;
        match request.side {
            Side::Buy => account.wallet.lock(request.quantity * request.price)?,
            Side::Sell(kind) => account.inventory_mut(kind).lock(request.quantity)?,
        }

        let order_id = self.book.allocate_order_id();
        let order = Order::new(order_id, username, request.side, request.quantity, request.price);
        self.user_mut(username)?.order_ids.push(order_id);
        self.orders.insert(order_id, order);

        match request.side {
            Side::Buy => self.book.insert_buy(request.price, order_id),
            Side::Sell(EsopKind::NonPerformance) => {
                self.book.insert_sell(request.price, order_id)
            }
            Side::Sell(EsopKind::Performance) => self.book.push_performance_sell(order_id),
        }
        info!(
            "order {} admitted: {} {} {} @ {}",
            order_id, username, request.side, request.quantity, request.price
        );

        self.run_match_cycle()?;

        Ok(OrderAck {
            order_id,
            side: request.side,
            quantity: request.quantity,
            price: request.price,
        })
    }

    /// Summaries of every order the user ever placed, in admission order.
    pub fn order_history(&self, username: &str) -> Result<Vec<OrderSummary>, EngineError> {
        let user = self
            .users
            .get(username)
            .ok_or_else(|| EngineError::UnknownUser(username.to_string()))?;
        user.order_ids
            .iter()
            .map(|&order_id| self.order(order_id).map(OrderSummary::from_order))
            .collect()
    }

    pub fn total_fee_collected(&self) -> u64 {
        self.fees.total()
    }

    pub fn order_details(&self, order_id: u64) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    // ----- matching -----

    /// Drains the buy queue: keep taking the best buy head, run it through
    /// both sell passes, and stop at the first head left with open quantity
    /// (no cheaper offer can exist for anything behind it). Flattened form
    /// of a cycle that recursed on every fully-consumed head.
    fn run_match_cycle(&mut self) -> Result<(), EngineError> {
        while let Some((buy_price, buy_id)) = self.book.pop_best_buy() {
            self.match_performance_sells(buy_id)?;
            self.match_non_performance_sells(buy_id)?;

            if self.order(buy_id)?.remaining_quantity > 0 {
                self.book.requeue_buy(buy_price, buy_id);
                break;
            }
        }
        Ok(())
    }

    /// Performance pass: only the FIFO head is ever eligible, and it stays
    /// put until fully consumed. A head priced above the buy order blocks
    /// the whole queue; nothing behind it may trade ahead of it.
    fn match_performance_sells(&mut self, buy_id: u64) -> Result<(), EngineError> {
        loop {
            let buy = self.order(buy_id)?;
            if buy.remaining_quantity == 0 {
                break;
            }
            let buy_price = buy.price;

            let Some(sell_id) = self.book.front_performance_sell() else {
                break;
            };
            if self.order(sell_id)?.price > buy_price {
                break;
            }

            self.settle_trade(buy_id, sell_id, EsopKind::Performance)?;

            if self.order(sell_id)?.remaining_quantity == 0 {
                self.book.pop_performance_sell();
            }
        }
        Ok(())
    }

    /// Non-performance pass: lowest ask first. The heap order guarantees
    /// that once the best ask exceeds the buy price, nothing cheaper
    /// remains, so the pass stops there.
    fn match_non_performance_sells(&mut self, buy_id: u64) -> Result<(), EngineError> {
        loop {
            let buy = self.order(buy_id)?;
            if buy.remaining_quantity == 0 {
                break;
            }
            let buy_price = buy.price;

            let Some((sell_price, sell_id)) = self.book.peek_best_sell() else {
                break;
            };
            if sell_price > buy_price {
                break;
            }

            self.settle_trade(buy_id, sell_id, EsopKind::NonPerformance)?;

            // A partially consumed head keeps its slot; its key is unchanged.
            if self.order(sell_id)?.remaining_quantity == 0 {
                self.book.pop_best_sell();
            }
        }
        Ok(())
    }

    /// Settles one trade between the buy order and the resting sell order.
    /// The resting order's price is the execution price; the buyer gets any
    /// spread below their limit released back to free money.
    fn settle_trade(
        &mut self,
        buy_id: u64,
        sell_id: u64,
        kind: EsopKind,
    ) -> Result<(), EngineError> {
        let (buyer, buy_limit_price, buy_remaining) = {
            let buy = self.order(buy_id)?;
            (buy.username.clone(), buy.price, buy.remaining_quantity)
        };
        let (seller, execution_price, sell_remaining) = {
            let sell = self.order(sell_id)?;
            (sell.username.clone(), sell.price, sell.remaining_quantity)
        };

        let traded_quantity = u64::min(buy_remaining, sell_remaining);
        let traded_amount = traded_quantity * execution_price;
        let fee = commission_fee(traded_amount, self.limits.commission_fee_bps);

        // Seller side: inventory leaves the locked pool for good; proceeds
        // net of commission land in the free wallet.
        let seller_account = self.account_mut(&seller)?;
        seller_account.inventory_mut(kind).spend_locked(traded_quantity)?;
        seller_account.wallet.deposit(traded_amount - fee);

        // Buyer side: pay out of the reservation; delivery is always
        // non-performance inventory, whatever the seller sold.
        let buyer_account = self.account_mut(&buyer)?;
        buyer_account.wallet.spend_locked(traded_amount)?;
        buyer_account.non_performance.credit(traded_quantity);
        if buy_limit_price > execution_price {
            // The reservation was taken at the buy limit; the spread goes back.
            buyer_account
                .wallet
                .unlock((buy_limit_price - execution_price) * traded_quantity)?;
        }

        self.fees.credit(fee);

        let execution = ExecutionRecord {
            execution_id: self.book.allocate_execution_id(),
            price: execution_price,
            quantity: traded_quantity,
        };
        self.order_mut(buy_id)?.record_execution(execution);
        self.order_mut(sell_id)?.record_execution(execution);

        info!(
            "execution {}: buy #{} x sell #{}, {} @ {} (fee {})",
            execution.execution_id, buy_id, sell_id, traded_quantity, execution_price, fee
        );
        Ok(())
    }

    // ----- lookups -----

    fn order(&self, order_id: u64) -> Result<&Order, EngineError> {
        self.orders.get(&order_id).ok_or(EngineError::UnknownOrder(order_id))
    }

    fn order_mut(&mut self, order_id: u64) -> Result<&mut Order, EngineError> {
        self.orders.get_mut(&order_id).ok_or(EngineError::UnknownOrder(order_id))
    }

    fn account_mut(&mut self, username: &str) -> Result<&mut Account, EngineError> {
        self.users
            .account_mut(username)
            .ok_or_else(|| EngineError::UnknownUser(username.to_string()))
    }

    fn user_mut(&mut self, username: &str) -> Result<&mut crate::users::User, EngineError> {
        self.users
            .get_mut(username)
            .ok_or_else(|| EngineError::UnknownUser(username.to_string()))
    }
}

/// Buy admission rules, all evaluated; violations are collected in rule
/// order, never fail-fast.
fn validate_buy(
    limits: &TradingLimits,
    account: &Account,
    quantity: u64,
    price: u64,
) -> Vec<RejectReason> {
    let mut violations = Vec::new();
    if account.non_performance.total() + quantity > limits.max_quantity {
        violations.push(RejectReason::InventoryThresholdExceeded);
    }
    if account.wallet.free < quantity * price {
        violations.push(RejectReason::InsufficientBalance);
    }
    violations
}

/// Sell admission rules. The wallet-threshold estimate deducts commission
/// for non-performance sells only; the performance check counts gross
/// proceeds. The asymmetry is a contract of the admission policy, not an
/// oversight to unify.
fn validate_sell(
    limits: &TradingLimits,
    account: &Account,
    kind: EsopKind,
    quantity: u64,
    price: u64,
) -> Vec<RejectReason> {
    let mut violations = Vec::new();
    let wallet_total = account.wallet.free + account.wallet.locked;
    let gross_proceeds = quantity * price;

    match kind {
        EsopKind::NonPerformance => {
            if account.non_performance.free < quantity {
                violations.push(RejectReason::InsufficientNonPerformanceEsops);
            }
            if wallet_total + net_proceeds(gross_proceeds, limits.commission_fee_bps)
                > limits.max_amount
            {
                violations.push(RejectReason::WalletThresholdExceeded);
            }
        }
        EsopKind::Performance => {
            if account.performance.free < quantity {
                violations.push(RejectReason::InsufficientPerformanceEsops);
            }
            if wallet_total + gross_proceeds > limits.max_amount {
                violations.push(RejectReason::WalletThresholdExceeded);
            }
        }
    }
    violations
}
