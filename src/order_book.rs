use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};

/// The three resting-order queues plus the id generators.
///
/// Buy and non-performance sell sides are price levels over FIFO queues of
/// order ids: iteration order gives price priority, queue order gives the
/// order-id tie-break (ids are assigned in admission order and admissions
/// never interleave with matching). Performance sells are a single FIFO
/// where price plays no ranking role.
///
/// The book holds ids only; the `Exchange` owns the orders themselves, so
/// the same order stays reachable from its owner's history after it leaves
/// the book.
#[derive(Debug)]
pub struct OrderBook {
    // Buys: high to low. Reverse keys so iteration starts at the highest price.
    buys: BTreeMap<Reverse<u64>, VecDeque<u64>>,
    // Non-performance sells: low to high.
    sells: BTreeMap<u64, VecDeque<u64>>,
    // Performance sells trade strictly in arrival order.
    performance_sells: VecDeque<u64>,
    next_order_id: u64,
    next_execution_id: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook {
            buys: BTreeMap::new(),
            sells: BTreeMap::new(),
            performance_sells: VecDeque::new(),
            next_order_id: 1,
            next_execution_id: 1,
        }
    }

    pub fn allocate_order_id(&mut self) -> u64 {
        let order_id = self.next_order_id;
        self.next_order_id += 1;
        order_id
    }

    pub fn allocate_execution_id(&mut self) -> u64 {
        let execution_id = self.next_execution_id;
        self.next_execution_id += 1;
        execution_id
    }

    pub fn insert_buy(&mut self, price: u64, order_id: u64) {
        self.buys.entry(Reverse(price)).or_default().push_back(order_id);
    }

    /// Returns a popped buy head that still has quantity. Front of its price
    /// level is its original slot: nothing can have been admitted at this
    /// price since the pop.
    pub fn requeue_buy(&mut self, price: u64, order_id: u64) {
        self.buys.entry(Reverse(price)).or_default().push_front(order_id);
    }

    pub fn pop_best_buy(&mut self) -> Option<(u64, u64)> {
        let (price, order_id, level_empty) = {
            let (&Reverse(price), level) = self.buys.iter_mut().next()?;
            let order_id = level.pop_front()?;
            (price, order_id, level.is_empty())
        };
        if level_empty {
            self.buys.remove(&Reverse(price));
        }
        Some((price, order_id))
    }

    pub fn insert_sell(&mut self, price: u64, order_id: u64) {
        self.sells.entry(price).or_default().push_back(order_id);
    }

    pub fn peek_best_sell(&self) -> Option<(u64, u64)> {
        let (&price, level) = self.sells.iter().next()?;
        level.front().map(|&order_id| (price, order_id))
    }

    pub fn pop_best_sell(&mut self) -> Option<(u64, u64)> {
        let (price, order_id, level_empty) = {
            let (&price, level) = self.sells.iter_mut().next()?;
            let order_id = level.pop_front()?;
            (price, order_id, level.is_empty())
        };
        if level_empty {
            self.sells.remove(&price);
        }
        Some((price, order_id))
    }

    pub fn push_performance_sell(&mut self, order_id: u64) {
        self.performance_sells.push_back(order_id);
    }

    pub fn front_performance_sell(&self) -> Option<u64> {
        self.performance_sells.front().copied()
    }

    pub fn pop_performance_sell(&mut self) -> Option<u64> {
        self.performance_sells.pop_front()
    }

    pub fn buy_order_count(&self) -> usize {
        self.buys.values().map(VecDeque::len).sum()
    }

    pub fn sell_order_count(&self) -> usize {
        self.sells.values().map(VecDeque::len).sum()
    }

    pub fn performance_sell_count(&self) -> usize {
        self.performance_sells.len()
    }

    pub fn best_buy_price(&self) -> Option<u64> {
        self.buys.keys().next().map(|&Reverse(price)| price)
    }

    pub fn best_sell_price(&self) -> Option<u64> {
        self.sells.keys().next().copied()
    }
}
