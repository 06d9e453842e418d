//! Commission arithmetic. Rates are integer basis points (200 = 2%) and all
//! rounding is half-up, so fee and settlement amounts stay exact integers.

use serde::{Deserialize, Serialize};

const BPS_SCALE: u64 = 10_000;

/// Commission charged on a traded amount, rounded half up.
pub fn commission_fee(amount: u64, rate_bps: u64) -> u64 {
    (amount * rate_bps + BPS_SCALE / 2) / BPS_SCALE
}

/// Fee-deducted proceeds, rounded half up on the net product. Used by the
/// non-performance wallet-threshold estimate; settlement itself credits
/// `amount - commission_fee(amount)`, which at half-way amounts differs by
/// one unit.
pub fn net_proceeds(amount: u64, rate_bps: u64) -> u64 {
    (amount * (BPS_SCALE - rate_bps) + BPS_SCALE / 2) / BPS_SCALE
}

/// Running total of commission collected across all settlements.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeeLedger {
    collected: u64,
}

impl FeeLedger {
    pub fn credit(&mut self, fee: u64) {
        self.collected += fee;
    }

    pub fn total(&self) -> u64 {
        self.collected
    }
}
