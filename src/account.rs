use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::order::EsopKind;

/// Money balances of one account. All mutations are checked; a failed
/// operation leaves the wallet untouched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub free: u64,
    pub locked: u64,
}

impl Wallet {
    pub fn deposit(&mut self, amount: u64) {
        self.free += amount;
    }

    /// Moves money from free to locked, reserving it for an admitted order.
    pub fn lock(&mut self, amount: u64) -> Result<(), LedgerError> {
        if self.free < amount {
            return Err(LedgerError::InsufficientFreeMoney);
        }
        self.free -= amount;
        self.locked += amount;
        Ok(())
    }

    /// Moves money from locked back to free (over-reservation refund).
    pub fn unlock(&mut self, amount: u64) -> Result<(), LedgerError> {
        if self.locked < amount {
            return Err(LedgerError::InsufficientLockedMoney);
        }
        self.locked -= amount;
        self.free += amount;
        Ok(())
    }

    /// Finalizes a spend out of the locked balance. The money has left this
    /// account for good.
    pub fn spend_locked(&mut self, amount: u64) -> Result<(), LedgerError> {
        if self.locked < amount {
            return Err(LedgerError::InsufficientLockedMoney);
        }
        self.locked -= amount;
        Ok(())
    }
}

/// ESOP holdings of one kind. Same checked free/locked discipline as the
/// wallet; there is no unlock, sold inventory never returns to free.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub free: u64,
    pub locked: u64,
}

impl Inventory {
    pub fn credit(&mut self, quantity: u64) {
        self.free += quantity;
    }

    pub fn lock(&mut self, quantity: u64) -> Result<(), LedgerError> {
        if self.free < quantity {
            return Err(LedgerError::InsufficientFreeInventory);
        }
        self.free -= quantity;
        self.locked += quantity;
        Ok(())
    }

    /// Finalizes delivery out of the locked balance.
    pub fn spend_locked(&mut self, quantity: u64) -> Result<(), LedgerError> {
        if self.locked < quantity {
            return Err(LedgerError::InsufficientLockedInventory);
        }
        self.locked -= quantity;
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.free + self.locked
    }
}

/// One user's balances: money plus the two ESOP inventories. No operation
/// spans two accounts; cross-account movement is two single-account calls
/// made by the matching engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub wallet: Wallet,
    pub non_performance: Inventory,
    pub performance: Inventory,
}

impl Account {
    pub fn inventory(&self, kind: EsopKind) -> &Inventory {
        match kind {
            EsopKind::Performance => &self.performance,
            EsopKind::NonPerformance => &self.non_performance,
        }
    }

    pub fn inventory_mut(&mut self, kind: EsopKind) -> &mut Inventory {
        match kind {
            EsopKind::Performance => &mut self.performance,
            EsopKind::NonPerformance => &mut self.non_performance,
        }
    }
}
