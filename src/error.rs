use std::fmt;

/// Admission rule violations. `Display` output is the exact message the
/// transport layer hands back to clients, so these strings are part of the
/// public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    InventoryThresholdExceeded,
    InsufficientBalance,
    InsufficientNonPerformanceEsops,
    InsufficientPerformanceEsops,
    WalletThresholdExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InventoryThresholdExceeded => {
                write!(f, "Inventory threshold will be exceeded")
            }
            RejectReason::InsufficientBalance => write!(f, "Insufficient balance in wallet"),
            RejectReason::InsufficientNonPerformanceEsops => {
                write!(f, "Insufficient non-performance ESOPs in inventory")
            }
            RejectReason::InsufficientPerformanceEsops => {
                write!(f, "Insufficient performance ESOPs in inventory")
            }
            RejectReason::WalletThresholdExceeded => {
                write!(f, "Wallet threshold will be exceeded")
            }
        }
    }
}

/// Failures of the per-account balance primitives. After admission has
/// validated and reserved, none of these can occur on the settlement path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    InsufficientFreeMoney,
    InsufficientLockedMoney,
    InsufficientFreeInventory,
    InsufficientLockedInventory,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InsufficientFreeMoney => write!(f, "insufficient free money"),
            LedgerError::InsufficientLockedMoney => write!(f, "insufficient locked money"),
            LedgerError::InsufficientFreeInventory => write!(f, "insufficient free inventory"),
            LedgerError::InsufficientLockedInventory => {
                write!(f, "insufficient locked inventory")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Errors surfaced by the `Exchange`.
///
/// `Rejected` is the only business error: every violated admission rule,
/// collected in rule order. The remaining variants mean the calling layer
/// broke a precondition (unresolved user, duplicate registration) or the
/// engine state is corrupt (`UnknownOrder`, `Ledger`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Rejected(Vec<RejectReason>),
    UnknownUser(String),
    UserAlreadyExists(String),
    UnknownOrder(u64),
    Ledger(LedgerError),
}

impl EngineError {
    /// Rejection messages in rule order; empty for non-rejection errors.
    pub fn messages(&self) -> Vec<String> {
        match self {
            EngineError::Rejected(reasons) => reasons.iter().map(|r| r.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Rejected(reasons) => {
                let messages: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
                write!(f, "order rejected: {}", messages.join(", "))
            }
            EngineError::UnknownUser(username) => write!(f, "unknown user: {}", username),
            EngineError::UserAlreadyExists(username) => {
                write!(f, "user already exists: {}", username)
            }
            EngineError::UnknownOrder(order_id) => write!(f, "unknown order: {}", order_id),
            EngineError::Ledger(err) => write!(f, "ledger error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        EngineError::Ledger(err)
    }
}
