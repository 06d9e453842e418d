use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Hard ceilings and commission rate for one exchange instance.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TradingLimits {
    /// Ceiling on any user's total (free + locked) non-performance holding.
    pub max_quantity: u64,
    /// Ceiling on any user's total (free + locked) wallet balance.
    pub max_amount: u64,
    /// Commission in basis points (200 = 2%).
    pub commission_fee_bps: u64,
}

impl Default for TradingLimits {
    fn default() -> Self {
        TradingLimits {
            max_quantity: 10_000_000,
            max_amount: 10_000_000,
            commission_fee_bps: 200,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_file: String,
    pub limits: TradingLimits,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let s = Config::builder()
        // Set defaults
        .set_default("log_level", "info")?
        .set_default("log_to_file", false)?
        .set_default("log_file", "log/esop_exchange.log")?
        .set_default("limits.max_quantity", 10_000_000i64)?
        .set_default("limits.max_amount", 10_000_000i64)?
        .set_default("limits.commission_fee_bps", 200i64)?
        // Add configuration from a file
        .add_source(File::with_name("config/config.yaml").required(false))
        // Add configuration from environment variables
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;

    s.try_deserialize()
}
