pub mod account;
pub mod configure;
pub mod error;
pub mod fees;
pub mod logger;
pub mod matching_engine;
pub mod order;
pub mod order_book;
pub mod order_history;
pub mod users;

#[cfg(test)]
mod matching_engine_order_status_tests;
