//! Network access: market-data provider client and retry policy

pub mod retry;
pub mod market_data;

pub use retry::*;
pub use market_data::*;
