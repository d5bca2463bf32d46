pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod report;

pub use config::Config;
pub use datasource::{CsvPriceSource, MockPriceSource, PriceSource, PriceSourceError};
pub use domain::{
    Condition, Cost, Decimal, Direction, ExoticTrade, Leg, Logic, Notional, PayoffType,
    PriceSnapshot, Side, Ticker, Trade, TradeBase, TradeId, VanillaTrade,
};
pub use engine::{describe, reconcile, Description, Reconciliation};
pub use error::{AppError, DataError, LookupError};
