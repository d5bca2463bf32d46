use crate::config::ConfigError;
use crate::datasource::PriceSourceError;
use crate::domain::{Ticker, TradeId};
use crate::ingest::IngestError;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Malformed or out-of-enumeration trade data. Fixed upstream, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("invalid side: {0:?}")]
    InvalidSide(String),
    #[error("unsupported payoff type: {0:?}")]
    InvalidPayoffType(String),
    #[error("unrecognised condition: {0:?}")]
    InvalidCondition(String),
    #[error("logic must be AND or OR, got {0:?}")]
    InvalidLogic(String),
    #[error("trade {trade_id:?}: dual digital needs exactly 2 legs, found {found}")]
    LegCount { trade_id: String, found: usize },
    #[error("trade {trade_id:?}: expiry {expiry} is before trade date {trade_date}")]
    ExpiryBeforeTradeDate {
        trade_id: String,
        trade_date: NaiveDate,
        expiry: NaiveDate,
    },
    #[error("trade {trade_id:?}: closed on {close_date}, before trade date {trade_date}")]
    CloseBeforeTradeDate {
        trade_id: String,
        trade_date: NaiveDate,
        close_date: NaiveDate,
    },
    #[error("missing value for {0}")]
    MissingField(String),
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
    #[error("invalid date for {field}: {value:?}")]
    InvalidDate { field: String, value: String },
    #[error("{0} and {1} are mutually exclusive but both are populated")]
    Conflicting(String, String),
    #[error("trade {trade_id:?}: {field} is out of range")]
    Overflow { trade_id: String, field: String },
}

/// No price was available for a ticker a comparison needed.
///
/// Non-fatal: the description is still produced without an in-the-money flag.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("no price for {ticker} (trade {trade_id})")]
pub struct LookupError {
    pub trade_id: TradeId,
    pub ticker: Ticker,
}

/// Top-level error for the blotter runner.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),
    #[error("Price source error: {0}")]
    PriceSource(#[from] PriceSourceError),
    #[error("Output error: {0}")]
    Output(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Output(err.to_string())
    }
}
