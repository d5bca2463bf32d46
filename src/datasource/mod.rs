//! Market-data abstraction: current prices and daily history per ticker.

use crate::domain::{PriceSeries, PriceSnapshot, Ticker};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;

pub mod csv_prices;
pub mod mock;

pub use csv_prices::CsvPriceSource;
pub use mock::MockPriceSource;

/// Source of reference prices for the underlyings on the blotter.
///
/// Lookups are batched: a dual digital needs two underlyings priced together.
#[async_trait]
pub trait PriceSource: Send + Sync + fmt::Debug {
    /// Latest price for each ticker. Tickers without data are absent from the snapshot.
    async fn fetch_current(&self, tickers: &[Ticker]) -> Result<PriceSnapshot, PriceSourceError>;

    /// Daily closes for each ticker within `[from, to]`.
    ///
    /// # Returns
    /// One series per requested ticker that has data, in request order.
    async fn fetch_history(
        &self,
        tickers: &[Ticker],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceSeries>, PriceSourceError>;
}

/// Error type for price source operations.
#[derive(Debug, Clone)]
pub enum PriceSourceError {
    /// Source could not be read (missing file, connection refused).
    Unavailable(String),
    /// Source returned data that could not be understood.
    ParseError(String),
    /// Other error
    Other(String),
}

impl fmt::Display for PriceSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSourceError::Unavailable(msg) => write!(f, "Price source unavailable: {}", msg),
            PriceSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            PriceSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PriceSourceError {}
