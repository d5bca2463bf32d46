//! Mock price source for testing without a market-data feed.

use super::{PriceSource, PriceSourceError};
use crate::domain::{Decimal, PriceSeries, PriceSnapshot, Ticker};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Price source serving fixed current prices and histories.
#[derive(Debug, Clone, Default)]
pub struct MockPriceSource {
    current: HashMap<Ticker, Decimal>,
    history: HashMap<Ticker, PriceSeries>,
    fail_with: Option<String>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current price for a ticker.
    pub fn with_price(mut self, ticker: &str, price: Decimal) -> Self {
        self.current.insert(Ticker::new(ticker), price);
        self
    }

    /// Set the daily history for a ticker.
    pub fn with_history(mut self, series: PriceSeries) -> Self {
        self.history.insert(series.ticker.clone(), series);
        self
    }

    /// Make every call fail, to exercise caller error paths.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    fn check(&self) -> Result<(), PriceSourceError> {
        match &self.fail_with {
            Some(msg) => Err(PriceSourceError::Unavailable(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_current(&self, tickers: &[Ticker]) -> Result<PriceSnapshot, PriceSourceError> {
        self.check()?;
        Ok(tickers
            .iter()
            .filter_map(|t| self.current.get(t).map(|p| (t.clone(), *p)))
            .collect())
    }

    async fn fetch_history(
        &self,
        tickers: &[Ticker],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceSeries>, PriceSourceError> {
        self.check()?;
        Ok(tickers
            .iter()
            .filter_map(|t| self.history.get(t))
            .map(|s| s.window(from, to))
            .filter(|s| !s.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_mock_fetch_current_is_batched() {
        let mock = MockPriceSource::new()
            .with_price("SPX", Decimal::from(4600))
            .with_price("VIX", Decimal::from(18));
        let tickers = vec![Ticker::new("SPX"), Ticker::new("VIX"), Ticker::new("NDX")];

        let snapshot = tokio_test::block_on(mock.fetch_current(&tickers)).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&Ticker::new("VIX")), Some(Decimal::from(18)));
        assert_eq!(snapshot.get(&Ticker::new("NDX")), None);
    }

    #[tokio::test]
    async fn test_mock_fetch_history_windowed() {
        let series = PriceSeries::new(
            Ticker::new("SPX"),
            vec![
                (date(1), Decimal::from(4500)),
                (date(2), Decimal::from(4510)),
                (date(3), Decimal::from(4520)),
            ],
        );
        let mock = MockPriceSource::new().with_history(series);
        let out = mock
            .fetch_history(&[Ticker::new("SPX")], date(2), date(3))
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockPriceSource::new().failing("feed down");
        let err = mock.fetch_current(&[Ticker::new("SPX")]).await.unwrap_err();
        assert!(matches!(err, PriceSourceError::Unavailable(_)));
    }
}
