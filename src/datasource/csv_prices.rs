//! Price source backed by a daily-close CSV export (`date,ticker,price`).

use super::{PriceSource, PriceSourceError};
use crate::domain::{Decimal, PricePoint, PriceSeries, PriceSnapshot, Ticker};
use crate::ingest::parse_date;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Reads the export on every call so a refreshed file is picked up.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse_csv(csv_bytes: &[u8]) -> Result<Vec<PricePoint>, PriceSourceError> {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            date: String,
            ticker: String,
            #[serde(alias = "px_last")]
            price: String,
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(csv_bytes);

        let mut points = Vec::new();
        for record in reader.deserialize::<Row>() {
            let row = record.map_err(|e| PriceSourceError::ParseError(e.to_string()))?;
            let date = parse_date("date", &row.date)
                .map_err(|e| PriceSourceError::ParseError(e.to_string()))?;
            let price = Decimal::parse_amount(&row.price)
                .map_err(|e| PriceSourceError::ParseError(format!("invalid price: {}", e)))?;
            points.push(PricePoint {
                date,
                ticker: Ticker::new(row.ticker),
                price,
            });
        }

        Ok(points)
    }

    async fn load_series(&self) -> Result<HashMap<Ticker, PriceSeries>, PriceSourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            PriceSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let points = Self::parse_csv(&bytes)?;
        debug!(path = %self.path.display(), rows = points.len(), "Loaded price export");

        let mut grouped: HashMap<Ticker, Vec<(NaiveDate, Decimal)>> = HashMap::new();
        for p in points {
            grouped.entry(p.ticker).or_default().push((p.date, p.price));
        }
        Ok(grouped
            .into_iter()
            .map(|(ticker, points)| (ticker.clone(), PriceSeries::new(ticker, points)))
            .collect())
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    async fn fetch_current(&self, tickers: &[Ticker]) -> Result<PriceSnapshot, PriceSourceError> {
        let series = self.load_series().await?;
        Ok(tickers
            .iter()
            .filter_map(|t| series.get(t).and_then(|s| s.latest()).map(|p| (t.clone(), p)))
            .collect())
    }

    async fn fetch_history(
        &self,
        tickers: &[Ticker],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceSeries>, PriceSourceError> {
        let series = self.load_series().await?;
        Ok(tickers
            .iter()
            .filter_map(|t| series.get(t))
            .map(|s| s.window(from, to))
            .filter(|s| !s.is_empty())
            .collect())
    }
}
