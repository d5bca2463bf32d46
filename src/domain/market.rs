//! Market reference data: daily price history and point-in-time snapshots.

use crate::domain::{Decimal, Ticker};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One daily close for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub ticker: Ticker,
    pub price: Decimal,
}

/// Daily closes for one ticker, ascending by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    points: Vec<(NaiveDate, Decimal)>,
}

impl PriceSeries {
    /// Build a series; input order does not matter, a repeated date keeps the last value.
    pub fn new(ticker: Ticker, points: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Self {
        let mut points: Vec<(NaiveDate, Decimal)> = points.into_iter().collect();
        points.sort_by_key(|(date, _)| *date);
        let mut deduped: Vec<(NaiveDate, Decimal)> = Vec::with_capacity(points.len());
        for (date, price) in points {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = price,
                _ => deduped.push((date, price)),
            }
        }
        Self {
            ticker,
            points: deduped,
        }
    }

    pub fn points(&self) -> &[(NaiveDate, Decimal)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<Decimal> {
        self.points.last().map(|(_, price)| *price)
    }

    /// Last close on or before `date`.
    pub fn as_of(&self, date: NaiveDate) -> Option<Decimal> {
        let idx = self.points.partition_point(|(d, _)| *d <= date);
        idx.checked_sub(1).map(|i| self.points[i].1)
    }

    /// Closes within `[from, to]`.
    pub fn window(&self, from: NaiveDate, to: NaiveDate) -> PriceSeries {
        PriceSeries {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|(d, _)| *d >= from && *d <= to)
                .copied()
                .collect(),
        }
    }
}

/// Current (or as-of) price per ticker. Missing tickers are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    prices: HashMap<Ticker, Decimal>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, ticker: impl Into<String>, price: Decimal) -> Self {
        self.insert(Ticker::new(ticker), price);
        self
    }

    pub fn insert(&mut self, ticker: Ticker, price: Decimal) {
        self.prices.insert(ticker, price);
    }

    pub fn get(&self, ticker: &Ticker) -> Option<Decimal> {
        self.prices.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Latest close per series, or the close as of `as_of` when given.
    pub fn from_series(series: &[PriceSeries], as_of: Option<NaiveDate>) -> Self {
        let mut snapshot = Self::new();
        for s in series {
            let price = match as_of {
                Some(date) => s.as_of(date),
                None => s.latest(),
            };
            if let Some(price) = price {
                snapshot.insert(s.ticker.clone(), price);
            }
        }
        snapshot
    }
}

impl FromIterator<(Ticker, Decimal)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (Ticker, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}
