//! CSV ingestion of vanilla (MARS export) and exotic (manual) bookings.
//!
//! This is the one place values are trimmed; the engines compare ids as-is.

pub mod columns;

use crate::domain::{
    Condition, Cost, Decimal, ExoticTrade, Leg, Logic, Notional, PayoffType, Side, Ticker,
    TradeBase, TradeId, VanillaTrade,
};
use crate::error::DataError;
use chrono::NaiveDate;
use columns::{ColumnTable, EXOTIC_COLUMNS, EXOTIC_REQUIRED, VANILLA_COLUMNS, VANILLA_REQUIRED};
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("csv parse error: {0}")]
    Csv(String),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("row {line}: {source}")]
    Row { line: u64, source: DataError },
    #[error("io error: {0}")]
    Io(String),
}

/// Parse `YYYY-MM-DD`, `YYYYMMDD` or `YYYY/MM/DD`, ignoring a trailing time part.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DataError> {
    let v = value.trim();
    let day = v.split([' ', 'T']).next().unwrap_or(v);
    ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
        .ok_or_else(|| DataError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// One CSV row viewed through the resolved column map.
struct RowView<'r> {
    record: &'r StringRecord,
    columns: &'r HashMap<&'static str, usize>,
}

impl<'r> RowView<'r> {
    fn get(&self, field: &str) -> Option<&'r str> {
        let idx = *self.columns.get(field)?;
        self.record
            .get(idx)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    fn require(&self, field: &str) -> Result<&'r str, DataError> {
        self.get(field)
            .ok_or_else(|| DataError::MissingField(field.to_string()))
    }

    fn decimal(&self, field: &str) -> Result<Option<Decimal>, DataError> {
        self.get(field)
            .map(|v| {
                Decimal::parse_amount(v).map_err(|_| DataError::InvalidNumber {
                    field: field.to_string(),
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    fn require_decimal(&self, field: &str) -> Result<Decimal, DataError> {
        self.decimal(field)?
            .ok_or_else(|| DataError::MissingField(field.to_string()))
    }

    fn date(&self, field: &str) -> Result<NaiveDate, DataError> {
        parse_date(field, self.require(field)?)
    }

    fn cost(&self) -> Result<Cost, DataError> {
        match (self.decimal("cost_bp")?, self.decimal("cost_usd")?) {
            (Some(_), Some(_)) => Err(DataError::Conflicting(
                "cost_bp".to_string(),
                "cost_usd".to_string(),
            )),
            (Some(bp), None) => Ok(Cost::BasisPoints(bp)),
            (None, Some(usd)) => Ok(Cost::Usd(usd)),
            (None, None) => Err(DataError::MissingField("cost_bp or cost_usd".to_string())),
        }
    }

    fn base(&self) -> Result<TradeBase, DataError> {
        Ok(TradeBase {
            // An absent id is kept as empty: it still reconciles, as unmatched.
            trade_id: TradeId::new(self.text("trade_id")),
            trade_date: self.date("trade_date")?,
            book: self.text("book"),
            strategy: self.text("strategy"),
            side: self.require("side")?.parse::<Side>()?,
            cost: self.cost()?,
            notes: self.get("notes").map(str::to_string),
        })
    }
}

fn read_rows<R, T, F>(
    reader: R,
    table: ColumnTable,
    required: &[&'static str],
    mut build: F,
) -> Result<Vec<T>, IngestError>
where
    R: Read,
    F: FnMut(&RowView<'_>) -> Result<T, DataError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Csv(e.to_string()))?
        .clone();
    let columns = columns::resolve(&headers, table);
    if let Some(missing) = columns::first_missing(&columns, required) {
        return Err(IngestError::MissingColumn(missing.to_string()));
    }

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Csv(e.to_string()))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row = RowView {
            record: &record,
            columns: &columns,
        };
        let item = build(&row).map_err(|source| IngestError::Row { line, source })?;
        out.push(item);
    }
    Ok(out)
}

fn vanilla_from_row(row: &RowView<'_>) -> Result<VanillaTrade, DataError> {
    let notional = match (row.decimal("notional_mm")?, row.decimal("contracts")?) {
        (Some(_), Some(_)) => {
            return Err(DataError::Conflicting(
                "notional_mm".to_string(),
                "contracts".to_string(),
            ))
        }
        (Some(mm), None) => Notional::Millions(mm),
        (None, Some(n)) => Notional::Contracts(n),
        (None, None) => {
            return Err(DataError::MissingField(
                "notional_mm or contracts".to_string(),
            ))
        }
    };

    let trade = VanillaTrade {
        base: row.base()?,
        notional,
        expiry: row.date("expiry")?,
        payoff_type: row.require("payoff_type")?.parse::<PayoffType>()?,
        index: Ticker::new(row.require("index")?),
        bbg_ticker: row.get("bbg_ticker").map(Ticker::new),
        strike: row.require_decimal("strike")?,
        strike2: row.decimal("strike2")?,
        mars_id: row.get("mars_id").map(str::to_string),
    };
    trade.validate()?;
    Ok(trade)
}

fn exotic_from_row(row: &RowView<'_>) -> Result<ExoticTrade, DataError> {
    let mut legs = Vec::with_capacity(ExoticTrade::LEG_COUNT);
    for (index, cond, strike) in [
        ("index1", "cond1", "strike1"),
        ("index2", "cond2", "strike2"),
    ] {
        let Some(label) = row.get(index) else {
            continue;
        };
        legs.push(Leg {
            index: Ticker::new(label),
            condition: row.require(cond)?.parse::<Condition>()?,
            strike: row.require_decimal(strike)?,
        });
    }

    let trade = ExoticTrade {
        base: row.base()?,
        legs,
        logic: row.require("logic")?.parse::<Logic>()?,
        notional: Notional::Millions(row.require_decimal("notional_mm")?),
        expiry: row.date("expiry")?,
        mars_id: row.get("mars_id").map(str::to_string),
    };
    trade.validate()?;
    Ok(trade)
}

pub fn load_vanilla_csv<R: Read>(reader: R) -> Result<Vec<VanillaTrade>, IngestError> {
    let trades = read_rows(reader, VANILLA_COLUMNS, VANILLA_REQUIRED, vanilla_from_row)?;
    info!(count = trades.len(), "Loaded vanilla trades");
    Ok(trades)
}

pub fn load_exotic_csv<R: Read>(reader: R) -> Result<Vec<ExoticTrade>, IngestError> {
    let trades = read_rows(reader, EXOTIC_COLUMNS, EXOTIC_REQUIRED, exotic_from_row)?;
    info!(count = trades.len(), "Loaded exotic trades");
    Ok(trades)
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|e| IngestError::Io(format!("{}: {}", path.display(), e)))
}

pub fn load_vanilla_file(path: impl AsRef<Path>) -> Result<Vec<VanillaTrade>, IngestError> {
    load_vanilla_csv(open(path.as_ref())?)
}

pub fn load_exotic_file(path: impl AsRef<Path>) -> Result<Vec<ExoticTrade>, IngestError> {
    load_exotic_csv(open(path.as_ref())?)
}
