//! Trade records: the shared base plus the vanilla and dual digital variants.

use crate::domain::{Condition, Decimal, Logic, PayoffType, Side, Ticker, TradeId};
use crate::error::DataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Premium paid or received, quoted one way or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    BasisPoints(Decimal),
    Usd(Decimal),
}

impl Cost {
    /// USD premium, if the cost was quoted in USD.
    pub fn usd(&self) -> Option<Decimal> {
        match self {
            Cost::Usd(v) => Some(*v),
            Cost::BasisPoints(_) => None,
        }
    }
}

/// Trade size, in millions of notional or in listed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notional {
    Millions(Decimal),
    Contracts(Decimal),
}

impl Notional {
    /// Size multiplier applied to a per-unit unwind price.
    pub fn quantity(&self) -> Decimal {
        match self {
            Notional::Millions(v) | Notional::Contracts(v) => *v,
        }
    }
}

/// Fields common to both trade variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeBase {
    pub trade_id: TradeId,
    pub trade_date: NaiveDate,
    pub book: String,
    pub strategy: String,
    pub side: Side,
    pub cost: Cost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Single-strike option on one underlying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanillaTrade {
    #[serde(flatten)]
    pub base: TradeBase,
    pub notional: Notional,
    pub expiry: NaiveDate,
    pub payoff_type: PayoffType,
    /// Human label of the underlying.
    pub index: Ticker,
    /// Market-data key; `None` when no live data is wanted.
    pub bbg_ticker: Option<Ticker>,
    pub strike: Decimal,
    /// Short strike of a call or put spread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike2: Option<Decimal>,
    pub mars_id: Option<String>,
}

impl VanillaTrade {
    pub fn validate(&self) -> Result<(), DataError> {
        check_expiry(&self.base, self.expiry)
    }

    /// Key used for price lookups: the market-data ticker, else the label.
    pub fn price_key(&self) -> &Ticker {
        self.bbg_ticker.as_ref().unwrap_or(&self.index)
    }
}

/// One condition of a dual digital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub index: Ticker,
    pub condition: Condition,
    pub strike: Decimal,
}

/// Dual digital: pays when two leg conditions, combined by `logic`, hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExoticTrade {
    #[serde(flatten)]
    pub base: TradeBase,
    pub legs: Vec<Leg>,
    pub logic: Logic,
    pub notional: Notional,
    pub expiry: NaiveDate,
    pub mars_id: Option<String>,
}

impl ExoticTrade {
    pub const LEG_COUNT: usize = 2;

    pub fn validate(&self) -> Result<(), DataError> {
        if self.legs.len() != Self::LEG_COUNT {
            return Err(DataError::LegCount {
                trade_id: self.base.trade_id.to_string(),
                found: self.legs.len(),
            });
        }
        check_expiry(&self.base, self.expiry)
    }

    /// Both legs, once the leg count has been checked.
    pub fn leg_pair(&self) -> Result<(&Leg, &Leg), DataError> {
        match self.legs.as_slice() {
            [first, second] => Ok((first, second)),
            legs => Err(DataError::LegCount {
                trade_id: self.base.trade_id.to_string(),
                found: legs.len(),
            }),
        }
    }
}

fn check_expiry(base: &TradeBase, expiry: NaiveDate) -> Result<(), DataError> {
    if expiry < base.trade_date {
        return Err(DataError::ExpiryBeforeTradeDate {
            trade_id: base.trade_id.to_string(),
            trade_date: base.trade_date,
            expiry,
        });
    }
    Ok(())
}

/// A blotter record: exactly one of the two variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trade_type", rename_all = "lowercase")]
pub enum Trade {
    Vanilla(VanillaTrade),
    Exotic(ExoticTrade),
}

impl Trade {
    pub fn base(&self) -> &TradeBase {
        match self {
            Trade::Vanilla(t) => &t.base,
            Trade::Exotic(t) => &t.base,
        }
    }

    pub fn trade_id(&self) -> &TradeId {
        &self.base().trade_id
    }

    pub fn notional(&self) -> Notional {
        match self {
            Trade::Vanilla(t) => t.notional,
            Trade::Exotic(t) => t.notional,
        }
    }

    pub fn expiry(&self) -> NaiveDate {
        match self {
            Trade::Vanilla(t) => t.expiry,
            Trade::Exotic(t) => t.expiry,
        }
    }

    pub fn validate(&self) -> Result<(), DataError> {
        match self {
            Trade::Vanilla(t) => t.validate(),
            Trade::Exotic(t) => t.validate(),
        }
    }

    /// Tickers whose prices bear on this trade, in leg order, deduplicated.
    pub fn tickers(&self) -> Vec<Ticker> {
        match self {
            Trade::Vanilla(t) => vec![t.price_key().clone()],
            Trade::Exotic(t) => {
                let mut out: Vec<Ticker> = Vec::with_capacity(t.legs.len());
                for leg in &t.legs {
                    if !out.contains(&leg.index) {
                        out.push(leg.index.clone());
                    }
                }
                out
            }
        }
    }
}

impl From<VanillaTrade> for Trade {
    fn from(t: VanillaTrade) -> Self {
        Trade::Vanilla(t)
    }
}

impl From<ExoticTrade> for Trade {
    fn from(t: ExoticTrade) -> Self {
        Trade::Exotic(t)
    }
}
