#![allow(dead_code)]

use chrono::NaiveDate;
use hedgeblotter::domain::{
    Condition, Cost, Decimal, ExoticTrade, Leg, Logic, Notional, PayoffType, Side, Ticker,
    TradeBase, TradeId, VanillaTrade,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn base(id: &str, side: Side) -> TradeBase {
    TradeBase {
        trade_id: TradeId::new(id),
        trade_date: date(2025, 1, 6),
        book: "Hedge".to_string(),
        strategy: "Index Options".to_string(),
        side,
        cost: Cost::Usd(Decimal::from(10_000)),
        notes: None,
    }
}

pub fn vanilla(id: &str, side: Side, payoff_type: PayoffType, strike: i64) -> VanillaTrade {
    VanillaTrade {
        base: base(id, side),
        notional: Notional::Contracts(Decimal::from(100)),
        expiry: date(2025, 12, 19),
        payoff_type,
        index: Ticker::new("SPY"),
        bbg_ticker: Some(Ticker::new("SPY US Equity")),
        strike: Decimal::from(strike),
        strike2: None,
        mars_id: None,
    }
}

pub fn leg(index: &str, condition: Condition, strike: i64) -> Leg {
    Leg {
        index: Ticker::new(index),
        condition,
        strike: Decimal::from(strike),
    }
}

pub fn dual_digital(id: &str, side: Side, logic: Logic) -> ExoticTrade {
    ExoticTrade {
        base: base(id, side),
        legs: vec![
            leg("SPX", Condition::Above, 4500),
            leg("VIX", Condition::Below, 20),
        ],
        logic,
        notional: Notional::Millions(Decimal::from(5)),
        expiry: date(2025, 12, 19),
        mars_id: Some("MARS-1".to_string()),
    }
}
