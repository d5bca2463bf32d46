//! Rooting direction: which way a holder needs the underlying to go.

use crate::domain::{Direction, PayoffType, Side, Ticker, Trade};
use serde::Serialize;

/// Side x payoff lookup for vanilla options.
///
/// Exhaustive over both enums: a new payoff type does not compile until it
/// is given a direction here. A spread points the same way as its long leg.
pub fn rooting_direction(side: Side, payoff: PayoffType) -> Direction {
    match (side, payoff) {
        (Side::Buy, PayoffType::Call | PayoffType::CallSpread) => Direction::Above,
        (Side::Buy, PayoffType::Put | PayoffType::PutSpread) => Direction::Below,
        (Side::Sell, PayoffType::Call | PayoffType::CallSpread) => Direction::Below,
        (Side::Sell, PayoffType::Put | PayoffType::PutSpread) => Direction::Above,
    }
}

fn flip(direction: Direction) -> Direction {
    match direction {
        Direction::Above => Direction::Below,
        Direction::Below => Direction::Above,
    }
}

/// The move on one underlying that helps the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rooting {
    pub ticker: Ticker,
    pub direction: Direction,
}

impl std::fmt::Display for Rooting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self.direction {
            Direction::Above => "HIGHER",
            Direction::Below => "LOWER",
        };
        write!(f, "Rooting for {} to go {}", self.ticker, word)
    }
}

/// Rooting move for `ticker` within `trade`, or `None` if the trade does not
/// reference it.
///
/// For a dual digital the first leg on `ticker` decides; a seller wants that
/// leg to fail, so the leg's direction is flipped.
pub fn rooting_for(trade: &Trade, ticker: &Ticker) -> Option<Rooting> {
    let direction = match trade {
        Trade::Vanilla(t) => {
            if &t.index != ticker && t.bbg_ticker.as_ref() != Some(ticker) {
                return None;
            }
            rooting_direction(t.base.side, t.payoff_type)
        }
        Trade::Exotic(t) => {
            let leg = t.legs.iter().find(|leg| &leg.index == ticker)?;
            match t.base.side {
                Side::Buy => leg.condition.direction(),
                Side::Sell => flip(leg.condition.direction()),
            }
        }
    };
    Some(Rooting {
        ticker: ticker.clone(),
        direction,
    })
}
