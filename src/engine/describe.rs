//! Plain-English payoff descriptions and in-the-money checks.

use crate::domain::{Decimal, ExoticTrade, Leg, PriceSnapshot, Side, Trade, TradeId, VanillaTrade};
use crate::engine::rooting::rooting_direction;
use crate::error::{DataError, LookupError};
use serde::Serialize;
use tracing::warn;

/// What has to happen for a trade to pay off, and whether it currently does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub trade_id: TradeId,
    pub text: String,
    /// `None` when no price was supplied or one was missing.
    pub is_in_the_money: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lookup_errors: Vec<LookupError>,
}

/// Describe either variant against an optional price snapshot.
///
/// Vanilla prices are looked up by market-data ticker first, then by index label.
pub fn describe(trade: &Trade, prices: Option<&PriceSnapshot>) -> Result<Description, DataError> {
    match trade {
        Trade::Vanilla(t) => {
            let Some(snapshot) = prices else {
                return Ok(describe_vanilla(t, None));
            };
            let price = t
                .bbg_ticker
                .as_ref()
                .and_then(|ticker| snapshot.get(ticker))
                .or_else(|| snapshot.get(&t.index));
            match price {
                Some(price) => Ok(describe_vanilla(t, Some(price))),
                None => {
                    let err = missing_price(&t.base.trade_id, t.price_key());
                    let mut description = describe_vanilla(t, None);
                    description.lookup_errors.push(err);
                    Ok(description)
                }
            }
        }
        Trade::Exotic(t) => describe_exotic(t, prices),
    }
}

pub fn describe_vanilla(trade: &VanillaTrade, current_price: Option<Decimal>) -> Description {
    let direction = rooting_direction(trade.base.side, trade.payoff_type);
    let mut text = format!(
        "{} needs {} to be {} {} at expiry",
        trade.base.side.holder(),
        trade.index,
        direction.word(),
        trade.strike
    );
    match (trade.payoff_type.is_spread(), trade.strike2) {
        (true, Some(short)) => {
            text.push_str(&format!(" ({}, short strike {}).", trade.payoff_type, short))
        }
        (true, None) => text.push_str(&format!(" ({}).", trade.payoff_type)),
        (false, _) => text.push('.'),
    }

    let is_in_the_money = current_price.map(|price| {
        let itm = direction.is_satisfied(price, trade.strike);
        let margin = price - trade.strike;
        let position = if margin.is_zero() {
            "at strike".to_string()
        } else if margin > Decimal::zero() {
            format!("{} above strike", margin.abs())
        } else {
            format!("{} below strike", margin.abs())
        };
        text.push_str(&format!(
            " Currently {} ({}): {}.",
            price,
            position,
            money_word(itm)
        ));
        itm
    });

    Description {
        trade_id: trade.base.trade_id.clone(),
        text,
        is_in_the_money,
        lookup_errors: Vec::new(),
    }
}

/// Describe a dual digital; `prices` is keyed by each leg's index.
pub fn describe_exotic(
    trade: &ExoticTrade,
    prices: Option<&PriceSnapshot>,
) -> Result<Description, DataError> {
    let (first, second) = trade.leg_pair()?;
    let side = trade.base.side;
    let target = match side {
        Side::Buy => "hold",
        Side::Sell => "fail",
    };
    let mut text = format!(
        "{} needs {} {} {} to {} at expiry.",
        side.holder(),
        leg_clause(first),
        trade.logic.word(),
        leg_clause(second),
        target
    );

    let mut lookup_errors: Vec<LookupError> = Vec::new();
    let mut is_in_the_money = None;

    if let Some(snapshot) = prices {
        let mut observed: Vec<(&Leg, Decimal)> = Vec::with_capacity(2);
        for leg in [first, second] {
            match snapshot.get(&leg.index) {
                Some(price) => observed.push((leg, price)),
                None => {
                    if !lookup_errors.iter().any(|e| e.ticker == leg.index) {
                        lookup_errors.push(missing_price(&trade.base.trade_id, &leg.index));
                    }
                }
            }
        }

        if lookup_errors.is_empty() {
            let truths: Vec<bool> = observed
                .iter()
                .map(|(leg, price)| leg.condition.evaluate(*price, leg.strike))
                .collect();
            let holds = trade.logic.combine(truths[0], truths[1]);
            let itm = match side {
                Side::Buy => holds,
                Side::Sell => !holds,
            };

            let legs: Vec<String> = observed
                .iter()
                .zip(&truths)
                .map(|((leg, price), met)| {
                    format!(
                        "{} at {} ({})",
                        leg.index,
                        price,
                        if *met { "met" } else { "not met" }
                    )
                })
                .collect();
            text.push_str(&format!(
                " Currently {}: condition {}, {}.",
                legs.join(", "),
                if holds { "holds" } else { "fails" },
                money_word(itm)
            ));
            is_in_the_money = Some(itm);
        }
    }

    Ok(Description {
        trade_id: trade.base.trade_id.clone(),
        text,
        is_in_the_money,
        lookup_errors,
    })
}

fn leg_clause(leg: &Leg) -> String {
    format!("{} {} {}", leg.index, leg.condition.verb(), leg.strike)
}

fn money_word(itm: bool) -> &'static str {
    if itm {
        "in the money"
    } else {
        "out of the money"
    }
}

fn missing_price(trade_id: &TradeId, ticker: &crate::domain::Ticker) -> LookupError {
    warn!(trade_id = %trade_id, ticker = %ticker, "No price available, describing without in-the-money check");
    LookupError {
        trade_id: trade_id.clone(),
        ticker: ticker.clone(),
    }
}
