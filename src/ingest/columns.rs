//! Column alias tables for the two booking exports.
//!
//! Headers are matched after lower-casing and trimming. The first alias found
//! wins, so more specific names come first.

use csv::StringRecord;
use std::collections::HashMap;

pub type ColumnTable = &'static [(&'static str, &'static [&'static str])];

pub const VANILLA_COLUMNS: ColumnTable = &[
    ("trade_date", &["trade_date", "date", "trade date"]),
    ("trade_id", &["trade_id", "tradeid", "id", "trade id"]),
    ("book", &["book", "portfolio"]),
    ("strategy", &["strategy", "strat"]),
    ("side", &["side", "direction"]),
    ("index", &["index", "underlying", "underlying1", "ticker"]),
    (
        "bbg_ticker",
        &["bbg_ticker", "bloomberg_ticker", "bbg ticker", "ticker"],
    ),
    (
        "notional_mm",
        &["notional_mm", "notional_mm_or_contracts", "notional", "size"],
    ),
    ("contracts", &["contracts", "contract_count"]),
    ("expiry", &["expiry", "expiration", "maturity"]),
    ("payoff_type", &["payoff_type", "payoff", "product_type"]),
    ("strike", &["strike", "strike1", "strike_price"]),
    ("strike2", &["strike2", "strike_2", "short_strike"]),
    ("cost_bp", &["cost_bp", "cost_bp_or_pt", "premium_bp"]),
    ("cost_usd", &["cost_usd", "cost", "premium_usd"]),
    ("mars_id", &["mars_id", "mars id", "marsid"]),
    ("notes", &["notes", "comment", "comments"]),
];

pub const VANILLA_REQUIRED: &[&str] = &[
    "trade_date",
    "trade_id",
    "side",
    "index",
    "expiry",
    "payoff_type",
    "strike",
];

pub const EXOTIC_COLUMNS: ColumnTable = &[
    ("trade_date", &["trade_date", "date", "trade date"]),
    ("trade_id", &["trade_id", "tradeid", "id", "trade id"]),
    ("book", &["book", "portfolio"]),
    ("strategy", &["strategy", "strat"]),
    ("side", &["side", "direction"]),
    ("notional_mm", &["notional_mm", "notional", "size"]),
    ("expiry", &["expiry", "expiration", "maturity"]),
    ("index1", &["index1", "underlying1", "ticker1"]),
    ("cond1", &["cond1", "condition1", "barrier_type1"]),
    ("strike1", &["strike1", "strike_1", "barrier1"]),
    ("index2", &["index2", "underlying2", "ticker2"]),
    ("cond2", &["cond2", "condition2", "barrier_type2"]),
    ("strike2", &["strike2", "strike_2", "barrier2"]),
    ("logic", &["logic", "and_or", "operator"]),
    ("cost_bp", &["cost_bp", "premium_bp", "cost"]),
    ("cost_usd", &["cost_usd", "premium_usd", "cost_dollars"]),
    ("mars_id", &["mars_id", "mars id", "marsid"]),
    ("notes", &["notes", "comment", "comments"]),
];

pub const EXOTIC_REQUIRED: &[&str] = &[
    "trade_date",
    "trade_id",
    "side",
    "notional_mm",
    "expiry",
    "index1",
    "cond1",
    "strike1",
    "logic",
];

/// Map each standard column name to its position in `headers`.
pub fn resolve(headers: &StringRecord, table: ColumnTable) -> HashMap<&'static str, usize> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut resolved = HashMap::new();
    for (standard, aliases) in table {
        let found = aliases
            .iter()
            .find_map(|alias| normalized.iter().position(|h| h == alias));
        if let Some(idx) = found {
            resolved.insert(*standard, idx);
        }
    }
    resolved
}

/// First required column absent from `resolved`.
pub fn first_missing(
    resolved: &HashMap<&'static str, usize>,
    required: &[&'static str],
) -> Option<&'static str> {
    required
        .iter()
        .copied()
        .find(|name| !resolved.contains_key(name))
}
