//! Blotter totals across live and closed trades.

use crate::domain::{ClosedTrade, Decimal, ExoticTrade, Notional, VanillaTrade};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlotterSummary {
    pub live_vanilla_trades: usize,
    pub live_exotic_trades: usize,
    pub total_live_trades: usize,
    pub notional_mm: Decimal,
    pub contracts: Decimal,
    pub cost_usd: Decimal,
    pub trade_history_count: usize,
    pub realized_pnl_usd: Decimal,
}

pub fn summarize(
    vanilla: &[VanillaTrade],
    exotic: &[ExoticTrade],
    history: &[ClosedTrade],
) -> BlotterSummary {
    let sizes = vanilla
        .iter()
        .map(|t| (t.notional, t.base.cost))
        .chain(exotic.iter().map(|t| (t.notional, t.base.cost)));

    let mut summary = BlotterSummary {
        live_vanilla_trades: vanilla.len(),
        live_exotic_trades: exotic.len(),
        total_live_trades: vanilla.len() + exotic.len(),
        trade_history_count: history.len(),
        realized_pnl_usd: history.iter().map(|c| c.pnl_usd).sum(),
        ..BlotterSummary::default()
    };

    for (notional, cost) in sizes {
        match notional {
            Notional::Millions(v) => summary.notional_mm = summary.notional_mm + v,
            Notional::Contracts(v) => summary.contracts = summary.contracts + v,
        }
        if let Some(usd) = cost.usd() {
            summary.cost_usd = summary.cost_usd + usd;
        }
    }

    summary
}
