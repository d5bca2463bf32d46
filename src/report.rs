//! Blotter report: reconciliation, per-trade descriptions and totals in one document.

use crate::domain::{ClosedTrade, ExoticTrade, PriceSnapshot, Ticker, Trade, TradeId, VanillaTrade};
use crate::engine::{
    describe, reconcile, rooting_for, summarize, BlotterSummary, Description, Reconciliation,
    RecordSource,
};
use crate::error::DataError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    pub trade_id: TradeId,
    pub source: RecordSource,
    pub description: Description,
    pub rooting: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlotterReport<'a> {
    pub as_of: Option<NaiveDate>,
    pub summary: BlotterSummary,
    pub reconciliation: Reconciliation<'a>,
    pub trades: Vec<TradeView>,
}

/// Every ticker a price lookup may be attempted on, first-seen order.
pub fn referenced_tickers(vanilla: &[VanillaTrade], exotic: &[ExoticTrade]) -> Vec<Ticker> {
    let mut out: Vec<Ticker> = Vec::new();
    let mut push = |t: &Ticker| {
        if !out.contains(t) {
            out.push(t.clone());
        }
    };
    for trade in vanilla {
        if let Some(bbg) = &trade.bbg_ticker {
            push(bbg);
        }
        push(&trade.index);
    }
    for trade in exotic {
        for leg in &trade.legs {
            push(&leg.index);
        }
    }
    out
}

pub fn build_report<'a>(
    vanilla: &'a [VanillaTrade],
    exotic: &'a [ExoticTrade],
    history: &[ClosedTrade],
    prices: Option<&PriceSnapshot>,
    as_of: Option<NaiveDate>,
) -> Result<BlotterReport<'a>, DataError> {
    let reconciliation = reconcile(vanilla, exotic)?;

    let live = vanilla
        .iter()
        .cloned()
        .map(|t| (RecordSource::Vanilla, Trade::from(t)))
        .chain(
            exotic
                .iter()
                .cloned()
                .map(|t| (RecordSource::Exotic, Trade::from(t))),
        );

    let mut trades = Vec::with_capacity(vanilla.len() + exotic.len());
    for (source, trade) in live {
        let description = describe(&trade, prices)?;
        let rooting = trade
            .tickers()
            .iter()
            .filter_map(|t| rooting_for(&trade, t))
            .map(|r| r.to_string())
            .collect();
        trades.push(TradeView {
            trade_id: trade.trade_id().clone(),
            source,
            description,
            rooting,
        });
    }

    Ok(BlotterReport {
        as_of,
        summary: summarize(vanilla, exotic, history),
        reconciliation,
        trades,
    })
}

fn id_label(id: &TradeId) -> &str {
    if id.is_empty() {
        "<no id>"
    } else {
        id.as_str()
    }
}

/// Plain-text rendering for a terminal.
pub fn render_text(report: &BlotterReport<'_>) -> String {
    let mut out = String::new();
    let s = &report.summary;
    let r = &report.reconciliation;

    let _ = writeln!(out, "== Blotter ==");
    if let Some(date) = report.as_of {
        let _ = writeln!(out, "As of: {}", date);
    }
    let _ = writeln!(
        out,
        "Live trades: {} ({} vanilla, {} exotic)",
        s.total_live_trades, s.live_vanilla_trades, s.live_exotic_trades
    );
    let _ = writeln!(
        out,
        "Notional: {}mm + {} contracts | Cost: ${}",
        s.notional_mm, s.contracts, s.cost_usd
    );

    let _ = writeln!(out, "\n== Reconciliation ==");
    let _ = writeln!(
        out,
        "Matched: {} | Vanilla only: {} | Exotic only: {}",
        r.matched.len(),
        r.vanilla_only.len(),
        r.exotic_only.len()
    );
    for pair in &r.matched {
        let _ = writeln!(out, "  = {}", pair.trade_id);
    }
    for t in &r.vanilla_only {
        let _ = writeln!(out, "  < {}", id_label(&t.base.trade_id));
    }
    for t in &r.exotic_only {
        let _ = writeln!(out, "  > {}", id_label(&t.base.trade_id));
    }
    for w in &r.warnings {
        let _ = writeln!(out, "  ! {}", w);
    }

    let _ = writeln!(out, "\n== Trades ==");
    for view in &report.trades {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            view.source,
            id_label(&view.trade_id),
            view.description.text
        );
        for line in &view.rooting {
            let _ = writeln!(out, "    {}", line);
        }
        for err in &view.description.lookup_errors {
            let _ = writeln!(out, "    ? {}", err);
        }
    }

    out
}
