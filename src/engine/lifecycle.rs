//! Closing live trades: unwinds and worthless expiries.

use crate::domain::{CloseStatus, ClosedTrade, Decimal, Trade};
use crate::error::DataError;
use chrono::NaiveDate;
use tracing::info;

fn check_close_date(trade: &Trade, close_date: NaiveDate) -> Result<(), DataError> {
    let base = trade.base();
    if close_date < base.trade_date {
        return Err(DataError::CloseBeforeTradeDate {
            trade_id: base.trade_id.to_string(),
            trade_date: base.trade_date,
            close_date,
        });
    }
    Ok(())
}

/// Premium in USD; a cost quoted in basis points counts as zero.
fn usd_cost(trade: &Trade) -> Decimal {
    trade.base().cost.usd().unwrap_or_else(Decimal::zero)
}

/// Unwind at `unwind_price` per unit of size (per contract, or per million notional).
pub fn unwind(
    trade: Trade,
    close_date: NaiveDate,
    unwind_price: Decimal,
    notes: Option<String>,
) -> Result<ClosedTrade, DataError> {
    check_close_date(&trade, close_date)?;

    let overflow = |field: &str| DataError::Overflow {
        trade_id: trade.trade_id().to_string(),
        field: field.to_string(),
    };
    let unwind_value = unwind_price
        .checked_mul(trade.notional().quantity())
        .ok_or_else(|| overflow("unwind_value"))?;
    let pnl_usd = unwind_value
        .checked_sub(usd_cost(&trade))
        .ok_or_else(|| overflow("pnl_usd"))?;

    info!(trade_id = %trade.trade_id(), pnl_usd = %pnl_usd, "Trade unwound");

    Ok(ClosedTrade {
        trade,
        status: CloseStatus::Unwound,
        close_date,
        unwind_price,
        unwind_value,
        pnl_usd,
        notes,
    })
}

/// Expire with no payout: the whole premium is lost.
pub fn expire_worthless(trade: Trade, close_date: NaiveDate) -> Result<ClosedTrade, DataError> {
    check_close_date(&trade, close_date)?;

    let pnl_usd = -usd_cost(&trade);

    info!(trade_id = %trade.trade_id(), pnl_usd = %pnl_usd, "Trade expired worthless");

    Ok(ClosedTrade {
        trade,
        status: CloseStatus::ExpiredWorthless,
        close_date,
        unwind_price: Decimal::zero(),
        unwind_value: Decimal::zero(),
        pnl_usd,
        notes: None,
    })
}
