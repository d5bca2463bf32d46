//! Domain types for the hedge blotter.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Primitives: TradeId, Ticker, Side
//! - Payoff enumerations: PayoffType, Direction, Condition, Logic
//! - The Trade sum type over VanillaTrade and ExoticTrade
//! - Market reference data and closed-trade history

pub mod decimal;
pub mod history;
pub mod market;
pub mod payoff;
pub mod primitives;
pub mod trade;

pub use decimal::Decimal;
pub use history::{CloseStatus, ClosedTrade};
pub use market::{PricePoint, PriceSeries, PriceSnapshot};
pub use payoff::{Condition, Direction, Logic, PayoffType};
pub use primitives::{Side, Ticker, TradeId};
pub use trade::{Cost, ExoticTrade, Leg, Notional, Trade, TradeBase, VanillaTrade};
