//! Closed trades: records moved off the live blotter with their realised result.

use crate::domain::{Decimal, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseStatus {
    Unwound,
    ExpiredWorthless,
}

impl std::fmt::Display for CloseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseStatus::Unwound => write!(f, "Unwound"),
            CloseStatus::ExpiredWorthless => write!(f, "Expired Worthless"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub trade: Trade,
    pub status: CloseStatus,
    pub close_date: NaiveDate,
    pub unwind_price: Decimal,
    pub unwind_value: Decimal,
    pub pnl_usd: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
