//! Payoff enumerations: option type, leg comparator, leg combinator, direction.

use crate::domain::Decimal;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Listed option payoff. Spreads carry a second, short strike on the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffType {
    Call,
    Put,
    CallSpread,
    PutSpread,
}

impl PayoffType {
    pub fn is_spread(&self) -> bool {
        matches!(self, PayoffType::CallSpread | PayoffType::PutSpread)
    }
}

impl FromStr for PayoffType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            "call spread" | "callspread" | "cs" => Ok(PayoffType::CallSpread),
            "put spread" | "putspread" | "ps" => Ok(PayoffType::PutSpread),
            _ => Err(DataError::InvalidPayoffType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PayoffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoffType::Call => write!(f, "call"),
            PayoffType::Put => write!(f, "put"),
            PayoffType::CallSpread => write!(f, "call spread"),
            PayoffType::PutSpread => write!(f, "put spread"),
        }
    }
}

/// Side of the strike the holder needs the underlying to finish on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    pub fn word(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }

    /// Strict comparison: a price sitting on the strike satisfies neither.
    pub fn is_satisfied(&self, price: Decimal, strike: Decimal) -> bool {
        match self {
            Direction::Above => price > strike,
            Direction::Below => price < strike,
        }
    }
}

/// Comparator on one leg of a dual digital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Above,
    Below,
    AtOrAbove,
    AtOrBelow,
}

impl Condition {
    pub fn verb(&self) -> &'static str {
        match self {
            Condition::Above => "above",
            Condition::Below => "below",
            Condition::AtOrAbove => "at or above",
            Condition::AtOrBelow => "at or below",
        }
    }

    pub fn evaluate(&self, price: Decimal, strike: Decimal) -> bool {
        match self {
            Condition::Above => price > strike,
            Condition::Below => price < strike,
            Condition::AtOrAbove => price >= strike,
            Condition::AtOrBelow => price <= strike,
        }
    }

    /// Direction the underlying has to move for the leg to be true.
    pub fn direction(&self) -> Direction {
        match self {
            Condition::Above | Condition::AtOrAbove => Direction::Above,
            Condition::Below | Condition::AtOrBelow => Direction::Below,
        }
    }
}

impl FromStr for Condition {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            ">" | "above" | "gt" => Ok(Condition::Above),
            "<" | "below" | "lt" => Ok(Condition::Below),
            ">=" | "at or above" | "above or equal" | "gte" => Ok(Condition::AtOrAbove),
            "<=" | "at or below" | "below or equal" | "lte" => Ok(Condition::AtOrBelow),
            _ => Err(DataError::InvalidCondition(s.to_string())),
        }
    }
}

/// Combinator between the two legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    pub fn word(&self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }

    pub fn combine(&self, a: bool, b: bool) -> bool {
        match self {
            Logic::And => a && b,
            Logic::Or => a || b,
        }
    }
}

impl FromStr for Logic {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" | "&" | "&&" => Ok(Logic::And),
            "OR" | "|" | "||" => Ok(Logic::Or),
            _ => Err(DataError::InvalidLogic(s.to_string())),
        }
    }
}
