//! Transaction models

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Trade direction, relative to the base currency of the pair
///
/// The backend stores whatever case the client sent, so rows are read case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }

    /// The direction the counterparty books for the same trade
    pub fn opposite(self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }

    /// Parse `buy`/`sell` in any letter case
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "buy" | "b" => Some(Direction::Buy),
            "sell" | "s" => Some(Direction::Sell),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Direction::parse(&value).ok_or_else(|| de::Error::unknown_variant(&value, &["Buy", "Sell"]))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as returned by `GET /api/transactions` and `GET /api/mismatches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server row id, needed to fix a mismatch
    #[serde(default)]
    pub id: Option<i64>,
    pub transaction_number: String,
    pub date: String,
    pub time: String,
    pub bank1: String,
    pub bank2: String,
    pub pair: String,
    pub rate: f64,
    pub direction: Direction,
    pub amount_base: f64,
    pub amount_counter: f64,
    #[serde(default)]
    pub deal_type: Option<String>,
    #[serde(default)]
    pub local_code_role: Option<String>,
    #[serde(default)]
    pub currency1: Option<String>,
    #[serde(default)]
    pub currency2: Option<String>,
}

/// Request body for `POST /api/transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub transaction_number: String,
    pub date: String,
    pub time: String,
    pub bank1: String,
    pub bank2: String,
    pub pair: String,
    pub rate: f64,
    pub direction: Direction,
    pub amount_base: f64,
    pub amount_counter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_code_role: Option<String>,
}
