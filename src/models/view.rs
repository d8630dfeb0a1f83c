//! History table state: columns, filters and sort key

use std::collections::BTreeMap;

use super::transaction::{Direction, Transaction};

/// History table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    TransactionNumber,
    Date,
    Time,
    Pair,
    Direction,
    Rate,
    AmountBase,
    AmountCounter,
    Bank1,
    Bank2,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::TransactionNumber,
        Column::Date,
        Column::Time,
        Column::Pair,
        Column::Direction,
        Column::Rate,
        Column::AmountBase,
        Column::AmountCounter,
        Column::Bank1,
        Column::Bank2,
    ];

    /// Field name as sent by the backend
    pub fn key(&self) -> &'static str {
        match self {
            Column::TransactionNumber => "transaction_number",
            Column::Date => "date",
            Column::Time => "time",
            Column::Pair => "pair",
            Column::Direction => "direction",
            Column::Rate => "rate",
            Column::AmountBase => "amount_base",
            Column::AmountCounter => "amount_counter",
            Column::Bank1 => "bank1",
            Column::Bank2 => "bank2",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::TransactionNumber => "Number",
            Column::Date => "Date",
            Column::Time => "Time",
            Column::Pair => "Pair",
            Column::Direction => "Dir",
            Column::Rate => "Rate",
            Column::AmountBase => "Base Amt",
            Column::AmountCounter => "Counter Amt",
            Column::Bank1 => "Bank 1",
            Column::Bank2 => "Bank 2",
        }
    }

    /// Accepts the backend field name or a short alias
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if let Some(col) = Column::ALL.iter().find(|c| c.key() == value) {
            return Some(*col);
        }
        match value.as_str() {
            "number" | "no" | "tx" => Some(Column::TransactionNumber),
            "dir" => Some(Column::Direction),
            "base" | "amount" => Some(Column::AmountBase),
            "counter" => Some(Column::AmountCounter),
            _ => None,
        }
    }

    /// Columns compared as floats when sorting
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Rate | Column::AmountBase | Column::AmountCounter)
    }

    /// Raw text of the field, used by column filters
    ///
    /// Numbers use their shortest round-trip form (`2.0` -> `"2"`).
    pub fn text(&self, tx: &Transaction) -> String {
        match self {
            Column::TransactionNumber => tx.transaction_number.clone(),
            Column::Date => tx.date.clone(),
            Column::Time => tx.time.clone(),
            Column::Pair => tx.pair.clone(),
            Column::Direction => tx.direction.to_string(),
            Column::Rate => tx.rate.to_string(),
            Column::AmountBase => tx.amount_base.to_string(),
            Column::AmountCounter => tx.amount_counter.to_string(),
            Column::Bank1 => tx.bank1.clone(),
            Column::Bank2 => tx.bank2.clone(),
        }
    }

    /// Numeric value for numeric columns
    pub fn number(&self, tx: &Transaction) -> Option<f64> {
        match self {
            Column::Rate => Some(tx.rate),
            Column::AmountBase => Some(tx.amount_base),
            Column::AmountCounter => Some(tx.amount_counter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// Active predicates of the history table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text search over pair, banks and transaction number
    pub search: String,
    /// Exact `YYYY-MM-DD` match
    pub date: Option<String>,
    /// `None` shows both directions
    pub direction: Option<Direction>,
    /// Substring pattern per column, never holds empty patterns
    pub columns: BTreeMap<Column, String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.date.is_none()
            && self.direction.is_none()
            && self.columns.is_empty()
    }
}
