//! Entry form models

use chrono::{Local, NaiveDate, NaiveTime};

use super::transaction::Direction;

/// Editable fields of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Time,
    Bank1,
    Bank2,
    Pair,
    Rate,
    Direction,
    AmountBase,
    DealType,
    LocalCodeRole,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Date,
        FormField::Time,
        FormField::Bank1,
        FormField::Bank2,
        FormField::Pair,
        FormField::Rate,
        FormField::Direction,
        FormField::AmountBase,
        FormField::DealType,
        FormField::LocalCodeRole,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Time => "time",
            FormField::Bank1 => "bank1",
            FormField::Bank2 => "bank2",
            FormField::Pair => "pair",
            FormField::Rate => "rate",
            FormField::Direction => "direction",
            FormField::AmountBase => "amount",
            FormField::DealType => "deal",
            FormField::LocalCodeRole => "role",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if let Some(field) = FormField::ALL.iter().find(|f| f.name() == value) {
            return Some(*field);
        }
        match value.as_str() {
            "amount_base" | "base" => Some(FormField::AmountBase),
            "dir" => Some(FormField::Direction),
            "deal_type" => Some(FormField::DealType),
            "local_code_role" => Some(FormField::LocalCodeRole),
            _ => None,
        }
    }
}

/// Draft transaction before submission
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub date: Option<String>,
    pub time: Option<String>,
    pub bank1: Option<String>,
    pub bank2: Option<String>,
    pub pair: Option<String>,
    /// Already rounded to 5 fraction digits
    pub rate: Option<f64>,
    pub direction: Direction,
    pub amount_base: Option<f64>,
    pub deal_type: Option<String>,
    pub local_code_role: Option<String>,
}

impl EntryForm {
    /// Empty form dated at the current local date and time
    pub fn now() -> Self {
        let now = Local::now();
        Self::with_defaults(now.date_naive(), now.time())
    }

    pub fn with_defaults(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date: Some(date.format("%Y-%m-%d").to_string()),
            time: Some(time.format("%H:%M").to_string()),
            bank1: None,
            bank2: None,
            pair: None,
            rate: None,
            direction: Direction::Buy,
            amount_base: None,
            deal_type: None,
            local_code_role: None,
        }
    }
}
