//! Reference data models (banks and currency pairs)

use serde::{Deserialize, Serialize};

/// The two reference collections the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Banks,
    Pairs,
}

impl ReferenceKind {
    /// Path segment under `/api/`
    pub fn path(&self) -> &'static str {
        match self {
            ReferenceKind::Banks => "banks",
            ReferenceKind::Pairs => "pairs",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ReferenceKind::Banks => "Bank",
            ReferenceKind::Pairs => "Pair",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "banks" | "bank" => Some(ReferenceKind::Banks),
            "pairs" | "pair" => Some(ReferenceKind::Pairs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
}

/// Client copy of both reference lists
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub banks: Vec<ReferenceItem>,
    pub pairs: Vec<ReferenceItem>,
}

impl ReferenceData {
    pub fn list(&self, kind: ReferenceKind) -> &[ReferenceItem] {
        match kind {
            ReferenceKind::Banks => &self.banks,
            ReferenceKind::Pairs => &self.pairs,
        }
    }

    pub fn replace(&mut self, kind: ReferenceKind, items: Vec<ReferenceItem>) {
        match kind {
            ReferenceKind::Banks => self.banks = items,
            ReferenceKind::Pairs => self.pairs = items,
        }
    }

    /// Find the canonical name of an item, ignoring letter case
    pub fn find_name(&self, kind: ReferenceKind, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.list(kind)
            .iter()
            .find(|item| item.name.to_lowercase() == wanted)
            .map(|item| item.name.as_str())
    }

    pub fn contains(&self, kind: ReferenceKind, name: &str) -> bool {
        self.list(kind).iter().any(|item| item.name == name)
    }
}
