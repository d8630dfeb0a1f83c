//! Operator session: the client copy of backend state plus the current view

use std::fmt;

use crate::api::backend::BackendClient;
use crate::models::{EntryForm, ReferenceData, ReferenceKind, Transaction};
use crate::services::history_service::HistoryView;
use crate::utils::Toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Entry,
    History,
    Mismatches,
    Reference,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Entry => "entry",
            View::History => "history",
            View::Mismatches => "mismatches",
            View::Reference => "reference",
        }
    }
}

/// An action waiting for a yes/no answer on the next input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Delete { kind: ReferenceKind, id: i64 },
}

pub struct Session {
    pub client: BackendClient,
    pub page_size: usize,
    pub view: View,
    /// Replaced wholesale after every successful fetch
    pub snapshot: Vec<Transaction>,
    pub history: HistoryView,
    pub mismatches: Vec<Transaction>,
    pub reference: ReferenceData,
    pub form: EntryForm,
    pub pending: Option<Pending>,
}

impl Session {
    pub fn new(client: BackendClient, page_size: usize) -> Self {
        Self {
            client,
            page_size,
            view: View::Entry,
            snapshot: Vec::new(),
            history: HistoryView::new(),
            mismatches: Vec::new(),
            reference: ReferenceData::default(),
            form: EntryForm::now(),
            pending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Toast(Toast),
}

/// Everything one input line produced, in order
#[derive(Debug, Default)]
pub struct Reply {
    pub outputs: Vec<Output>,
    pub quit: bool,
}

impl Reply {
    pub fn text(&mut self, text: impl Into<String>) {
        self.outputs.push(Output::Text(text.into()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.outputs.push(Output::Toast(Toast::success(message)));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.outputs.push(Output::Toast(Toast::error(message)));
    }

    #[cfg(test)]
    pub fn toasts(&self) -> Vec<&Toast> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Toast(t) => Some(t),
                Output::Text(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for output in &self.outputs {
            match output {
                Output::Text(text) => writeln!(f, "{}", text)?,
                Output::Toast(toast) => writeln!(f, "{}", toast)?,
            }
        }
        Ok(())
    }
}
