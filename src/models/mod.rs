//! Data models shared by the backend client, services and commands

pub mod entry;
pub mod reference;
pub mod transaction;
pub mod view;

pub use entry::{EntryForm, FormField};
pub use reference::{ReferenceData, ReferenceItem, ReferenceKind};
pub use transaction::{Direction, NewTransaction, Transaction};
pub use view::{Column, FilterState, SortDirection, SortState};
