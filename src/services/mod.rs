//! Operations behind the commands: backend calls plus rendering

pub mod entry_service;
pub mod history_service;
pub mod mismatch_service;
pub mod reference_service;
