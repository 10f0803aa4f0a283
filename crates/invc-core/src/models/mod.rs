//! Data models: records, notes and configuration.

pub mod config;
pub mod notes;
pub mod record;
