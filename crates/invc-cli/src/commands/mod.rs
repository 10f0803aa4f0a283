//! CLI subcommands.

pub mod config;
pub mod pdf;
pub mod process;
pub mod run;
