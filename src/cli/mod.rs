//! CLI command handlers

pub mod commands;

pub use commands::{check_args, export, import};
