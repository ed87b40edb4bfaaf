//! CLI command implementations for nad-component.
//!
//! This module provides implementations for all CLI subcommands:
//! - `discover`: Path resolution and metric discovery
//! - `defaults`: Default metrics and graphs
//! - `check`: Installation validation
//! - `config`: Configuration file generation and display

pub mod check;
pub mod config;
pub mod defaults;
pub mod discover;

use serde::Serialize;

use crate::cli::OutputFormat;

// Re-export command functions
pub use check::command_check;
pub use config::{command_config, command_show_config};
pub use defaults::command_defaults;
pub use discover::command_discover;

/// Serializes a command result in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Toml => toml::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(output)
}
