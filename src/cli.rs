//! CLI arguments and subcommands for nad-component.
//!
//! This module defines the command-line interface structure using the clap library,
//! and merges the command-line overrides into the loaded configuration.

use clap::{Parser, Subcommand, ValueEnum};
use nad_component::config::DEFAULT_LOG_LEVEL;
use nad_component::{load_config, Config};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "nad-component",
    about = "Node.js Agent component for the monitoring setup installer",
    long_about = "Node.js Agent component for the monitoring setup installer.\n\n\
                  Locates the nad installation, runs its helper scripts and reports \
                  which metrics the agent exposes, together with the default graphs \
                  and the check bundle endpoint.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level [default: config `log_level`, else warn]
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long, global = true)]
    pub no_config: bool,

    /// nad install root
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// Host the check bundle will poll
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Per-script timeout in seconds (0 = wait forever)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Fail instead of asking when nad is not found
    #[arg(long, global = true)]
    pub no_prompt: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the install path and discover the metrics nad exposes
    Discover {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the default metrics and graphs
    Defaults {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Check the nad installation and its helper scripts
    Check,

    /// Generate a configuration file
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Print the effective merged configuration
    ShowConfig {
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(path) = &args.path {
        config.path = Some(path.clone());
    }
    if let Some(target) = &args.target {
        config.target = Some(target.clone());
    }
    if let Some(timeout) = args.timeout {
        config.script_timeout_secs = Some(timeout);
    }
    if args.no_prompt {
        config.interactive = Some(false);
    }
    if let Some(level) = args.log_level {
        if let Some(value) = level.to_possible_value() {
            config.log_level = Some(value.get_name().to_string());
        }
    }

    Ok(config)
}

/// Level the logger runs at: the merged config value, falling back to
/// `DEFAULT_LOG_LEVEL` when it is missing or not a known level.
pub fn effective_log_level(config: &Config) -> LogLevel {
    config
        .log_level
        .as_deref()
        .and_then(|level| LogLevel::from_str(level, true).ok())
        .or_else(|| LogLevel::from_str(DEFAULT_LOG_LEVEL, true).ok())
        .unwrap_or(LogLevel::Warn)
}
