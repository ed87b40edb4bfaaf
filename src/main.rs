//! nad-component
//!
//! Command line entry point for the Node.js Agent component with tracing logging.
//! Resolves configuration, then dispatches to the requested subcommand.

mod cli;
mod commands;

use clap::Parser;
use nad_component::validate_effective_config;
use tracing::{debug, Level};

use cli::{effective_log_level, resolve_config, Args, Commands, LogLevel};
use commands::{
    command_check, command_config, command_defaults, command_discover, command_show_config,
};

/// Initializes tracing logging subsystem with configured log level.
///
/// Logs go to stderr so that command output on stdout stays parseable.
fn setup_logging(level: LogLevel) {
    let log_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Tracing subscriber already installed, keeping it");
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Main application entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    setup_logging(effective_log_level(&config));

    match &args.command {
        Commands::Config { output, format } => command_config(output.clone(), *format),

        Commands::ShowConfig { format } => {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
            command_show_config(&config, *format)
        }

        Commands::Defaults { format } => command_defaults(&config, *format),

        Commands::Check => command_check(&config),

        Commands::Discover { format } => command_discover(&config, *format).await,
    }
}
