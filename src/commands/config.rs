//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use nad_component::Config;

use crate::cli::OutputFormat;
use crate::commands::render;

/// Generates configuration files.
pub fn command_config(output: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("nad-component.yaml"),
    };

    let mut content = render(&config, format)?;
    if let OutputFormat::Yaml = format {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Prints the effective configuration.
pub fn command_show_config(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# Node.js Agent Component Configuration
# ======================================
#
# path: "/opt/circonus"        # nad install root (must contain sbin/nad)
# target: "localhost"          # Host the check bundle polls on port 2609
# script_timeout_secs: 0       # Kill helper scripts after N seconds (0 = never)
# interactive: true            # Ask for the install root when nad is not found
# log_level: "warn"            # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}
