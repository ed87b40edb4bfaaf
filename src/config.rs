//! Configuration management for the nad component.
//!
//! This module handles loading and validating the component configuration
//! from files. It supports YAML, JSON, and TOML formats. Command line
//! overrides are applied by the binary on top of the loaded values.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::path_resolver::DEFAULT_NAD_PATH;

// Default configuration constants
pub const DEFAULT_TARGET: &str = "localhost";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Files tried, in order, when no config file is given explicitly.
pub const DEFAULT_CONFIG_LOCATIONS: &[&str] = &[
    "/etc/circonus/nad-component.yaml",
    "/etc/circonus/nad-component.yml",
    "/etc/circonus/nad-component.json",
    "./nad-component.yaml",
    "./nad-component.yml",
    "./nad-component.json",
];

/// Component configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Install root of the agent
    pub path: Option<PathBuf>,

    /// Host the check bundle will poll
    pub target: Option<String>,

    /// Per-script timeout in seconds (0 = wait forever)
    #[serde(alias = "script-timeout-secs")]
    pub script_timeout_secs: Option<u64>,

    /// Ask the operator when the install path is missing
    pub interactive: Option<bool>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_NAD_PATH)),
            target: Some(DEFAULT_TARGET.to_string()),
            script_timeout_secs: Some(0),
            interactive: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    pub fn script_timeout(&self) -> Option<Duration> {
        match self.script_timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    pub fn interactive(&self) -> bool {
        self.interactive.unwrap_or(true)
    }
}

/// Validate effective config (used by `show-config` and before discovery)
pub fn validate_effective_config(cfg: &Config) -> Result<(), String> {
    if let Some(path) = &cfg.path {
        if path.as_os_str().is_empty() {
            return Err("path must not be empty".into());
        }
    }

    if let Some(target) = cfg.target.as_deref() {
        let target = target.trim();
        if target.is_empty() {
            return Err("target must not be empty".into());
        }
        if target.contains("://") || target.contains('/') {
            return Err(format!(
                "Invalid target '{}', expected a host name without scheme or path",
                target
            ));
        }
        if target.chars().any(char::is_whitespace) {
            return Err(format!("Invalid target '{}', contains whitespace", target));
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(format!(
                    "Invalid log_level '{}', expected off/error/warn/info/debug/trace",
                    other
                ));
            }
        }
    }

    Ok(())
}

/// Configuration loading with multiple format support.
///
/// With no explicit `path` the first existing default location is used; if
/// there is none, defaults are returned.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match DEFAULT_CONFIG_LOCATIONS
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
        {
            Some(p) => p.to_path_buf(),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.target(), "localhost");
        assert_eq!(cfg.script_timeout(), None);
        assert!(cfg.interactive());
    }

    #[test]
    fn test_load_yaml_with_aliases() {
        let dir = tempdir().expect("Failed to create temp dir");
        let file = dir.path().join("nad.yaml");
        fs::write(
            &file,
            "path: /usr/local/circonus\ntarget: db01.example.com\nscript-timeout-secs: 15\n",
        )
        .expect("write config");

        let cfg = load_config(Some(&file)).expect("load");
        assert_eq!(cfg.path, Some(PathBuf::from("/usr/local/circonus")));
        assert_eq!(cfg.target(), "db01.example.com");
        assert_eq!(cfg.script_timeout(), Some(Duration::from_secs(15)));
        // Missing keys stay unset rather than taking defaults.
        assert_eq!(cfg.interactive, None);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempdir().expect("Failed to create temp dir");

        let json = dir.path().join("nad.json");
        fs::write(&json, r#"{"target": "web01", "interactive": false}"#).expect("write json");
        let cfg = load_config(Some(&json)).expect("load json");
        assert_eq!(cfg.target(), "web01");
        assert!(!cfg.interactive());

        let toml_file = dir.path().join("nad.toml");
        fs::write(&toml_file, "path = \"/srv/nad\"\nlog_level = \"debug\"\n").expect("write toml");
        let cfg = load_config(Some(&toml_file)).expect("load toml");
        assert_eq!(cfg.path, Some(PathBuf::from("/srv/nad")));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/nad-component.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_target() {
        let cfg = Config {
            target: Some("http://db01".to_string()),
            ..Config::default()
        };
        let err = validate_effective_config(&cfg).expect_err("invalid");
        assert!(err.contains("without scheme"));

        let cfg = Config {
            target: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let cfg = Config {
            log_level: Some("verbose".to_string()),
            ..Config::default()
        };
        assert!(validate_effective_config(&cfg).is_err());
    }
}
