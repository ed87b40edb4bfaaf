//! Error types for the nad component.
//!
//! Every failure of the setup pipeline is reported as a [`DiscoveryError`].
//! Script failures of any kind (non-zero exit, signal, spawn failure, timeout)
//! share the single [`DiscoveryError::ScriptFailed`] shape so that callers have
//! one thing to match on.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::prompt::PromptError;

/// Terminal outcome of a helper script that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    /// The process exited with a non-zero code.
    Exited(i32),
    /// The process was terminated by a signal.
    Signaled(i32),
    /// The process could not be started at all.
    NotStarted(String),
    /// The process was killed after exceeding the configured timeout.
    TimedOut(Duration),
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptStatus::Exited(code) => write!(f, "exited with status {}", code),
            ScriptStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
            ScriptStatus::NotStarted(reason) => write!(f, "could not be started: {}", reason),
            ScriptStatus::TimedOut(after) => {
                write!(f, "timed out after {:.1}s and was killed", after.as_secs_f64())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("no usable nad installation at {}: {reason}", path.display())]
    PathResolution { path: PathBuf, reason: String },

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("{} {status}", path.display())]
    ScriptFailed { path: PathBuf, status: ScriptStatus },

    #[error("discovery task failed: {0}")]
    Task(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DiscoveryError {
    /// Script path for [`DiscoveryError::ScriptFailed`], `None` otherwise.
    pub fn script_path(&self) -> Option<&PathBuf> {
        match self {
            DiscoveryError::ScriptFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_failed_message() {
        let err = DiscoveryError::ScriptFailed {
            path: PathBuf::from("/opt/circonus/etc/node-agent.d/vm.sh"),
            status: ScriptStatus::Exited(2),
        };
        assert_eq!(
            err.to_string(),
            "/opt/circonus/etc/node-agent.d/vm.sh exited with status 2"
        );
        assert_eq!(
            err.script_path().map(|p| p.display().to_string()).as_deref(),
            Some("/opt/circonus/etc/node-agent.d/vm.sh")
        );
    }

    #[test]
    fn test_prompt_error_is_transparent() {
        let err = DiscoveryError::from(PromptError::NonInteractive);
        assert_eq!(err.to_string(), PromptError::NonInteractive.to_string());
        assert!(err.script_path().is_none());
    }

    #[test]
    fn test_timeout_status_display() {
        let status = ScriptStatus::TimedOut(Duration::from_millis(1500));
        assert_eq!(status.to_string(), "timed out after 1.5s and was killed");
    }
}
