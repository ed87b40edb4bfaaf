//! Locating the nad installation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::DiscoveryError;
use crate::prompt::{Prompt, PromptRequest};

/// Standard install root of the agent.
pub const DEFAULT_NAD_PATH: &str = "/opt/circonus";

/// Agent executable, relative to the install root.
pub const NAD_BINARY: [&str; 2] = ["sbin", "nad"];

/// Where operators can download agent packages.
pub const NAD_DOWNLOAD_URL: &str = "http://updates.circonus.net/node-agent/packages/";

/// `<root>/sbin/nad`
pub fn nad_binary_path(root: &Path) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(NAD_BINARY);
    path
}

/// True if both the install root and its agent executable exist.
pub fn is_nad_installed(root: &Path) -> bool {
    root.exists() && nad_binary_path(root).exists()
}

/// Returns a usable install root.
///
/// `configured` defaults to [`DEFAULT_NAD_PATH`]. When the root or its agent
/// executable is missing, the operator is asked once and the answer is used
/// as given.
pub fn resolve_nad_path<P: Prompt>(
    configured: Option<&Path>,
    prompt: &mut P,
) -> Result<PathBuf, DiscoveryError> {
    let path = configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NAD_PATH));

    if is_nad_installed(&path) {
        debug!("Found nad at {}", path.display());
        return Ok(path);
    }

    warn!("nad not found at {}", path.display());

    let request = PromptRequest::filepath(format!(
        "Node.js Agent not found at {}.\n\
         If nad is not installed, please visit {} and download the correct package for your platform.\n\
         If nad is installed in another location, enter that location.",
        path.display(),
        NAD_DOWNLOAD_URL
    ));

    let answer = prompt.question(&request)?;

    if answer.path.as_os_str().is_empty() {
        return Err(DiscoveryError::PathResolution {
            path,
            reason: "no install location was given".to_string(),
        });
    }

    info!("Using nad install path {}", answer.path.display());
    Ok(answer.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{NonInteractive, PromptAnswer, PromptError};
    use tempfile::tempdir;

    /// Answers every question with a fixed path and counts the calls.
    struct Scripted {
        answer: &'static str,
        asked: Vec<PromptRequest>,
    }

    impl Scripted {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn question(&mut self, request: &PromptRequest) -> Result<PromptAnswer, PromptError> {
            self.asked.push(request.clone());
            Ok(PromptAnswer {
                path: PathBuf::from(self.answer),
            })
        }
    }

    fn fake_install() -> tempfile::TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("sbin")).expect("mkdir sbin");
        std::fs::write(dir.path().join("sbin").join("nad"), "").expect("write nad");
        dir
    }

    #[test]
    fn test_existing_install_does_not_prompt() {
        let dir = fake_install();
        let mut prompt = Scripted::new("/elsewhere");

        let path = resolve_nad_path(Some(dir.path()), &mut prompt).expect("resolved");
        assert_eq!(path, dir.path());
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_missing_root_prompts_once_and_adopts_answer() {
        let mut prompt = Scripted::new("relative/nad root");

        let path =
            resolve_nad_path(Some(Path::new("/nonexistent/circonus")), &mut prompt).expect("resolved");
        assert_eq!(path, PathBuf::from("relative/nad root"));
        assert_eq!(prompt.asked.len(), 1);

        let request = &prompt.asked[0];
        assert!(request.required);
        assert!(request.description.contains("/nonexistent/circonus"));
        assert!(request.description.contains(NAD_DOWNLOAD_URL));
    }

    #[test]
    fn test_unset_path_checks_default_location() {
        if is_nad_installed(Path::new(DEFAULT_NAD_PATH)) {
            return;
        }
        let mut prompt = Scripted::new("/x");

        let path = resolve_nad_path(None, &mut prompt).expect("resolved");
        assert_eq!(path, PathBuf::from("/x"));
        assert_eq!(prompt.asked.len(), 1);
        assert!(prompt.asked[0].description.contains(DEFAULT_NAD_PATH));
    }

    #[test]
    fn test_root_without_binary_prompts() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut prompt = Scripted::new("/opt/other");

        let path = resolve_nad_path(Some(dir.path()), &mut prompt).expect("resolved");
        assert_eq!(path, PathBuf::from("/opt/other"));
        assert_eq!(prompt.asked.len(), 1);
    }

    #[test]
    fn test_prompt_error_propagates() {
        let err = resolve_nad_path(Some(Path::new("/nonexistent/circonus")), &mut NonInteractive)
            .expect_err("prompt refused");
        assert!(matches!(err, DiscoveryError::Prompt(PromptError::NonInteractive)));
    }

    #[test]
    fn test_blank_answer_is_rejected() {
        let mut prompt = Scripted::new("");
        let err = resolve_nad_path(Some(Path::new("/nonexistent/circonus")), &mut prompt)
            .expect_err("blank answer");
        assert!(matches!(err, DiscoveryError::PathResolution { .. }));
    }

    #[test]
    fn test_binary_path_layout() {
        assert_eq!(
            nad_binary_path(Path::new(DEFAULT_NAD_PATH)),
            PathBuf::from("/opt/circonus/sbin/nad")
        );
    }
}
