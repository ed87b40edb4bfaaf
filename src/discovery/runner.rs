//! Execution of a single helper script.
//!
//! The script is started with no arguments and a closed stdin. Stdout is
//! streamed chunk by chunk to the caller, stderr is collected and logged once
//! the process is gone.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::error::ScriptStatus;

/// Read size for stdout chunks.
const CHUNK_SIZE: usize = 8 * 1024;

/// Runs one script and forwards its stdout.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl ScriptRunner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Kill the script and fail once `timeout` has elapsed. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the script to completion, handing every stdout chunk to `on_chunk`.
    ///
    /// Returns `Ok(())` only for exit status zero.
    pub async fn run<F>(&self, mut on_chunk: F) -> Result<(), ScriptStatus>
    where
        F: FnMut(&[u8]),
    {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ScriptStatus::NotStarted(e.to_string()))?;

        debug!("Started {} (pid {:?})", self.path.display(), child.id());

        let outcome = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, drive(&mut child, &mut on_chunk)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(
                            "{} did not finish within {:?}, killing it",
                            self.path.display(),
                            limit
                        );
                        if let Err(e) = child.kill().await {
                            warn!("Failed to kill {}: {}", self.path.display(), e);
                        }
                        return Err(ScriptStatus::TimedOut(limit));
                    }
                }
            }
            None => drive(&mut child, &mut on_chunk).await,
        };

        let (status, stderr) = outcome.map_err(|e| ScriptStatus::NotStarted(e.to_string()))?;

        if !stderr.is_empty() {
            debug!(
                "{} stderr: {}",
                self.path.display(),
                String::from_utf8_lossy(&stderr).trim_end()
            );
        }

        exit_result(status)
    }
}

/// Streams stdout, collects stderr, then waits for the exit status.
async fn drive<F>(child: &mut Child, on_chunk: &mut F) -> std::io::Result<(ExitStatus, Vec<u8>)>
where
    F: FnMut(&[u8]),
{
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let read_stdout = async {
        if let Some(mut stdout) = stdout {
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let n = stdout.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                on_chunk(&buf[..n]);
            }
        }
        Ok::<_, std::io::Error>(())
    };

    let (stdout_result, stderr_bytes) = tokio::join!(read_stdout, read_all(stderr));
    stdout_result?;

    let status = child.wait().await?;
    Ok((status, stderr_bytes))
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(mut reader) = reader {
        // Stderr is diagnostics only; a read error just truncates it.
        let _ = reader.read_to_end(&mut out).await;
    }
    out
}

fn exit_result(status: ExitStatus) -> Result<(), ScriptStatus> {
    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code() {
        return Err(ScriptStatus::Exited(code));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(ScriptStatus::Signaled(signal));
        }
    }

    Err(ScriptStatus::Exited(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_script_is_a_failure() {
        let runner = ScriptRunner::new("/nonexistent/node-agent.d/cpu.sh");
        let mut chunks = 0;
        let result = runner.run(|_| chunks += 1).await;

        assert!(matches!(result, Err(ScriptStatus::NotStarted(_))));
        assert_eq!(chunks, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_result_codes() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(exit_result(ExitStatus::from_raw(0)), Ok(()));
        // Raw wait status: exit code lives in the high byte.
        assert_eq!(
            exit_result(ExitStatus::from_raw(3 << 8)),
            Err(ScriptStatus::Exited(3))
        );
        // SIGKILL
        assert_eq!(
            exit_result(ExitStatus::from_raw(9)),
            Err(ScriptStatus::Signaled(9))
        );
    }
}
