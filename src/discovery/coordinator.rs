//! Concurrent discovery over the full list of helper scripts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::aggregator::{metric_identifier, MetricCollection};
use super::line_buffer::LineBuffer;
use super::runner::ScriptRunner;
use crate::error::DiscoveryError;

/// Directory, relative to the install root, that holds the helper scripts.
pub const SCRIPT_DIR: [&str; 2] = ["etc", "node-agent.d"];

/// A helper script and the metric namespace its output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptMapping {
    pub prefix: &'static str,
    pub filename: &'static str,
}

/// Helper scripts shipped with the agent.
pub const SCRIPTS: &[ScriptMapping] = &[
    ScriptMapping { prefix: "cpu", filename: "cpu.sh" },
    ScriptMapping { prefix: "disk", filename: "disk.elf" },
    ScriptMapping { prefix: "fs", filename: "fs.elf" },
    ScriptMapping { prefix: "if", filename: "if.sh" },
    ScriptMapping { prefix: "vm", filename: "vm.sh" },
];

impl ScriptMapping {
    /// `<install_path>/etc/node-agent.d/<filename>`
    pub fn script_path(&self, install_path: &Path) -> PathBuf {
        let mut path = install_path.to_path_buf();
        path.extend(SCRIPT_DIR);
        path.push(self.filename);
        path
    }
}

/// Tuning for a discovery run.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Per-script timeout. `None` waits for every script indefinitely.
    pub script_timeout: Option<Duration>,
}

/// Runs every script in `scripts` concurrently and collects their metrics.
///
/// Succeeds only if all scripts exit with status zero. The first failing
/// script ends the run; remaining scripts are aborted and killed.
pub async fn discover_metrics(
    install_path: &Path,
    scripts: &[ScriptMapping],
    options: &DiscoveryOptions,
) -> Result<MetricCollection, DiscoveryError> {
    info!(
        "Discovering metrics from {} scripts under {}",
        scripts.len(),
        install_path.display()
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let mut tasks = JoinSet::new();

    for mapping in scripts.iter().copied() {
        let runner = ScriptRunner::new(mapping.script_path(install_path))
            .with_timeout(options.script_timeout);
        tasks.spawn(run_mapping(mapping, runner, tx.clone()));
    }
    // Only the tasks hold senders from here on.
    drop(tx);

    let mut metrics = MetricCollection::new();

    loop {
        tokio::select! {
            Some(metric) = rx.recv() => metrics.push(metric),
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    warn!("Metric discovery failed: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
                Some(Err(e)) => {
                    tasks.abort_all();
                    return Err(DiscoveryError::Task(e.to_string()));
                }
            },
        }
    }

    // All tasks are done and their senders dropped; take what is still queued.
    while let Ok(metric) = rx.try_recv() {
        metrics.push(metric);
    }

    info!("Discovered {} metrics", metrics.len());
    Ok(metrics)
}

async fn run_mapping(
    mapping: ScriptMapping,
    runner: ScriptRunner,
    tx: mpsc::UnboundedSender<String>,
) -> Result<(), DiscoveryError> {
    let mut buffer = LineBuffer::new();
    let mut lines = 0usize;

    let result = runner
        .run(|chunk| {
            for line in buffer.push(chunk) {
                lines += 1;
                // The receiver only goes away once the run has already failed.
                let _ = tx.send(metric_identifier(mapping.prefix, &line));
            }
        })
        .await;

    let fragment = buffer.finish();
    if !fragment.is_empty() {
        debug!(
            "{}: dropping unterminated output {:?}",
            runner.path().display(),
            String::from_utf8_lossy(&fragment)
        );
    }

    match result {
        Ok(()) => {
            debug!("{}: {} lines", runner.path().display(), lines);
            Ok(())
        }
        Err(status) => Err(DiscoveryError::ScriptFailed {
            path: runner.path().to_path_buf(),
            status,
        }),
    }
}
