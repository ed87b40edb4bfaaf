//! Metric discovery from the agent's helper scripts.
//!
//! This module provides:
//! - `runner`: spawning one script and streaming its stdout
//! - `line_buffer`: reassembling output chunks into complete lines
//! - `aggregator`: building prefixed metric identifiers from lines
//! - `coordinator`: running all scripts concurrently and joining the results

pub mod aggregator;
pub mod coordinator;
pub mod line_buffer;
pub mod runner;

// Re-export commonly used types
pub use aggregator::{metric_identifier, MetricCollection, SEPARATOR};
pub use coordinator::{discover_metrics, DiscoveryOptions, ScriptMapping, SCRIPTS, SCRIPT_DIR};
pub use line_buffer::LineBuffer;
pub use runner::ScriptRunner;
