//! Node.js Agent (nad) component for the monitoring setup installer.
//!
//! The component describes the default metrics and graphs offered for a host
//! running nad, finds the agent's install path, and discovers which metrics
//! the installed agent actually exposes by running its helper scripts.
//!
//! # Features
//!
//! - **Metric Discovery**: Runs the agent's helper scripts concurrently and
//!   turns each output line into a prefixed metric identifier
//! - **Chunk-Safe Parsing**: Output is reassembled into lines regardless of how
//!   the child process flushes it
//! - **Path Resolution**: Falls back to asking the operator when the agent is
//!   not at its configured location
//! - **Default Catalog**: Default metric selection and graph definitions
//!
//! # Usage
//!
//! ```rust,no_run
//! use nad_component::{Config, NadComponent, NonInteractive};
//!
//! # async fn run() -> Result<(), nad_component::DiscoveryError> {
//! let mut component = NadComponent::new(Config::default());
//! component.initialize(&mut NonInteractive).await?;
//!
//! for metric in component.available_check_bundles()["nad"].metrics.iter() {
//!     println!("{}", metric);
//! }
//! println!("{:?}", component.bundle_config("nad"));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod component;
pub mod config;
pub mod discovery;
pub mod error;
pub mod path_resolver;
pub mod prompt;

// Re-export main types for convenience
pub use catalog::{Datapoint, Graph, NAD_BUNDLE};
pub use component::{BundleConfig, BundleMetrics, CheckBundles, NadComponent, SetupStep};
pub use config::{load_config, validate_effective_config, Config};
pub use discovery::{discover_metrics, DiscoveryOptions, MetricCollection, ScriptMapping, SCRIPTS};
pub use error::{DiscoveryError, ScriptStatus};
pub use prompt::{NonInteractive, Prompt, PromptAnswer, PromptError, PromptRequest, TerminalPrompt};
