//! The nad component descriptor.
//!
//! [`NadComponent`] carries the static description of the Node.js Agent
//! component (metadata, default metrics and graphs, helper scripts) and runs
//! the setup pipeline that fills in the metrics a concrete installation
//! actually exposes:
//!
//! 1. base initialization: reset the available bundles, validate config
//! 2. path resolution: find the install root, prompting if needed
//! 3. metric discovery: run the helper scripts and collect their metrics
//!
//! The first failing step ends the pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

use crate::catalog::{self, Graph, NAD_BUNDLE};
use crate::config::{validate_effective_config, Config};
use crate::discovery::{discover_metrics, DiscoveryOptions, MetricCollection, ScriptMapping, SCRIPTS};
use crate::error::DiscoveryError;
use crate::path_resolver::resolve_nad_path;
use crate::prompt::Prompt;

/// Port the agent listens on.
pub const NAD_PORT: u16 = 2609;

/// Metrics available in one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMetrics {
    pub metrics: MetricCollection,
}

/// Bundles keyed by name.
pub type CheckBundles = BTreeMap<String, BundleMetrics>;

/// Where the remote side polls a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    pub url: String,
    pub port: u16,
}

/// Steps of [`NadComponent::initialize`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Base,
    ResolvePath,
    DiscoverMetrics,
}

impl SetupStep {
    pub const ALL: [SetupStep; 3] = [
        SetupStep::Base,
        SetupStep::ResolvePath,
        SetupStep::DiscoverMetrics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SetupStep::Base => "base",
            SetupStep::ResolvePath => "resolve_path",
            SetupStep::DiscoverMetrics => "discover_metrics",
        }
    }
}

pub struct NadComponent {
    config: Config,
    scripts: &'static [ScriptMapping],
    available_check_bundles: CheckBundles,
}

impl NadComponent {
    pub const CHECK_TYPE: &'static str = "json";
    pub const DISPLAY_NAME: &'static str = "Node.js Agent";
    pub const DESCRIPTION: &'static str =
        "CPU, disk, memory, and network metrics via Node.js Agent for freebsd";
    pub const IS_DEFAULT: bool = false;

    pub fn new(config: Config) -> Self {
        Self::with_scripts(config, SCRIPTS)
    }

    /// Same as [`NadComponent::new`] with a different script list.
    pub fn with_scripts(config: Config, scripts: &'static [ScriptMapping]) -> Self {
        Self {
            config,
            scripts,
            available_check_bundles: CheckBundles::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scripts(&self) -> &[ScriptMapping] {
        self.scripts
    }

    pub fn default_metrics(&self) -> BTreeMap<String, Vec<String>> {
        catalog::default_metrics()
    }

    pub fn default_graphs(&self) -> Vec<Graph> {
        catalog::default_graphs()
    }

    /// Bundles discovered by the last successful [`NadComponent::initialize`].
    pub fn available_check_bundles(&self) -> &CheckBundles {
        &self.available_check_bundles
    }

    /// Install root in use; set by path resolution.
    pub fn nad_path(&self) -> Option<&PathBuf> {
        self.config.path.as_ref()
    }

    /// Remote polling configuration for `bundle`. Every bundle uses the same endpoint.
    pub fn bundle_config(&self, bundle: &str) -> BundleConfig {
        debug!("Bundle config requested for {}", bundle);
        BundleConfig {
            url: format!("http://{}", self.config.target()),
            port: NAD_PORT,
        }
    }

    /// Runs the setup pipeline.
    pub async fn initialize<P: Prompt>(&mut self, prompt: &mut P) -> Result<(), DiscoveryError> {
        for step in SetupStep::ALL {
            let span = info_span!("setup", step = step.name());
            match step {
                SetupStep::Base => span.in_scope(|| self.base_initialize())?,
                // Prompts are synchronous and may block this thread on
                // operator input; no other task is in flight at this step.
                SetupStep::ResolvePath => span.in_scope(|| self.resolve_path(prompt))?,
                SetupStep::DiscoverMetrics => self.discover().instrument(span).await?,
            }
        }

        info!(
            "{} initialized with {} discovered metrics",
            Self::DISPLAY_NAME,
            self.available_check_bundles
                .get(NAD_BUNDLE)
                .map_or(0, |b| b.metrics.len())
        );
        Ok(())
    }

    fn base_initialize(&mut self) -> Result<(), DiscoveryError> {
        validate_effective_config(&self.config).map_err(DiscoveryError::Config)?;

        self.available_check_bundles.clear();
        self.available_check_bundles
            .insert(NAD_BUNDLE.to_string(), BundleMetrics::default());
        Ok(())
    }

    fn resolve_path<P: Prompt>(&mut self, prompt: &mut P) -> Result<(), DiscoveryError> {
        let path = resolve_nad_path(self.config.path.as_deref(), prompt)?;
        self.config.path = Some(path);
        Ok(())
    }

    async fn discover(&mut self) -> Result<(), DiscoveryError> {
        let Some(path) = self.config.path.clone() else {
            return Err(DiscoveryError::PathResolution {
                path: PathBuf::new(),
                reason: "install path was not resolved".to_string(),
            });
        };

        let options = DiscoveryOptions {
            script_timeout: self.config.script_timeout(),
        };
        let metrics = discover_metrics(&path, self.scripts, &options).await?;

        self.available_check_bundles
            .insert(NAD_BUNDLE.to_string(), BundleMetrics { metrics });
        Ok(())
    }
}
