//! Discover command implementation.
//!
//! Runs the full component setup and prints the discovered bundles.

use anyhow::Context;
use nad_component::{
    BundleConfig, CheckBundles, Config, NadComponent, NonInteractive, Prompt, TerminalPrompt,
    NAD_BUNDLE,
};
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::render;

/// Field order matters for TOML: plain values before tables.
#[derive(Serialize)]
struct DiscoverReport<'a> {
    check_type: &'static str,
    path: String,
    bundles: &'a CheckBundles,
    bundle_config: BundleConfig,
}

/// Resolves the install path, discovers metrics and prints the result.
pub async fn command_discover(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    // Reads stdin with blocking I/O from inside the runtime. Only the path
    // step asks, before any helper script is spawned.
    let mut prompt: Box<dyn Prompt> = if config.interactive() {
        Box::new(TerminalPrompt::stdio())
    } else {
        Box::new(NonInteractive)
    };

    let mut component = NadComponent::new(config.clone());
    component
        .initialize(&mut prompt)
        .await
        .context("metric discovery failed")?;

    let path = component
        .nad_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    info!("Discovery finished for {}", path);

    let report = DiscoverReport {
        check_type: NadComponent::CHECK_TYPE,
        path,
        bundles: component.available_check_bundles(),
        bundle_config: component.bundle_config(NAD_BUNDLE),
    };

    println!("{}", render(&report, format)?);
    Ok(())
}
