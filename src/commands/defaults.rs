//! Defaults command implementation.
//!
//! Prints the default metric selection and graph definitions.

use std::collections::BTreeMap;

use nad_component::{Config, Graph, NadComponent};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::render;

#[derive(Serialize)]
struct DefaultsReport {
    display_name: &'static str,
    description: &'static str,
    metrics: BTreeMap<String, Vec<String>>,
    graphs: Vec<Graph>,
}

/// Prints the component's default metrics and graphs.
pub fn command_defaults(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let component = NadComponent::new(config.clone());
    let report = DefaultsReport {
        display_name: NadComponent::DISPLAY_NAME,
        description: NadComponent::DESCRIPTION,
        metrics: component.default_metrics(),
        graphs: component.default_graphs(),
    };

    println!("{}", render(&report, format)?);
    Ok(())
}
