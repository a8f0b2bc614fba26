//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod roles;
pub mod snapshots;

use anyhow::Result;
use class_lint_core::Config;
use std::path::Path;

use crate::config_resolver::ConfigLocator;

/// Loads the configuration for the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (config, source) = ConfigLocator::new(Path::new("."), explicit).load()?;
    tracing::debug!("Configuration source: {:?}", source);
    Ok(config)
}
