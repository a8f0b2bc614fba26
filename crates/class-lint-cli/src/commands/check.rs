//! Check command implementation.

use anyhow::{Context, Result};
use class_lint_core::Analyzer;
use class_lint_rules::configured_rules;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    preset: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if preset.is_some() {
        config.preset = preset;
    }
    let fail_on = config.fail_on();

    let index = match super::snapshots::load_index(paths) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    // Select rules: explicit filter wins over the preset
    let selection: Option<Vec<String>> = rules_filter.map(|filter| {
        filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    });
    let rules =
        configured_rules(&config, selection.as_deref()).context("Failed to set up rules")?;

    // Build analyzer
    let mut builder = Analyzer::builder().config(config).excludes(exclude);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} declarations with {} rules",
        index.len(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze(&index);

    // Output results
    super::output::print(&result, format)?;

    // Exit with error code if findings reach the threshold
    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
