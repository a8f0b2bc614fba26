//! Runner for `cargo test` integration.

use class_lint_core::{Analyzer, ClassIndex, Config, LintResult, Severity};
use class_lint_rules::configured_rules;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["class-lint.toml", ".class-lint.toml"];

/// A lint run over snapshot files, meant to be called from a test.
///
/// Relative paths are resolved against the workspace root.
#[derive(Debug, Clone, Default)]
pub struct Check {
    snapshots: Vec<PathBuf>,
    preset: Option<String>,
    config: Option<PathBuf>,
    fail_on: Option<Severity>,
    root: Option<PathBuf>,
}

impl Check {
    /// Creates an empty check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot file.
    #[must_use]
    pub fn snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshots.push(path.into());
        self
    }

    /// Overrides the preset from the configuration file.
    #[must_use]
    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Uses this configuration file instead of searching for one.
    #[must_use]
    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Overrides `fail_on` from the configuration file.
    #[must_use]
    pub fn fail_on(mut self, severity: Severity) -> Self {
        self.fail_on = Some(severity);
        self
    }

    /// Resolves relative paths against `root` instead of the workspace root.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Runs the analysis and returns the result without judging it.
    ///
    /// # Panics
    ///
    /// Panics if the configuration or a snapshot cannot be loaded.
    #[must_use]
    pub fn analyze(&self) -> LintResult {
        self.prepare().1
    }

    /// Runs the analysis.
    ///
    /// # Panics
    ///
    /// Panics with a formatted report if findings at or above the effective
    /// `fail_on` severity exist, or if setup fails.
    pub fn run(&self) {
        let (fail_on, result) = self.prepare();
        if result.has_violations_at(fail_on) {
            panic!("{}", result.format_test_report(fail_on));
        }
    }

    fn prepare(&self) -> (Severity, LintResult) {
        let root = self.root.clone().unwrap_or_else(find_project_root);
        let mut config = load_config(&root, self.config.as_deref());
        if let Some(preset) = &self.preset {
            config.preset = Some(preset.clone());
        }
        let fail_on = self.fail_on.unwrap_or_else(|| config.fail_on());

        if self.snapshots.is_empty() {
            panic!("class-lint: no snapshot given");
        }
        let index = load_index(&root, &self.snapshots);

        let rules = configured_rules(&config, None)
            .unwrap_or_else(|e| panic!("class-lint: failed to set up rules: {e}"));
        let mut builder = Analyzer::builder().config(config);
        for rule in rules {
            builder = builder.rule_box(rule);
        }
        let analyzer = builder
            .build()
            .unwrap_or_else(|e| panic!("class-lint: failed to build analyzer: {e}"));

        (fail_on, analyzer.analyze(&index))
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Merges every snapshot into one index.
fn load_index(root: &Path, snapshots: &[PathBuf]) -> ClassIndex {
    let mut index = ClassIndex::new();
    for snapshot in snapshots {
        let path = resolve(root, snapshot);
        let part = ClassIndex::from_path(&path)
            .unwrap_or_else(|e| panic!("class-lint: {}: {e}", path.display()));
        index
            .merge(part)
            .unwrap_or_else(|e| panic!("class-lint: {}: {e}", path.display()));
    }
    index
}

/// Reads the explicit config, else the first candidate in `root`, else defaults.
fn load_config(root: &Path, explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => Some(resolve(root, path)),
        None => CONFIG_CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file()),
    };

    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            panic!(
                "class-lint: failed to load config from {}: {e}",
                path.display()
            )
        }),
        None => Config::default(),
    }
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // Not inside a workspace
        return manifest_path;
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    #[test]
    fn project_root_is_the_workspace() {
        let root = find_project_root();
        assert!(root.join("crates").is_dir());
        assert!(has_workspace_section(&root.join("Cargo.toml")));
    }

    #[test]
    fn member_manifest_has_no_workspace_section() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert!(!has_workspace_section(&manifest));
    }

    #[test]
    fn explicit_config_is_relative_to_root() {
        let config = load_config(&fixtures(), Some(Path::new("strict.toml")));
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on(), Severity::Warning);
    }

    #[test]
    fn missing_config_means_defaults() {
        let config = load_config(&fixtures().join("no-such-dir"), None);
        assert!(config.preset.is_none());
        assert_eq!(config.fail_on(), Severity::Error);
    }

    #[test]
    #[should_panic(expected = "failed to load config")]
    fn missing_explicit_config_panics() {
        let _ = load_config(&fixtures(), Some(Path::new("absent.toml")));
    }

    #[test]
    #[should_panic(expected = "no snapshot given")]
    fn check_without_snapshot_panics() {
        Check::new().root(fixtures()).run();
    }
}
