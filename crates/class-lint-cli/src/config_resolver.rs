//! Locating and loading `class-lint.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config` (or `$CLASS_LINT_CONFIG`), trusted without an existence check
//! 2. `class-lint.toml`, then `.class-lint.toml`, in the project directory
//! 3. `config.toml` in `$CLASS_LINT_CONFIG_DIR`, else in `~/.class-lint/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use class_lint_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["class-lint.toml", ".class-lint.toml"];

/// File name inside the global config directory.
const GLOBAL_FILE: &str = "config.toml";

/// Environment variable overriding the global config directory.
const GLOBAL_DIR_ENV: &str = "CLASS_LINT_CONFIG_DIR";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The file to read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Searches for a configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    project_dir: PathBuf,
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Locator for `project_dir` using the user's global directory.
    #[must_use]
    pub fn new(project_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            explicit: explicit.map(Path::to_path_buf),
            global_dir: global_config_dir(),
        }
    }

    /// Replaces the global directory; `None` disables the global lookup.
    #[must_use]
    pub fn global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Finds the configuration source.
    #[must_use]
    pub fn locate(&self) -> ConfigSource {
        if let Some(p) = &self.explicit {
            return ConfigSource::Explicit(p.clone());
        }

        if let Some(found) = PROJECT_FILES
            .iter()
            .map(|name| self.project_dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }

        if let Some(found) = self
            .global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_FILE))
            .filter(|candidate| candidate.is_file())
        {
            tracing::debug!("Found global config: {}", found.display());
            return ConfigSource::Global(found);
        }

        ConfigSource::Default
    }

    /// Finds and parses the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the located file cannot be read or parsed.
    pub fn load(&self) -> Result<(Config, ConfigSource)> {
        let source = self.locate();
        let config = match source.path() {
            None => Config::default(),
            Some(p) => {
                if matches!(source, ConfigSource::Global(_)) {
                    tracing::info!("Using global config: {}", p.display());
                }
                Config::from_file(p)
                    .with_context(|| format!("Failed to load config: {}", p.display()))?
            }
        };
        Ok((config, source))
    }
}

/// The global config directory: `$CLASS_LINT_CONFIG_DIR`, else `~/.class-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(GLOBAL_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".class-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator(project: &Path, explicit: Option<&Path>, global: Option<&Path>) -> ConfigLocator {
        ConfigLocator::new(project, explicit).global_dir(global.map(Path::to_path_buf))
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("class-lint.toml"), "").unwrap();

        let missing = Path::new("/nonexistent/class-lint.toml");
        let source = locator(project.path(), Some(missing), None).locate();
        assert_eq!(source, ConfigSource::Explicit(missing.to_path_buf()));
    }

    #[test]
    fn plain_name_preferred_over_dot_file() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".class-lint.toml"), "").unwrap();
        assert_eq!(
            locator(project.path(), None, None).locate(),
            ConfigSource::Project(project.path().join(".class-lint.toml"))
        );

        fs::write(project.path().join("class-lint.toml"), "").unwrap();
        assert_eq!(
            locator(project.path(), None, None).locate(),
            ConfigSource::Project(project.path().join("class-lint.toml"))
        );
    }

    #[test]
    fn global_only_when_project_has_none() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        assert_eq!(
            locator(project.path(), None, Some(global.path())).locate(),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("class-lint.toml"), "").unwrap();
        assert!(matches!(
            locator(project.path(), None, Some(global.path())).locate(),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            locator(project.path(), None, Some(global.path())).locate(),
            ConfigSource::Default
        );
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn load_parses_found_file() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("class-lint.toml"),
            "preset = \"strict\"\n",
        )
        .unwrap();

        let (config, source) = locator(project.path(), None, None).load().unwrap();
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn load_reports_broken_file() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("class-lint.toml"), "preset = [").unwrap();

        let err = locator(project.path(), None, None).load().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let project = TempDir::new().unwrap();
        let (config, source) = locator(project.path(), None, None).load().unwrap();
        assert!(config.preset.is_none());
        assert_eq!(source, ConfigSource::Default);
    }
}
