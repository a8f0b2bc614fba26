//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# class-lint configuration

# Rule preset: recommended (default), strict, minimal
preset = "recommended"

# Exit with status 1 when findings at or above this severity exist
fail_on = "error"

[analyzer]
# Namespace globs over fully-qualified class names (case-insensitive)
# include = ['Vendor\**']
exclude = [
    '**\Test\**',
    '**\Generated\**',
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.handler-capability]
enabled = true

[rules.restricted-dependency]
enabled = true
# severity = "warning"
# Additional restricted capabilities
# restricted = ['Vendor\Session\StorageInterface']
# Roles allowed to depend on sessions and cookies (default: all)
# allowed_roles = ["handler", "presentation-surface", "view-model"]

# Capability identities (defaults target Magento 2)
# [vocabulary]
# handler = 'Magento\Framework\App\ActionInterface'
# handler_refinement = '(?i)(^|\\)Http[a-z]+ActionInterface$'
# interception_hook = '(?i)^(after|around|before).+'
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("class-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created class-lint.toml");
    println!("\nNext steps:");
    println!("  1. Export a class metadata snapshot (JSON) from your application");
    println!("  2. Edit class-lint.toml to configure rules");
    println!("  3. Run: class-lint check path/to/snapshot.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use class_lint_core::Config;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.analyzer.exclude.len(), 2);
        assert!(config.vocabulary.is_none());
        assert!(class_lint_rules::configured_rules(&config, None).is_ok());
    }
}
