//! List rules command implementation.

use anyhow::Result;
use class_lint_rules::{all_rules, Preset, Role, Vocabulary};

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let vocabulary = Vocabulary::magento()?;

    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules(&vocabulary) {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        let default_marker = if preset == Preset::default() {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<12} - {}{}",
            preset.as_str(),
            preset.rule_names().join(", "),
            default_marker
        );
    }
    println!("  (strict does not exempt observers from restricted-dependency)");

    println!("\nRoles accepted by `allowed_roles`:");
    for role in Role::ALL {
        println!("  {role}");
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  class-lint check --rules handler-capability");
    println!("  class-lint check --rules CL001,CL002");

    Ok(())
}
