//! Integration test: built-in rules over a Magento-shaped snapshot.
//!
//! Uses `tests/fixtures/magento.json`, a small module with controllers,
//! blocks, plugins, observers and models around the framework interfaces.

use class_lint_core::{Analyzer, ClassIndex, Config, LintResult};
use class_lint_rules::configured_rules;
use std::path::PathBuf;

fn fixture_index() -> ClassIndex {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/magento.json");
    ClassIndex::from_path(&path).expect("fixture snapshot should load")
}

fn run(toml: &str) -> LintResult {
    let config = Config::parse(toml).expect("config should parse");
    let rules = configured_rules(&config, None).expect("rules should build");

    let mut builder = Analyzer::builder().config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build().expect("analyzer should build");
    analyzer.analyze(&fixture_index())
}

fn summary(result: &LintResult) -> String {
    result
        .findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Recommended preset ──

#[test]
fn recommended_preset_findings() {
    let result = run("");

    assert_eq!(result.classes_checked, 14);
    assert_eq!(result.classes_skipped, 1);

    insta::assert_snapshot!(summary(&result), @r"
    app/code/Vendor/Checkout/Controller/Cart/Add.php:12: error [CL001] The class Vendor\Checkout\Controller\Cart\Add does not restrict processed HTTP methods by implementing a Http*Method*ActionInterface
    app/code/Vendor/Checkout/Model/CartRepository.php:20: error [CL002] The class Vendor\Checkout\Model\CartRepository uses sessions or cookies while not being a part of HTML Presentation layer
    app/code/Vendor/Checkout/Plugin/NotAPlugin.php: error [CL002] The class Vendor\Checkout\Plugin\NotAPlugin uses sessions or cookies while not being a part of HTML Presentation layer
    ");
}

#[test]
fn restricted_dependency_reports_matched_capability() {
    let result = run("");
    let capabilities: Vec<&str> = result
        .findings
        .iter()
        .filter(|f| f.violation.code == "CL002")
        .map(|f| f.violation.args[1].as_str())
        .collect();
    assert_eq!(
        capabilities,
        vec![
            "Magento\\Framework\\Session\\SessionManagerInterface",
            "Magento\\Framework\\Stdlib\\Cookie\\CookieReaderInterface",
        ]
    );
}

// ── Other presets and configuration ──

#[test]
fn strict_preset_drops_observer_exemption() {
    let result = run("preset = \"strict\"\n");
    let subjects: Vec<String> = result
        .findings
        .iter()
        .map(|f| f.violation.subject.to_string())
        .collect();
    assert!(subjects.contains(&"Vendor\\Checkout\\Observer\\ClearCart".to_string()));
    assert_eq!(result.findings.len(), 4);
}

#[test]
fn minimal_preset_only_checks_handlers() {
    let result = run("preset = \"minimal\"\n");
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].violation.rule, "handler-capability");
}

#[test]
fn severity_override_and_namespace_filter() {
    let result = run(
        r#"
[analyzer]
exclude = ['Vendor\Checkout\Plugin\**']

[rules.restricted-dependency]
severity = "warning"
"#,
    );

    assert_eq!(result.findings.len(), 2);
    assert!(result.has_errors());
    assert_eq!(result.by_severity(class_lint_core::Severity::Warning).len(), 1);
}

#[test]
fn narrowed_allow_list_flags_presentation_classes() {
    let result = run(
        r#"
[rules.restricted-dependency]
allowed_roles = ["handler"]
"#,
    );

    let subjects: Vec<String> = result
        .findings
        .iter()
        .filter(|f| f.violation.code == "CL002")
        .map(|f| f.violation.subject.to_string())
        .collect();
    assert_eq!(
        subjects,
        vec![
            "Vendor\\Checkout\\Block\\Summary",
            "Vendor\\Checkout\\Model\\CartRepository",
            "Vendor\\Checkout\\Observer\\ClearCart",
            "Vendor\\Checkout\\Plugin\\NotAPlugin",
            "Vendor\\Checkout\\Plugin\\RememberLastAction",
        ]
    );
}
