//! Integration test: snapshot files end-to-end via `ClassIndex` and `Analyzer`.
//!
//! Uses fixture files under `tests/fixtures/snapshot/` to verify that the
//! full JSON → DTO → descriptor → index → model → rule pipeline behaves.

use class_lint_core::{
    Analyzer, ClassIndex, ClassModel, ClassName, ClassResolver, ClassRule, Config, ResolveError,
    Severity, SnapshotError, Violation,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/snapshot")
        .join(name)
}

fn load_index() -> ClassIndex {
    let mut index = ClassIndex::from_path(&fixture("framework.json")).expect("framework fixture should load");
    let module = ClassIndex::from_path(&fixture("module.json")).expect("module fixture should load");
    index.merge(module).expect("fixtures should not overlap");
    index
}

fn name(s: &str) -> ClassName {
    ClassName::new(s).unwrap()
}

/// Flags concrete classes that implement nothing beyond what they inherit.
struct NoOwnInterfaces;

impl ClassRule for NoOwnInterfaces {
    fn name(&self) -> &'static str {
        "no-own-interfaces"
    }

    fn code(&self) -> &'static str {
        "CL900"
    }

    fn message_template(&self) -> &'static str {
        "The class {0} only inherits its interfaces"
    }

    fn check(&self, class: &ClassModel, resolver: &dyn ClassResolver) -> Option<Violation> {
        if class.is_abstract() {
            return None;
        }
        let parent = class.ancestry().first()?;
        let parent = resolver.resolve_class(parent).ok()?;
        (parent.implemented_interfaces() == class.implemented_interfaces())
            .then(|| Violation::new(self.code(), self.name(), class.name()))
    }
}

// ── Resolution over merged snapshots ──

#[test]
fn merged_snapshots_resolve_across_files() {
    let index = load_index();
    assert_eq!(index.len(), 8);

    let view = index
        .resolve_class(&name("Vendor\\Blog\\Controller\\Post\\View"))
        .expect("view controller should resolve");

    assert!(view.is_subtype_of(&name("Magento\\Framework\\App\\ActionInterface")));
    assert!(view.is_subtype_of(&name("Magento\\Framework\\App\\Action\\HttpGetActionInterface")));
    assert!(view.is_or_extends(&name("Magento\\Framework\\App\\Action\\Action")));
    assert_eq!(view.constructor_parameters().len(), 1);

    let methods: Vec<&str> = view.public_methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["dispatch", "execute"]);
}

#[test]
fn missing_generated_parent_is_unresolvable() {
    let index = load_index();
    let err = index
        .resolve_class(&name("Vendor\\Blog\\Model\\Generated"))
        .unwrap_err();
    assert!(matches!(err, ResolveError::MissingAncestor { .. }));
}

// ── Error paths ──

#[test]
fn duplicate_across_snapshots_is_rejected() {
    let mut index = load_index();
    let duplicate = ClassIndex::from_path(&fixture("duplicate.json")).unwrap();
    let err = index.merge(duplicate).unwrap_err();
    assert_eq!(
        err.to_string(),
        "duplicate class `vendor\\blog\\controller\\post\\view`"
    );
}

#[test]
fn malformed_snapshot_names_the_json_path() {
    let err = ClassIndex::from_path(&fixture("malformed.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Load(_)));
    assert_eq!(
        err.to_string(),
        "classes[1].constructor[1].type: type must not be empty"
    );
}

// ── Analyzer over fixtures ──

#[test]
fn analyzer_reports_located_findings_and_skips() {
    let index = load_index();
    let config = Config::parse("[analyzer]\nexclude = ['**\\Test\\**']\n").unwrap();
    let analyzer = Analyzer::builder()
        .rule(NoOwnInterfaces)
        .config(config)
        .build()
        .expect("analyzer should build");

    let result = analyzer.analyze(&index);

    // Checked: Context, Action, View, Save. Skipped: Generated (missing parent).
    assert_eq!(result.classes_checked, 4);
    assert_eq!(result.classes_skipped, 1);
    assert_eq!(
        result.findings.len(),
        1,
        "unexpected findings: {:#?}",
        result.findings
    );

    let finding = &result.findings[0];
    assert_eq!(finding.violation.code, "CL900");
    assert_eq!(
        finding.violation.subject,
        name("Vendor\\Blog\\Controller\\Post\\Save")
    );
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(
        finding.to_string(),
        "app/code/Vendor/Blog/Controller/Post/Save.php:11: error [CL900] The class Vendor\\Blog\\Controller\\Post\\Save only inherits its interfaces"
    );
}
