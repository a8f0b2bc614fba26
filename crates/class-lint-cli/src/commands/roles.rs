//! Roles command: shows how one class resolves and which roles it plays.

use anyhow::{Context, Result};
use class_lint_core::{ClassModel, ClassName, ClassResolver, FirstParameter};
use class_lint_rules::{Role, RoleClassifier, Vocabulary};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Resolved view of one class.
#[derive(Debug, Serialize)]
struct RolesReport {
    class: String,
    kind: String,
    #[serde(rename = "abstract")]
    is_abstract: bool,
    ancestry: Vec<String>,
    interfaces: Vec<String>,
    constructor: Vec<Option<String>>,
    methods: Vec<String>,
    roles: Vec<Role>,
}

impl RolesReport {
    fn new(class: &ClassModel, roles: Vec<Role>) -> Self {
        Self {
            class: class.name().to_string(),
            kind: class.kind().to_string(),
            is_abstract: class.is_abstract(),
            ancestry: class.ancestry().iter().map(ToString::to_string).collect(),
            interfaces: class
                .implemented_interfaces()
                .iter()
                .map(ToString::to_string)
                .collect(),
            constructor: class
                .constructor_parameters()
                .iter()
                .map(|ty| ty.as_ref().map(ToString::to_string))
                .collect(),
            methods: class
                .public_methods()
                .iter()
                .map(|m| match &m.first_parameter {
                    FirstParameter::Absent => format!("{}()", m.name),
                    FirstParameter::Untyped => format!("{}(untyped)", m.name),
                    FirstParameter::Typed(ty) => format!("{}({ty})", m.name),
                })
                .collect(),
            roles,
        }
    }

    fn print_text(&self) {
        println!("{} ({})", self.class, self.kind);
        println!("  abstract: {}", self.is_abstract);
        print_list("ancestry", &self.ancestry);
        print_list("interfaces", &self.interfaces);
        let constructor: Vec<String> = self
            .constructor
            .iter()
            .map(|ty| ty.clone().unwrap_or_else(|| "(untyped)".to_string()))
            .collect();
        print_list("constructor", &constructor);
        print_list("methods", &self.methods);
        let roles: Vec<String> = self.roles.iter().map(ToString::to_string).collect();
        print_list("roles", &roles);
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("  {label}: -");
        return;
    }
    println!("  {label}:");
    for item in items {
        println!("    {item}");
    }
}

/// Runs the roles command.
pub fn run(
    path: &Path,
    class: &str,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let vocabulary = Vocabulary::from_config(config.vocabulary.as_ref())
        .context("Invalid [vocabulary] configuration")?;

    let index = match super::snapshots::load_index(&[PathBuf::from(path)]) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    let name = ClassName::new(class).with_context(|| format!("Invalid class name: {class}"))?;
    let model = match index.resolve_class(&name) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{name} is unresolvable: {e}");
            std::process::exit(1);
        }
    };

    let classifier = RoleClassifier::new(vocabulary);
    let report = RolesReport::new(&model, classifier.roles(&model, &index));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text | OutputFormat::Compact => report.print_text(),
    }

    Ok(())
}
