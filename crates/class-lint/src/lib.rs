//! # class-lint
//!
//! Class-conformance linter over class metadata snapshots.
//!
//! This is the facade crate that re-exports the core engine and the built-in rules.
//!
//! ## `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! class-lint = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! #[test]
//! fn classes_conform() {
//!     class_lint::Check::new()
//!         .snapshot("var/class-metadata.json")
//!         .run();
//! }
//! ```
//!
//! The check reads `class-lint.toml` from the workspace root and panics with a
//! report when findings at or above `fail_on` exist.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use class_lint::{Analyzer, ClassIndex};
//! use class_lint::rules::{recommended_rules, Vocabulary};
//!
//! let index = ClassIndex::from_path("snapshot.json".as_ref())?;
//! let mut builder = Analyzer::builder();
//! for rule in recommended_rules(&Vocabulary::magento()?) {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder.build()?.analyze(&index);
//! ```

#![forbid(unsafe_code)]

pub use class_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use class_lint_rules::*;
}

mod runner;

pub use runner::Check;
