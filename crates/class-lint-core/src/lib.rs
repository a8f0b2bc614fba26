//! # class-lint-core
//!
//! Core framework for class-metadata architecture linting.
//!
//! Rules inspect resolved class structure (hierarchy, constructor
//! dependencies, public methods) rather than source text. This crate provides:
//!
//! - [`ClassName`], [`TypeRef`] and [`ClassModel`] for class structure
//! - [`ClassResolver`] and its snapshot-backed implementation [`ClassIndex`]
//! - [`ClassRule`] trait for per-class rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`], [`Finding`] and [`LintResult`] for reporting
//!
//! ## Example
//!
//! ```ignore
//! use class_lint_core::{Analyzer, ClassIndex};
//!
//! let index = ClassIndex::from_path("var/class-snapshot.json".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .exclude("**\\Test\\**")
//!     .build()?;
//!
//! let result = analyzer.analyze(&index);
//! println!("{}", result.format_test_report(Severity::Error));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod filter;
mod index;
mod model;
mod name;
mod resolve;
mod rule;
mod type_ref;
mod types;

/// Snapshot format and loading.
pub mod snapshot;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use filter::{NamespaceFilter, NamespacePattern};
pub use index::ClassIndex;
pub use model::{ClassKind, ClassModel, ClassModelBuilder, FirstParameter, Method};
pub use name::{ClassName, NameError, NAMESPACE_SEPARATOR};
pub use resolve::{ClassResolver, ParameterClass, ResolveError};
pub use rule::{ClassRule, RuleBox};
pub use snapshot::{ClassDescriptor, SnapshotError};
pub use type_ref::{TypeError, TypeRef};
pub use types::{Finding, LintResult, Location, Severity, UnknownSeverity, Violation};
