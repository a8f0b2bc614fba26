//! # class-lint-rules
//!
//! Built-in class-conformance rules for class-lint.
//!
//! Rules are written against a [`Vocabulary`] of well-known capability
//! identities, so the same checks apply to any framework that exposes its
//! architectural roles as interfaces.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `handler-capability` | Requires handlers to restrict the HTTP methods they process |
//! | CL002 | `restricted-dependency` | Confines session and cookie dependencies to the presentation layer |
//!
//! ## Usage
//!
//! ```ignore
//! use class_lint_core::Analyzer;
//! use class_lint_rules::{HandlerCapability, RestrictedDependency, Vocabulary};
//!
//! let vocabulary = Vocabulary::magento()?;
//! let analyzer = Analyzer::builder()
//!     .rule(HandlerCapability::new(&vocabulary))
//!     .rule(RestrictedDependency::new(&vocabulary))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod handler_capability;
mod presets;
pub mod restricted_dependency;
mod roles;
pub mod vocabulary;

pub use handler_capability::HandlerCapability;
pub use presets::{
    all_rules, configured_rules, minimal_rules, recommended_rules, strict_rules, Preset, RULES,
    SetupError,
};
pub use restricted_dependency::RestrictedDependency;
pub use roles::{Role, RoleClassifier, UnknownRole};
pub use vocabulary::{NameMatcher, Vocabulary, VocabularyError};

/// Re-export core types for convenience.
pub use class_lint_core::{ClassRule, Severity, Violation};
