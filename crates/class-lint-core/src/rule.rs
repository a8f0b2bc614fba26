//! Rule trait for class-level checks.

use crate::model::ClassModel;
use crate::name::ClassName;
use crate::resolve::ClassResolver;
use crate::types::{Severity, Violation};

/// A lint rule evaluated once per resolved class.
///
/// The analyzer resolves the subject before calling [`ClassRule::check`], so
/// an unresolvable subject never reaches a rule. Anything the rule needs
/// beyond the subject (parameter types, for instance) goes through the
/// resolver, and a failure there must degrade to "fact unknown".
///
/// # Example
///
/// ```ignore
/// use class_lint_core::{ClassModel, ClassResolver, ClassRule, Violation};
///
/// pub struct NoAbstractHandlers;
///
/// impl ClassRule for NoAbstractHandlers {
///     fn name(&self) -> &'static str { "no-abstract-handlers" }
///     fn code(&self) -> &'static str { "CL900" }
///     fn message_template(&self) -> &'static str { "The class {0} is abstract" }
///
///     fn check(&self, class: &ClassModel, _: &dyn ClassResolver) -> Option<Violation> {
///         class
///             .is_abstract()
///             .then(|| Violation::new(self.code(), self.name(), class.name()))
///     }
/// }
/// ```
pub trait ClassRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "handler-capability").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Message template; `{0}` is the subject's fully-qualified name.
    fn message_template(&self) -> &'static str;

    /// Optional fix hint shown with each finding.
    fn help(&self) -> Option<&'static str> {
        None
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one class. At most one violation per class.
    fn check(&self, class: &ClassModel, resolver: &dyn ClassResolver) -> Option<Violation>;

    /// Resolves `subject` and checks it, abstaining if it cannot be resolved.
    fn evaluate(&self, subject: &ClassName, resolver: &dyn ClassResolver) -> Option<Violation> {
        match resolver.resolve_class(subject) {
            Ok(class) => self.check(&class, resolver),
            Err(e) => {
                tracing::debug!("{} abstains on {}: {}", self.name(), subject, e);
                None
            }
        }
    }
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn ClassRule>;
