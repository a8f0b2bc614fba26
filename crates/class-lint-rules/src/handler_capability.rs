//! Rule requiring request handlers to declare the HTTP methods they accept.
//!
//! # Rationale
//!
//! A handler that only implements the generic handler capability answers
//! every HTTP method, including state-changing ones it was never meant to
//! process. Implementing at least one method-specific refinement (for
//! example `HttpGetActionInterface`) makes the accepted methods explicit.
//!
//! # Detected Patterns
//!
//! - Concrete classes implementing the handler capability, directly or
//!   through a parent, without any interface whose name matches the
//!   refinement pattern
//!
//! # Exempt
//!
//! - Abstract classes
//! - Classes that cannot be resolved (missing parent, cyclic hierarchy)

use class_lint_core::{ClassModel, ClassName, ClassResolver, ClassRule, Severity, Violation};
use tracing::debug;

use crate::vocabulary::{NameMatcher, Vocabulary};

/// Rule code for handler-capability.
pub const CODE: &str = "CL001";

/// Rule name for handler-capability.
pub const NAME: &str = "handler-capability";

/// Message template; `{0}` is the handler class.
pub const MESSAGE: &str = "The class {0} does not restrict processed HTTP methods by implementing a Http*Method*ActionInterface";

/// Requires concrete handlers to implement an HTTP-method refinement.
#[derive(Debug, Clone)]
pub struct HandlerCapability {
    handler: ClassName,
    refinement: NameMatcher,
    /// Custom severity.
    pub severity: Severity,
}

impl HandlerCapability {
    /// Creates the rule over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            handler: vocabulary.handler.clone(),
            refinement: vocabulary.handler_refinement.clone(),
            severity: Severity::Error,
        }
    }

    /// Sets the default severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl ClassRule for HandlerCapability {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires handlers to restrict the HTTP methods they process"
    }

    fn message_template(&self) -> &'static str {
        MESSAGE
    }

    fn help(&self) -> Option<&'static str> {
        Some("implement one of the Http<Method>ActionInterface interfaces, e.g. HttpGetActionInterface")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, class: &ClassModel, _resolver: &dyn ClassResolver) -> Option<Violation> {
        if class.is_abstract() {
            return None;
        }

        let interfaces = class.implemented_interfaces();
        if !interfaces.contains(&self.handler) {
            return None;
        }

        if let Some(refinement) = interfaces
            .iter()
            .find(|iface| self.refinement.is_match(iface.as_str()))
        {
            debug!("{} restricted by {}", class.name(), refinement);
            return None;
        }

        Some(Violation::new(CODE, NAME, class.name()))
    }
}
