//! Rule confining session and cookie access to the HTML presentation layer.
//!
//! # Rationale
//!
//! Sessions and cookies belong to a single HTTP request. Services, models
//! and repositories that depend on them become unusable from CLI commands,
//! cron jobs, queues and APIs, and break full-page caching.
//!
//! # Detected Patterns
//!
//! - A constructor parameter typed as a restricted capability (session
//!   manager, cookie reader) or one of its subtypes, in a class that plays
//!   none of the allowed roles
//!
//! # Configuration
//!
//! - `restricted`: additional restricted capabilities (fully-qualified names)
//! - `allowed_roles`: replaces the default allow-list (every [`Role`])

use class_lint_core::{
    ClassModel, ClassName, ClassResolver, ClassRule, ConfigError, ParameterClass, RuleConfig,
    Severity, Violation,
};
use tracing::debug;

use crate::roles::{Role, RoleClassifier};
use crate::vocabulary::Vocabulary;

/// Rule code for restricted-dependency.
pub const CODE: &str = "CL002";

/// Rule name for restricted-dependency.
pub const NAME: &str = "restricted-dependency";

/// Message template; `{0}` is the offending class, `{1}` the capability.
pub const MESSAGE: &str =
    "The class {0} uses sessions or cookies while not being a part of HTML Presentation layer";

/// Forbids restricted dependencies outside allowed roles.
#[derive(Debug, Clone)]
pub struct RestrictedDependency {
    classifier: RoleClassifier,
    restricted: Vec<ClassName>,
    allowed_roles: Vec<Role>,
    /// Custom severity.
    pub severity: Severity,
}

impl RestrictedDependency {
    /// Creates the rule over `vocabulary`, allowing every role.
    #[must_use]
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            restricted: vocabulary.restricted_capabilities(),
            classifier: RoleClassifier::new(vocabulary.clone()),
            allowed_roles: Role::ALL.to_vec(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule with the framework's own allow-list, which does not
    /// exempt event observers.
    #[must_use]
    pub fn strict(vocabulary: &Vocabulary) -> Self {
        Self::new(vocabulary).allowed_roles(
            Role::ALL
                .into_iter()
                .filter(|role| *role != Role::Observer)
                .collect(),
        )
    }

    /// Creates the rule from a `[rules.restricted-dependency]` block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for malformed names or roles.
    pub fn from_config(vocabulary: &Vocabulary, config: &RuleConfig) -> Result<Self, ConfigError> {
        Self::new(vocabulary).configure(config)
    }

    /// Applies rule options on top of the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for malformed names or roles.
    pub fn configure(mut self, config: &RuleConfig) -> Result<Self, ConfigError> {
        if let Some(extra) = config.try_option::<Vec<String>>(NAME, "restricted")? {
            for raw in extra {
                let name = ClassName::new(&raw).map_err(|e| ConfigError::InvalidOption {
                    rule: NAME.to_string(),
                    key: "restricted".to_string(),
                    message: format!("`{raw}`: {e}"),
                })?;
                self = self.restrict(name);
            }
        }
        if let Some(roles) = config.try_option::<Vec<Role>>(NAME, "allowed_roles")? {
            self = self.allowed_roles(roles);
        }
        Ok(self)
    }

    /// Adds a restricted capability.
    #[must_use]
    pub fn restrict(mut self, capability: ClassName) -> Self {
        if !self.restricted.contains(&capability) {
            self.restricted.push(capability);
        }
        self
    }

    /// Replaces the allow-list.
    #[must_use]
    pub fn allowed_roles(mut self, roles: Vec<Role>) -> Self {
        self.allowed_roles = roles;
        self
    }

    /// Sets the default severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The first restricted capability a constructor parameter depends on.
    ///
    /// Parameters that do not resolve to a class are skipped.
    fn restricted_dependency(
        &self,
        class: &ClassModel,
        resolver: &dyn ClassResolver,
    ) -> Option<&ClassName> {
        class
            .constructor_parameters()
            .iter()
            .flatten()
            .find_map(|ty| match resolver.resolve_parameter_type(ty) {
                ParameterClass::Class(dependency) => self
                    .restricted
                    .iter()
                    .find(|capability| dependency.is_or_extends(capability)),
                ParameterClass::NoClass => None,
            })
    }
}

impl ClassRule for RestrictedDependency {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Confines session and cookie dependencies to the HTML presentation layer"
    }

    fn message_template(&self) -> &'static str {
        MESSAGE
    }

    fn help(&self) -> Option<&'static str> {
        Some("pass the needed values in from a controller, block, view model or plugin instead")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, class: &ClassModel, resolver: &dyn ClassResolver) -> Option<Violation> {
        let capability = self.restricted_dependency(class, resolver)?;

        if self
            .classifier
            .plays_any(class, &self.allowed_roles, resolver)
        {
            debug!("{} may depend on {}", class.name(), capability);
            return None;
        }

        Some(Violation::new(CODE, NAME, class.name()).with_arg(capability.to_string()))
    }
}
