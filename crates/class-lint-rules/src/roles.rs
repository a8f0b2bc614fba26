//! Architectural role classification.
//!
//! A role is a structural predicate over a resolved class: "is a request
//! handler", "intercepts presentation surfaces", and so on. A class may play
//! several roles at once.

use class_lint_core::{ClassModel, ClassName, ClassResolver, ParameterClass};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vocabulary::Vocabulary;

/// Architectural roles recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Strict subtype of the handler capability.
    Handler,
    /// Subtype of the presentation-surface capability.
    PresentationSurface,
    /// Subtype of the UI data-provider capability.
    DataBoundSurface,
    /// The document type or a subtype of it.
    StructuredDocument,
    /// Has a public hook method taking a handler as first parameter.
    HandlerInterceptor,
    /// Has a public hook method taking a presentation surface as first parameter.
    SurfaceInterceptor,
    /// Subtype of the layout-processor capability.
    LayoutTransform,
    /// Subtype of the view-model marker capability.
    ViewModel,
    /// Subtype of the event-observer capability.
    Observer,
}

impl Role {
    /// Every role, in allow-list order.
    pub const ALL: [Self; 9] = [
        Self::Handler,
        Self::PresentationSurface,
        Self::DataBoundSurface,
        Self::StructuredDocument,
        Self::HandlerInterceptor,
        Self::SurfaceInterceptor,
        Self::LayoutTransform,
        Self::ViewModel,
        Self::Observer,
    ];

    /// Kebab-case name as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Handler => "handler",
            Self::PresentationSurface => "presentation-surface",
            Self::DataBoundSurface => "data-bound-surface",
            Self::StructuredDocument => "structured-document",
            Self::HandlerInterceptor => "handler-interceptor",
            Self::SurfaceInterceptor => "surface-interceptor",
            Self::LayoutTransform => "layout-transform",
            Self::ViewModel => "view-model",
            Self::Observer => "observer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Error for an unrecognized role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

/// Decides which roles a class plays against a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    vocabulary: Vocabulary,
}

impl RoleClassifier {
    /// Creates a classifier over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary in use.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Whether `class` plays `role`.
    ///
    /// Only the interceptor roles consult the resolver.
    #[must_use]
    pub fn plays(&self, class: &ClassModel, role: Role, resolver: &dyn ClassResolver) -> bool {
        let v = &self.vocabulary;
        match role {
            Role::Handler => class.is_subtype_of(&v.handler),
            Role::PresentationSurface => class.is_subtype_of(&v.presentation_surface),
            Role::DataBoundSurface => class.is_subtype_of(&v.data_provider),
            Role::StructuredDocument => class.is_or_extends(&v.document),
            Role::HandlerInterceptor => self.intercepts(class, &v.handler, resolver),
            Role::SurfaceInterceptor => self.intercepts(class, &v.presentation_surface, resolver),
            Role::LayoutTransform => class.is_subtype_of(&v.layout_processor),
            Role::ViewModel => class.is_subtype_of(&v.view_model),
            Role::Observer => class.is_subtype_of(&v.observer),
        }
    }

    /// All roles `class` plays, in allow-list order.
    #[must_use]
    pub fn roles(&self, class: &ClassModel, resolver: &dyn ClassResolver) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.plays(class, *role, resolver))
            .collect()
    }

    /// Whether `class` plays any of `roles`, stopping at the first hit.
    #[must_use]
    pub fn plays_any(
        &self,
        class: &ClassModel,
        roles: &[Role],
        resolver: &dyn ClassResolver,
    ) -> bool {
        roles.iter().any(|role| self.plays(class, *role, resolver))
    }

    /// Whether a public hook method's first parameter is `target` or a subtype.
    ///
    /// Methods without parameters and parameters that do not resolve to a
    /// class are skipped; the scan continues.
    fn intercepts(
        &self,
        class: &ClassModel,
        target: &ClassName,
        resolver: &dyn ClassResolver,
    ) -> bool {
        class
            .public_methods()
            .iter()
            .filter(|method| self.vocabulary.interception_hook.is_match(&method.name))
            .any(|method| {
                let Some(ty) = method.first_parameter.type_ref() else {
                    return false;
                };
                match resolver.resolve_parameter_type(ty) {
                    ParameterClass::Class(subject) => subject.is_or_extends(target),
                    ParameterClass::NoClass => {
                        debug!("{}::{}: first parameter skipped", class.name(), method.name);
                        false
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use class_lint_core::ClassIndex;

    const FRAMEWORK: &str = r#"{"classes": [
        {"name": "Magento\\Framework\\App\\ActionInterface", "kind": "interface"},
        {"name": "Magento\\Framework\\View\\Element\\BlockInterface", "kind": "interface"},
        {"name": "Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\DataProviderInterface", "kind": "interface"},
        {"name": "Magento\\Checkout\\Block\\Checkout\\LayoutProcessorInterface", "kind": "interface"},
        {"name": "Magento\\Framework\\View\\Element\\Block\\ArgumentInterface", "kind": "interface"},
        {"name": "Magento\\Framework\\Event\\ObserverInterface", "kind": "interface"},
        {"name": "Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\Document"},
        {"name": "Magento\\Framework\\View\\Element\\Template", "implements": ["Magento\\Framework\\View\\Element\\BlockInterface"]},
        {"name": "Magento\\Framework\\App\\Action\\Action", "abstract": true, "implements": ["Magento\\Framework\\App\\ActionInterface"]},

        {"name": "Vendor\\Controller\\Index", "extends": "Magento\\Framework\\App\\Action\\Action"},
        {"name": "Vendor\\Block\\Banner", "extends": "Magento\\Framework\\View\\Element\\Template"},
        {"name": "Vendor\\Ui\\Document", "extends": "Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\Document"},
        {"name": "Vendor\\Observer\\Flush", "implements": ["Magento\\Framework\\Event\\ObserverInterface"]},
        {"name": "Vendor\\ViewModel\\Cart", "implements": ["Magento\\Framework\\View\\Element\\Block\\ArgumentInterface"]},
        {"name": "Vendor\\Plugin\\ActionPlugin", "methods": [
            {"name": "beforeDispatch"},
            {"name": "aroundExecute", "parameters": [{"name": "subject", "type": "int|string"}]},
            {"name": "afterExecute", "parameters": [{"name": "subject", "type": "Generated\\Missing"}]},
            {"name": "AROUNDDispatch", "parameters": [{"name": "subject", "type": "\\Vendor\\Controller\\Index"}]}
        ]},
        {"name": "Vendor\\Plugin\\BlockPlugin", "methods": [
            {"name": "afterToHtml", "parameters": [{"name": "subject", "type": "Magento\\Framework\\View\\Element\\BlockInterface"}]},
            {"name": "before", "parameters": [{"name": "subject", "type": "Magento\\Framework\\App\\ActionInterface"}]},
            {"name": "beforeHidden", "visibility": "protected", "parameters": [{"name": "subject", "type": "Magento\\Framework\\App\\ActionInterface"}]}
        ]},
        {"name": "Vendor\\Plugin\\OptionalSubjectPlugin", "methods": [
            {"name": "beforeExecute", "parameters": [{"name": "subject", "type": "Magento\\Framework\\App\\ActionInterface|null"}]}
        ]},
        {"name": "Vendor\\Model\\Plain", "methods": [
            {"name": "execute", "parameters": [{"name": "action", "type": "Magento\\Framework\\App\\ActionInterface"}]}
        ]}
    ]}"#;

    fn setup() -> (ClassIndex, RoleClassifier) {
        let index = ClassIndex::from_json(FRAMEWORK).unwrap();
        let classifier = RoleClassifier::new(Vocabulary::magento().unwrap());
        (index, classifier)
    }

    fn roles_of(fqn: &str) -> Vec<Role> {
        let (index, classifier) = setup();
        let class = index.resolve_class(&ClassName::new(fqn).unwrap()).unwrap();
        classifier.roles(&class, &index)
    }

    #[test]
    fn handler_through_abstract_parent() {
        assert_eq!(roles_of("Vendor\\Controller\\Index"), vec![Role::Handler]);
    }

    #[test]
    fn handler_capability_itself_is_not_a_handler() {
        assert!(roles_of("Magento\\Framework\\App\\ActionInterface").is_empty());
    }

    #[test]
    fn document_includes_itself() {
        assert_eq!(
            roles_of("Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\Document"),
            vec![Role::StructuredDocument]
        );
        assert_eq!(roles_of("Vendor\\Ui\\Document"), vec![Role::StructuredDocument]);
    }

    #[test]
    fn capability_roles() {
        assert_eq!(roles_of("Vendor\\Block\\Banner"), vec![Role::PresentationSurface]);
        assert_eq!(roles_of("Vendor\\Observer\\Flush"), vec![Role::Observer]);
        assert_eq!(roles_of("Vendor\\ViewModel\\Cart"), vec![Role::ViewModel]);
    }

    #[test]
    fn handler_interceptor_skips_unusable_methods() {
        // Zero parameters, union, and unresolvable first parameters are skipped;
        // the scan still reaches the last hook.
        assert_eq!(
            roles_of("Vendor\\Plugin\\ActionPlugin"),
            vec![Role::HandlerInterceptor]
        );
    }

    #[test]
    fn null_union_subject_still_intercepts() {
        assert_eq!(
            roles_of("Vendor\\Plugin\\OptionalSubjectPlugin"),
            vec![Role::HandlerInterceptor]
        );
    }

    #[test]
    fn surface_interceptor_needs_a_suffix_and_public_visibility() {
        assert_eq!(
            roles_of("Vendor\\Plugin\\BlockPlugin"),
            vec![Role::SurfaceInterceptor]
        );
    }

    #[test]
    fn non_hook_method_does_not_intercept() {
        assert!(roles_of("Vendor\\Model\\Plain").is_empty());
    }

    #[test]
    fn plays_any_short_circuits_on_first_match() {
        let (index, classifier) = setup();
        let class = index
            .resolve_class(&ClassName::new("Vendor\\Block\\Banner").unwrap())
            .unwrap();
        assert!(classifier.plays_any(&class, &Role::ALL, &index));
        assert!(!classifier.plays_any(&class, &[Role::Handler, Role::Observer], &index));
        assert!(!classifier.plays_any(&class, &[], &index));
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(
            "controller".parse::<Role>(),
            Err(UnknownRole("controller".to_string()))
        );
    }
}
