//! Class resolution contract.
//!
//! Rules never load metadata themselves. They ask a [`ClassResolver`] for a
//! [`ClassModel`] and treat every failure as "this fact is unknown":
//!
//! - [`ResolveError`] on the subject class means the rule abstains.
//! - [`ParameterClass::NoClass`] on a parameter type means "no dependency of
//!   interest" and the scan moves on.

use crate::model::ClassModel;
use crate::name::ClassName;
use crate::type_ref::TypeRef;

/// Why a class could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No metadata for the class.
    #[error("class `{0}` not found")]
    NotFound(ClassName),

    /// A superclass or interface somewhere in the hierarchy is missing.
    #[error("class `{class}` references missing ancestor `{ancestor}`")]
    MissingAncestor {
        /// The class being resolved.
        class: ClassName,
        /// The ancestor that could not be found.
        ancestor: ClassName,
    },

    /// The hierarchy loops back onto itself.
    #[error("cyclic hierarchy through `{0}`")]
    CyclicHierarchy(ClassName),

    /// A relation points at the wrong kind of type (e.g. a class implementing a class).
    #[error("`{class}` cannot {relation} `{target}`")]
    KindMismatch {
        /// The class declaring the relation.
        class: ClassName,
        /// `extend` or `implement`.
        relation: &'static str,
        /// The offending target.
        target: ClassName,
    },
}

/// Outcome of resolving a declared parameter type.
#[derive(Debug, Clone)]
pub enum ParameterClass {
    /// The type names exactly one resolvable class.
    Class(ClassModel),
    /// Builtin, union, intersection, untyped, or unresolvable.
    NoClass,
}

impl ParameterClass {
    /// Returns the resolved model, if any.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassModel> {
        match self {
            Self::Class(model) => Some(model),
            Self::NoClass => None,
        }
    }
}

/// Supplies [`ClassModel`]s on demand.
///
/// Implementations must be safe for concurrent read-only use and must not
/// cache models across calls in a way that lets one rule observe another's
/// state. Resolution is deterministic; callers never retry.
pub trait ClassResolver: Send + Sync {
    /// Resolves a class by fully-qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the class or any ancestor cannot be loaded.
    fn resolve_class(&self, name: &ClassName) -> Result<ClassModel, ResolveError>;

    /// Resolves a declared parameter type to the class it names.
    ///
    /// Never fails: anything that is not exactly one resolvable class is
    /// [`ParameterClass::NoClass`].
    fn resolve_parameter_type(&self, ty: &TypeRef) -> ParameterClass {
        let Some(name) = ty.single_class() else {
            return ParameterClass::NoClass;
        };
        match self.resolve_class(name) {
            Ok(model) => ParameterClass::Class(model),
            Err(e) => {
                tracing::debug!("Parameter type `{}` not resolvable: {}", ty, e);
                ParameterClass::NoClass
            }
        }
    }
}
