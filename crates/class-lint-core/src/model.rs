//! Resolved structural view of a class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::name::ClassName;
use crate::type_ref::TypeRef;

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A (possibly abstract) class.
    Class,
    /// An interface.
    Interface,
    /// A trait.
    Trait,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Trait => write!(f, "trait"),
        }
    }
}

/// What is known about a method's first declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstParameter {
    /// The method takes no parameters.
    Absent,
    /// The first parameter has no declared type.
    Untyped,
    /// The first parameter's declared type.
    Typed(TypeRef),
}

impl FirstParameter {
    /// Returns the declared type, if the first parameter has one.
    #[must_use]
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Typed(ty) => Some(ty),
            Self::Absent | Self::Untyped => None,
        }
    }
}

/// A public method, reduced to what interception checks need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name as declared.
    pub name: String,
    /// The first parameter only.
    pub first_parameter: FirstParameter,
}

impl Method {
    /// Creates a new method view.
    #[must_use]
    pub fn new(name: impl Into<String>, first_parameter: FirstParameter) -> Self {
        Self {
            name: name.into(),
            first_parameter,
        }
    }
}

/// Immutable structural facts about one resolved class.
///
/// The interface set and ancestry are closed at construction: every
/// interface reachable through `extends`/`implements` (directly, through a
/// parent class, or through another interface) is present, so subtype
/// checks are set lookups.
#[derive(Debug, Clone)]
pub struct ClassModel {
    name: ClassName,
    kind: ClassKind,
    is_abstract: bool,
    interfaces: BTreeSet<ClassName>,
    ancestry: Vec<ClassName>,
    constructor_parameters: Vec<Option<TypeRef>>,
    public_methods: Vec<Method>,
}

impl ClassModel {
    /// Starts building a model for the given class.
    #[must_use]
    pub fn builder(name: ClassName) -> ClassModelBuilder {
        ClassModelBuilder::new(name)
    }

    /// Fully-qualified name.
    #[must_use]
    pub fn name(&self) -> &ClassName {
        &self.name
    }

    /// Declaration kind.
    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Whether the class is declared abstract. Interfaces count as abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract || self.kind != ClassKind::Class
    }

    /// Transitive closure of implemented (or, for interfaces, extended) interfaces.
    #[must_use]
    pub fn implemented_interfaces(&self) -> &BTreeSet<ClassName> {
        &self.interfaces
    }

    /// Superclass chain, nearest first.
    #[must_use]
    pub fn ancestry(&self) -> &[ClassName] {
        &self.ancestry
    }

    /// Declared constructor parameter types; `None` marks an untyped parameter.
    #[must_use]
    pub fn constructor_parameters(&self) -> &[Option<TypeRef>] {
        &self.constructor_parameters
    }

    /// Public methods, own declarations first, then inherited ones.
    #[must_use]
    pub fn public_methods(&self) -> &[Method] {
        &self.public_methods
    }

    /// Whether `self` is a strict subtype of `target`.
    ///
    /// The class itself is excluded; see [`Self::is_or_extends`].
    #[must_use]
    pub fn is_subtype_of(&self, target: &ClassName) -> bool {
        self.interfaces.contains(target) || self.ancestry.contains(target)
    }

    /// Whether `self` is `target` or a subtype of it.
    #[must_use]
    pub fn is_or_extends(&self, target: &ClassName) -> bool {
        self.name == *target || self.is_subtype_of(target)
    }
}

/// Builder for [`ClassModel`].
///
/// Used by resolvers; the builder does not compute closures, callers pass
/// already-closed sets.
#[derive(Debug)]
pub struct ClassModelBuilder {
    model: ClassModel,
}

impl ClassModelBuilder {
    /// Creates a builder for a concrete, non-abstract class with no relations.
    #[must_use]
    pub fn new(name: ClassName) -> Self {
        Self {
            model: ClassModel {
                name,
                kind: ClassKind::Class,
                is_abstract: false,
                interfaces: BTreeSet::new(),
                ancestry: Vec::new(),
                constructor_parameters: Vec::new(),
                public_methods: Vec::new(),
            },
        }
    }

    /// Sets the declaration kind.
    #[must_use]
    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.model.kind = kind;
        self
    }

    /// Sets the abstract flag.
    #[must_use]
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.model.is_abstract = is_abstract;
        self
    }

    /// Sets the closed interface set.
    #[must_use]
    pub fn interfaces(mut self, interfaces: impl IntoIterator<Item = ClassName>) -> Self {
        self.model.interfaces = interfaces.into_iter().collect();
        self
    }

    /// Sets the superclass chain, nearest first.
    #[must_use]
    pub fn ancestry(mut self, ancestry: Vec<ClassName>) -> Self {
        self.model.ancestry = ancestry;
        self
    }

    /// Sets the constructor parameter types.
    #[must_use]
    pub fn constructor_parameters(mut self, parameters: Vec<Option<TypeRef>>) -> Self {
        self.model.constructor_parameters = parameters;
        self
    }

    /// Sets the public methods.
    #[must_use]
    pub fn public_methods(mut self, methods: Vec<Method>) -> Self {
        self.model.public_methods = methods;
        self
    }

    /// Finishes the model.
    #[must_use]
    pub fn build(self) -> ClassModel {
        self.model
    }
}
