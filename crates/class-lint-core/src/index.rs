//! In-memory class index over snapshot descriptors.
//!
//! [`ClassIndex`] is the reference [`ClassResolver`]: it holds declared facts
//! only and builds a fresh [`ClassModel`] on every request, closing the
//! superclass chain and the interface set at that point.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use tracing::debug;

use crate::model::{ClassKind, ClassModel, Method};
use crate::name::ClassName;
use crate::resolve::{ClassResolver, ResolveError};
use crate::snapshot::{self, ClassDescriptor, LoadError, SnapshotError, Visibility};

/// Read-only registry of class descriptors.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes: BTreeMap<ClassName, ClassDescriptor>,
}

impl ClassIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateClass`] if a name appears twice.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ClassDescriptor>,
    ) -> Result<Self, LoadError> {
        let mut index = Self::new();
        index.extend(descriptors)?;
        Ok(index)
    }

    /// Parses snapshot JSON into an index.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is malformed or has duplicates.
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Ok(Self::from_descriptors(snapshot::parse(content)?)?)
    }

    /// Reads a snapshot file into an index.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed or has duplicates.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        Ok(Self::from_descriptors(snapshot::read(path)?)?)
    }

    /// Adds descriptors, rejecting names already present.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateClass`] on the first clash.
    pub fn extend(
        &mut self,
        descriptors: impl IntoIterator<Item = ClassDescriptor>,
    ) -> Result<(), LoadError> {
        for descriptor in descriptors {
            if self.classes.contains_key(&descriptor.name) {
                return Err(LoadError::DuplicateClass(descriptor.name));
            }
            self.classes.insert(descriptor.name.clone(), descriptor);
        }
        Ok(())
    }

    /// Merges another index into this one.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateClass`] on the first clash.
    pub fn merge(&mut self, other: Self) -> Result<(), LoadError> {
        self.extend(other.classes.into_values())
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Looks up a descriptor.
    #[must_use]
    pub fn get(&self, name: &ClassName) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }

    /// All descriptors, ordered by name.
    pub fn descriptors(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.values()
    }

    /// Class declarations only (no interfaces or traits), ordered by name.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.descriptors().filter(|d| d.kind == ClassKind::Class)
    }

    /// Walks the superclass chain of `desc`, nearest first.
    fn superclass_chain<'a>(
        &'a self,
        desc: &'a ClassDescriptor,
    ) -> Result<Vec<&'a ClassDescriptor>, ResolveError> {
        let mut chain: Vec<&ClassDescriptor> = Vec::new();
        let mut current = desc;

        while let Some(parent) = current.parent() {
            if *parent == desc.name || chain.iter().any(|c| c.name == *parent) {
                return Err(ResolveError::CyclicHierarchy(parent.clone()));
            }
            let parent_desc = self.get(parent).ok_or_else(|| ResolveError::MissingAncestor {
                class: desc.name.clone(),
                ancestor: parent.clone(),
            })?;
            if parent_desc.kind != ClassKind::Class {
                return Err(ResolveError::KindMismatch {
                    class: current.name.clone(),
                    relation: "extend",
                    target: parent.clone(),
                });
            }
            chain.push(parent_desc);
            current = parent_desc;
        }

        Ok(chain)
    }

    /// Adds `iface` and every interface it extends to `closed`.
    ///
    /// `stack` holds the interfaces currently being expanded; meeting one of
    /// them again means the hierarchy is cyclic.
    fn close_interface(
        &self,
        subject: &ClassName,
        declarer: &ClassName,
        relation: &'static str,
        iface: &ClassName,
        closed: &mut BTreeSet<ClassName>,
        stack: &mut Vec<ClassName>,
    ) -> Result<(), ResolveError> {
        if stack.contains(iface) {
            return Err(ResolveError::CyclicHierarchy(iface.clone()));
        }
        if closed.contains(iface) {
            return Ok(());
        }

        let desc = self.get(iface).ok_or_else(|| ResolveError::MissingAncestor {
            class: subject.clone(),
            ancestor: iface.clone(),
        })?;
        if desc.kind != ClassKind::Interface {
            return Err(ResolveError::KindMismatch {
                class: declarer.clone(),
                relation,
                target: iface.clone(),
            });
        }

        stack.push(iface.clone());
        for parent in &desc.extends {
            self.close_interface(subject, &desc.name, "extend", parent, closed, stack)?;
        }
        stack.pop();

        closed.insert(iface.clone());
        Ok(())
    }
}

/// Collects public methods along `chain`; a redeclaration hides inherited ones.
fn public_methods(chain: &[&ClassDescriptor]) -> Vec<Method> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut methods = Vec::new();

    for desc in chain {
        for method in &desc.methods {
            if !seen.insert(method.name.to_ascii_lowercase()) {
                continue;
            }
            if method.visibility == Visibility::Public {
                methods.push(Method::new(&method.name, method.first_parameter.clone()));
            }
        }
    }

    methods
}

impl ClassResolver for ClassIndex {
    fn resolve_class(&self, name: &ClassName) -> Result<ClassModel, ResolveError> {
        let desc = self
            .get(name)
            .ok_or_else(|| ResolveError::NotFound(name.clone()))?;

        let ancestors = self.superclass_chain(desc)?;

        // Subject first, then ancestors: lookups below honor the nearest declaration.
        let chain: Vec<&ClassDescriptor> = std::iter::once(desc)
            .chain(ancestors.iter().copied())
            .collect();

        let mut interfaces = BTreeSet::new();
        match desc.kind {
            ClassKind::Interface => {
                let mut stack = vec![desc.name.clone()];
                for parent in &desc.extends {
                    self.close_interface(
                        &desc.name,
                        &desc.name,
                        "extend",
                        parent,
                        &mut interfaces,
                        &mut stack,
                    )?;
                }
            }
            ClassKind::Class | ClassKind::Trait => {
                for declarer in &chain {
                    for iface in &declarer.implements {
                        self.close_interface(
                            &desc.name,
                            &declarer.name,
                            "implement",
                            iface,
                            &mut interfaces,
                            &mut Vec::new(),
                        )?;
                    }
                }
            }
        }

        let constructor_parameters = chain
            .iter()
            .find_map(|d| d.constructor.clone())
            .unwrap_or_default();

        debug!(
            "Resolved {} ({} ancestor(s), {} interface(s))",
            desc.name,
            ancestors.len(),
            interfaces.len()
        );

        Ok(ClassModel::builder(desc.name.clone())
            .kind(desc.kind)
            .is_abstract(desc.is_abstract)
            .interfaces(interfaces)
            .ancestry(ancestors.iter().map(|d| d.name.clone()).collect())
            .constructor_parameters(constructor_parameters)
            .public_methods(public_methods(&chain))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FirstParameter;
    use crate::snapshot::DeclaredMethod;
    use crate::type_ref::TypeRef;

    fn name(s: &str) -> ClassName {
        ClassName::new(s).unwrap()
    }

    fn index(json: &str) -> ClassIndex {
        ClassIndex::from_json(json).unwrap()
    }

    const HIERARCHY: &str = r#"{"classes": [
        {"name": "App\\ActionInterface", "kind": "interface"},
        {"name": "App\\HttpGetActionInterface", "kind": "interface", "extends": ["App\\ActionInterface"]},
        {"name": "App\\AbstractAction", "abstract": true, "implements": ["App\\ActionInterface"],
         "constructor": [{"name": "context", "type": "App\\Context"}],
         "methods": [
            {"name": "dispatch", "parameters": [{"name": "request", "type": "App\\Request"}]},
            {"name": "execute"}
         ]},
        {"name": "App\\Controller\\Index", "extends": "App\\AbstractAction",
         "implements": ["App\\HttpGetActionInterface"],
         "methods": [
            {"name": "execute"},
            {"name": "helper", "visibility": "private"}
         ]}
    ]}"#;

    #[test]
    fn closes_interfaces_through_parents_and_interface_inheritance() {
        let model = index(HIERARCHY)
            .resolve_class(&name("App\\Controller\\Index"))
            .unwrap();

        let interfaces: Vec<&str> = model
            .implemented_interfaces()
            .iter()
            .map(ClassName::as_str)
            .collect();
        assert_eq!(
            interfaces,
            vec!["App\\ActionInterface", "App\\HttpGetActionInterface"]
        );
        assert_eq!(model.ancestry(), &[name("App\\AbstractAction")]);
        assert!(!model.is_abstract());
    }

    #[test]
    fn constructor_is_inherited_from_nearest_ancestor() {
        let model = index(HIERARCHY)
            .resolve_class(&name("App\\Controller\\Index"))
            .unwrap();
        assert_eq!(
            model.constructor_parameters(),
            &[Some(TypeRef::parse("App\\Context").unwrap())]
        );
    }

    #[test]
    fn public_methods_include_inherited_and_skip_private() {
        let model = index(HIERARCHY)
            .resolve_class(&name("App\\Controller\\Index"))
            .unwrap();
        let names: Vec<&str> = model.public_methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["execute", "dispatch"]);
        assert_eq!(model.public_methods()[0].first_parameter, FirstParameter::Absent);
    }

    #[test]
    fn interface_model_lists_parent_interfaces() {
        let model = index(HIERARCHY)
            .resolve_class(&name("App\\HttpGetActionInterface"))
            .unwrap();
        assert!(model.is_subtype_of(&name("App\\ActionInterface")));
        assert!(!model.is_subtype_of(&name("App\\HttpGetActionInterface")));
    }

    #[test]
    fn missing_class_is_not_found() {
        let err = index(HIERARCHY)
            .resolve_class(&name("App\\Nope"))
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound(name("App\\Nope")));
    }

    #[test]
    fn missing_parent_makes_class_unresolvable() {
        let idx = index(r#"{"classes": [{"name": "A", "extends": "Generated\\Base"}]}"#);
        let err = idx.resolve_class(&name("A")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingAncestor {
                class: name("A"),
                ancestor: name("Generated\\Base"),
            }
        );
    }

    #[test]
    fn missing_transitive_interface_makes_class_unresolvable() {
        let idx = index(
            r#"{"classes": [
                {"name": "I", "kind": "interface", "extends": ["Missing\\J"]},
                {"name": "A", "implements": ["I"]}
            ]}"#,
        );
        assert!(matches!(
            idx.resolve_class(&name("A")),
            Err(ResolveError::MissingAncestor { .. })
        ));
    }

    #[test]
    fn detects_class_cycles() {
        let idx = index(
            r#"{"classes": [
                {"name": "A", "extends": "B"},
                {"name": "B", "extends": "A"}
            ]}"#,
        );
        assert!(matches!(
            idx.resolve_class(&name("A")),
            Err(ResolveError::CyclicHierarchy(_))
        ));
    }

    #[test]
    fn detects_interface_cycles() {
        let idx = index(
            r#"{"classes": [
                {"name": "I", "kind": "interface", "extends": ["J"]},
                {"name": "J", "kind": "interface", "extends": ["I"]},
                {"name": "A", "implements": ["I"]}
            ]}"#,
        );
        assert!(matches!(
            idx.resolve_class(&name("A")),
            Err(ResolveError::CyclicHierarchy(_))
        ));
        assert!(matches!(
            idx.resolve_class(&name("I")),
            Err(ResolveError::CyclicHierarchy(_))
        ));
    }

    #[test]
    fn diamond_interfaces_are_not_cycles() {
        let idx = index(
            r#"{"classes": [
                {"name": "Base", "kind": "interface"},
                {"name": "Left", "kind": "interface", "extends": ["Base"]},
                {"name": "Right", "kind": "interface", "extends": ["Base"]},
                {"name": "A", "implements": ["Left", "Right"]}
            ]}"#,
        );
        let model = idx.resolve_class(&name("A")).unwrap();
        assert_eq!(model.implemented_interfaces().len(), 3);
    }

    #[test]
    fn implementing_a_class_is_a_kind_mismatch() {
        let idx = index(
            r#"{"classes": [
                {"name": "NotAnInterface"},
                {"name": "A", "implements": ["NotAnInterface"]}
            ]}"#,
        );
        assert!(matches!(
            idx.resolve_class(&name("A")),
            Err(ResolveError::KindMismatch {
                relation: "implement",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let err = ClassIndex::from_json(r#"{"classes": [{"name": "Vendor\\A"}, {"name": "vendor\\a"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate class"));
    }

    #[test]
    fn merge_combines_snapshots() {
        let mut first = index(r#"{"classes": [{"name": "A"}]}"#);
        let second = index(r#"{"classes": [{"name": "B"}, {"name": "I", "kind": "interface"}]}"#);
        first.merge(second).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first.classes().count(), 2);
    }

    #[test]
    fn redeclared_method_hides_inherited_visibility() {
        let mut parent = ClassDescriptor::new(name("P"), ClassKind::Class);
        parent.methods.push(DeclaredMethod {
            name: "beforeRun".to_string(),
            visibility: Visibility::Public,
            first_parameter: FirstParameter::Absent,
        });
        let mut child = ClassDescriptor::new(name("C"), ClassKind::Class);
        child.extends.push(name("P"));
        child.methods.push(DeclaredMethod {
            name: "BEFORERUN".to_string(),
            visibility: Visibility::Protected,
            first_parameter: FirstParameter::Absent,
        });

        let idx = ClassIndex::from_descriptors([parent, child]).unwrap();
        let model = idx.resolve_class(&name("C")).unwrap();
        assert!(model.public_methods().is_empty());
    }
}
