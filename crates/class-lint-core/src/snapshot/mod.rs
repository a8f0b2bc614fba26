//! Class metadata snapshots.
//!
//! A snapshot is the host's introspection output: every class, interface
//! and trait of the analyzed codebase with its declared relations.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! ClassDescriptor (declared facts only)
//!   ↓ ClassIndex
//! ClassModel (closed hierarchy, on demand)
//! ```

use std::path::{Path, PathBuf};

use crate::model::{ClassKind, FirstParameter};
use crate::name::ClassName;
use crate::type_ref::TypeRef;
use crate::types::Location;

pub mod dto;
pub mod loader;

pub use loader::LoadError;

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Callable from anywhere.
    Public,
    /// Callable from subclasses.
    Protected,
    /// Callable from the declaring class only.
    Private,
}

/// A method as declared on one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMethod {
    /// Method name.
    pub name: String,
    /// Declared visibility.
    pub visibility: Visibility,
    /// The first parameter.
    pub first_parameter: FirstParameter,
}

/// Declared facts about one type, before hierarchy resolution.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Fully-qualified name.
    pub name: ClassName,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Abstract flag.
    pub is_abstract: bool,
    /// Parent class (at most one for classes) or parent interfaces.
    pub extends: Vec<ClassName>,
    /// Directly implemented interfaces.
    pub implements: Vec<ClassName>,
    /// Constructor parameter types, `None` when no constructor is declared.
    pub constructor: Option<Vec<Option<TypeRef>>>,
    /// Declared methods (excluding the constructor).
    pub methods: Vec<DeclaredMethod>,
    /// Declaration site.
    pub location: Option<Location>,
}

impl ClassDescriptor {
    /// Creates a descriptor for a concrete class with no relations.
    #[must_use]
    pub fn new(name: ClassName, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            is_abstract: false,
            extends: Vec::new(),
            implements: Vec::new(),
            constructor: None,
            methods: Vec::new(),
            location: None,
        }
    }

    /// Returns the parent class, for class declarations.
    #[must_use]
    pub fn parent(&self) -> Option<&ClassName> {
        match self.kind {
            ClassKind::Class => self.extends.first(),
            ClassKind::Interface | ClassKind::Trait => None,
        }
    }
}

/// Errors from reading a snapshot.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SnapshotError {
    /// IO error reading the snapshot file.
    #[error("Failed to read snapshot {path}: {source}")]
    #[diagnostic(code(class_lint::snapshot::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for the expected schema.
    #[error("Failed to parse snapshot{}: {source}", display_path(.path.as_deref()))]
    #[diagnostic(
        code(class_lint::snapshot::json),
        help("a snapshot is an object with a `classes` array")
    )]
    Json {
        /// Path of the snapshot, when read from a file.
        path: Option<PathBuf>,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The snapshot parsed but failed validation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

/// Parses snapshot JSON into validated descriptors.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails validation.
pub fn parse(content: &str) -> Result<Vec<ClassDescriptor>, SnapshotError> {
    let dto: dto::SnapshotDto =
        serde_json::from_str(content).map_err(|source| SnapshotError::Json { path: None, source })?;
    Ok(loader::load(dto)?)
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn read(path: &Path) -> Result<Vec<ClassDescriptor>, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dto: dto::SnapshotDto =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
            path: Some(path.to_path_buf()),
            source,
        })?;
    Ok(loader::load(dto)?)
}
