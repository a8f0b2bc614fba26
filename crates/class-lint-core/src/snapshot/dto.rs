//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`ClassDescriptor`](super::ClassDescriptor)s via the loader.

use serde::Deserialize;
use std::path::PathBuf;

/// Raw JSON representation of a metadata snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotDto {
    /// Every class, interface and trait known to the host.
    #[serde(default)]
    pub classes: Vec<ClassDto>,
}

/// Raw JSON representation of one type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassDto {
    /// Fully-qualified name.
    pub name: String,
    /// `class` (default), `interface` or `trait`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Abstract flag (classes only).
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Parent class, or parent interfaces for an interface.
    #[serde(default)]
    pub extends: Option<OneOrMany>,
    /// Directly implemented interfaces.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Constructor parameters; absent when no constructor is declared.
    #[serde(default)]
    pub constructor: Option<Vec<ParameterDto>>,
    /// Declared methods (excluding the constructor).
    #[serde(default)]
    pub methods: Vec<MethodDto>,
    /// Declaring source file.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Declaration line.
    #[serde(default)]
    pub line: Option<usize>,
}

/// A single name or a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// `"extends": "Parent"`
    One(String),
    /// `"extends": ["A", "B"]`
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flattens into a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

/// Raw JSON representation of a declared method.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDto {
    /// Method name.
    pub name: String,
    /// `public` (default), `protected` or `private`.
    #[serde(default = "default_visibility")]
    pub visibility: String,
    /// Declared parameters in order.
    #[serde(default)]
    pub parameters: Vec<ParameterDto>,
}

/// Raw JSON representation of a declared parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDto {
    /// Parameter name (informational).
    #[serde(default)]
    pub name: Option<String>,
    /// Declared type string; absent when untyped.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

fn default_kind() -> String {
    "class".to_string()
}

fn default_visibility() -> String {
    "public".to_string()
}
