//! Declared parameter types.

use std::fmt;

use crate::name::{ClassName, NameError};

/// Type names that never denote a class.
///
/// `self`, `static` and `parent` are relative to the declaring class and are
/// not resolvable on their own, so they are treated as builtin markers too.
const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "array", "callable", "iterable", "object", "mixed", "void",
    "null", "never", "false", "true", "self", "static", "parent",
];

/// A declared type reference.
///
/// Only [`TypeRef::Named`] identifies a single class that can be tested for
/// subtyping; every other variant resolves to "no class".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A single named class or interface (nullable `?T` and `T|null` collapse to `T`).
    Named(ClassName),
    /// A builtin or relative type marker such as `int` or `self`.
    Builtin(String),
    /// `A|B` with at least two non-null members: no single class to test.
    Union(Vec<TypeRef>),
    /// `A&B`: no single class to test.
    Intersection(Vec<TypeRef>),
}

impl TypeRef {
    /// Parses a declared type string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is empty or a member is not a valid name.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TypeError::Empty);
        }

        if raw.contains('|') {
            return Self::parse_members(raw, '|').map(Self::union);
        }
        if raw.contains('&') {
            return Self::parse_members(raw, '&').map(Self::Intersection);
        }

        let single = raw.strip_prefix('?').unwrap_or(raw).trim();
        if BUILTIN_TYPES
            .iter()
            .any(|b| b.eq_ignore_ascii_case(single))
        {
            return Ok(Self::Builtin(single.to_ascii_lowercase()));
        }

        ClassName::new(single)
            .map(Self::Named)
            .map_err(|source| TypeError::Name {
                raw: raw.to_string(),
                source,
            })
    }

    /// `T|null` and `null|T` collapse to `T`, like `?T`.
    fn union(members: Vec<Self>) -> Self {
        let mut non_null = members.iter().filter(|m| !m.is_null());
        match (non_null.next(), non_null.next()) {
            (Some(only), None) if members.len() > 1 => only.clone(),
            _ => Self::Union(members),
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Builtin(name) if name == "null")
    }

    fn parse_members(raw: &str, separator: char) -> Result<Vec<Self>, TypeError> {
        raw.split(separator)
            .map(|member| member.trim().trim_start_matches('(').trim_end_matches(')'))
            .map(Self::parse)
            .collect()
    }

    /// Returns the class this type names, if it names exactly one.
    #[must_use]
    pub fn single_class(&self) -> Option<&ClassName> {
        match self {
            Self::Named(name) => Some(name),
            Self::Builtin(_) | Self::Union(_) | Self::Intersection(_) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, members: &[TypeRef], sep: &str) -> fmt::Result {
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{member}")?;
            }
            Ok(())
        }

        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Builtin(name) => f.write_str(name),
            Self::Union(members) => join(f, members, "|"),
            Self::Intersection(members) => join(f, members, "&"),
        }
    }
}

/// Errors from parsing a declared type string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The type string is empty.
    #[error("type must not be empty")]
    Empty,

    /// A member of the type is not a valid class name.
    #[error("invalid type `{raw}`: {source}")]
    Name {
        /// The raw type string.
        raw: String,
        /// The underlying name error.
        source: NameError,
    },
}
