//! Fully-qualified class names.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace separator used in fully-qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A validated, fully-qualified class or interface name.
///
/// A leading namespace separator is stripped, so `\Foo\Bar` and `Foo\Bar`
/// denote the same class. Comparison, hashing and ordering ignore ASCII case,
/// matching how the analyzed language looks classes up. [`fmt::Display`]
/// keeps the declared spelling.
#[derive(Debug, Clone)]
pub struct ClassName {
    declared: String,
    key: String,
}

impl ClassName {
    /// Creates a new class name.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or contains whitespace.
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed = name.trim_start_matches(NAMESPACE_SEPARATOR);
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) || trimmed.ends_with(NAMESPACE_SEPARATOR) {
            return Err(NameError::Invalid {
                name: name.to_string(),
            });
        }
        Ok(Self {
            declared: trimmed.to_string(),
            key: trimmed.to_ascii_lowercase(),
        })
    }

    /// Returns the name as declared (without a leading separator).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.declared
    }

    /// Returns the last segment of the name (the short class name).
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.declared
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or(&self.declared)
    }

    /// Returns the namespace part of the name, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.declared
            .rfind(NAMESPACE_SEPARATOR)
            .map(|idx| &self.declared[..idx])
    }
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassName {}

impl Hash for ClassName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for ClassName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declared)
    }
}

impl std::str::FromStr for ClassName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for ClassName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.declared)
    }
}

impl<'de> serde::Deserialize<'de> for ClassName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Errors from constructing a [`ClassName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Name is empty (or only a namespace separator).
    #[error("class name must not be empty")]
    Empty,

    /// Name contains whitespace or a dangling separator.
    #[error("invalid class name `{name}`")]
    Invalid {
        /// The rejected name.
        name: String,
    },
}
