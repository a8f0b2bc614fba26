//! Namespace include/exclude filtering.
//!
//! Patterns are globs over fully-qualified names using `\` as the separator,
//! e.g. `Vendor\**` or `**\Test\**`. Matching ignores case.

use glob::{MatchOptions, Pattern, PatternError};

use crate::name::{ClassName, NAMESPACE_SEPARATOR};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled namespace glob.
#[derive(Debug, Clone)]
pub struct NamespacePattern {
    raw: String,
    pattern: Pattern,
}

impl NamespacePattern {
    /// Compiles a namespace glob.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the glob is malformed.
    pub fn new(raw: &str) -> Result<Self, PatternError> {
        let trimmed = raw.trim_start_matches(NAMESPACE_SEPARATOR);
        Ok(Self {
            raw: raw.to_string(),
            pattern: Pattern::new(&to_path_form(trimmed))?,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `name` matches.
    #[must_use]
    pub fn matches(&self, name: &ClassName) -> bool {
        self.pattern
            .matches_with(&to_path_form(name.as_str()), MATCH_OPTIONS)
    }
}

// `\` is an escape character in some glob dialects; match on `/` instead.
fn to_path_form(s: &str) -> String {
    s.replace(NAMESPACE_SEPARATOR, "/")
}

/// Include/exclude filter over class names.
///
/// An empty include list admits every class. Exclusion wins over inclusion.
#[derive(Debug, Clone, Default)]
pub struct NamespaceFilter {
    include: Vec<NamespacePattern>,
    exclude: Vec<NamespacePattern>,
}

impl NamespaceFilter {
    /// Compiles include and exclude globs.
    ///
    /// # Errors
    ///
    /// Returns the first malformed pattern's error.
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether `name` passes the filter.
    #[must_use]
    pub fn admits(&self, name: &ClassName) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches(name));
        included && !self.exclude.iter().any(|p| p.matches(name))
    }

    /// Whether no pattern is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

fn compile<I, S>(patterns: I) -> Result<Vec<NamespacePattern>, PatternError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| NamespacePattern::new(p.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ClassName {
        ClassName::new(s).unwrap()
    }

    #[test]
    fn empty_filter_admits_everything() {
        let filter = NamespaceFilter::default();
        assert!(filter.is_empty());
        assert!(filter.admits(&name("Any\\Class")));
    }

    #[test]
    fn include_restricts_to_vendor() {
        let filter = NamespaceFilter::new(["Vendor\\**"], Vec::<&str>::new()).unwrap();
        assert!(filter.admits(&name("Vendor\\Module\\Model\\Cart")));
        assert!(filter.admits(&name("vendor\\module\\Cart")));
        assert!(!filter.admits(&name("Magento\\Catalog\\Model\\Product")));
    }

    #[test]
    fn exclude_wins_over_include() {
        let filter = NamespaceFilter::new(["Vendor\\**"], ["**\\Test\\**"]).unwrap();
        assert!(filter.admits(&name("Vendor\\Module\\Model\\Cart")));
        assert!(!filter.admits(&name("Vendor\\Module\\Test\\Unit\\CartTest")));
    }

    #[test]
    fn leading_separator_is_ignored() {
        let pattern = NamespacePattern::new("\\Vendor\\Module\\*").unwrap();
        assert_eq!(pattern.as_str(), "\\Vendor\\Module\\*");
        assert!(pattern.matches(&name("Vendor\\Module\\Cart")));
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        assert!(NamespacePattern::new("Vendor\\[").is_err());
    }
}
