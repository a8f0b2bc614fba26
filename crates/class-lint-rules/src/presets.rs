//! Rule presets and configuration-driven rule setup.

use class_lint_core::{Config, ConfigError, RuleBox};
use tracing::{debug, warn};

use crate::vocabulary::{Vocabulary, VocabularyError};
use crate::{handler_capability, restricted_dependency, HandlerCapability, RestrictedDependency};

/// Every built-in rule as `(name, code)`, in reporting order.
pub const RULES: [(&str, &str); 2] = [
    (handler_capability::NAME, handler_capability::CODE),
    (restricted_dependency::NAME, restricted_dependency::CODE),
];

/// Maps a rule name or code to the rule's name.
fn canonical_name(name_or_code: &str) -> Option<&'static str> {
    RULES
        .into_iter()
        .find(|(name, code)| *name == name_or_code || *code == name_or_code)
        .map(|(name, _)| name)
}

/// Preset configurations for class-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Both rules with the widest allow-list.
    #[default]
    Recommended,
    /// Both rules; observers may not depend on sessions or cookies.
    Strict,
    /// Handler capability only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Preset name as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Names of the rules this preset enables.
    #[must_use]
    pub fn rule_names(self) -> &'static [&'static str] {
        match self {
            Self::Recommended | Self::Strict => {
                &[handler_capability::NAME, restricted_dependency::NAME]
            }
            Self::Minimal => &[handler_capability::NAME],
        }
    }

    /// Returns the rules for this preset with default options.
    #[must_use]
    pub fn rules(self, vocabulary: &Vocabulary) -> Vec<RuleBox> {
        self.rule_names()
            .iter()
            .filter_map(|name| self.rule(name, vocabulary))
            .collect()
    }

    /// Builds one rule by name or code with this preset's defaults.
    #[must_use]
    pub fn rule(self, name_or_code: &str, vocabulary: &Vocabulary) -> Option<RuleBox> {
        match name_or_code {
            handler_capability::NAME | handler_capability::CODE => {
                Some(Box::new(HandlerCapability::new(vocabulary)))
            }
            restricted_dependency::NAME | restricted_dependency::CODE => {
                Some(Box::new(self.restricted_dependency(vocabulary)))
            }
            _ => None,
        }
    }

    fn restricted_dependency(self, vocabulary: &Vocabulary) -> RestrictedDependency {
        match self {
            Self::Strict => RestrictedDependency::strict(vocabulary),
            Self::Recommended | Self::Minimal => RestrictedDependency::new(vocabulary),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| SetupError::UnknownPreset(s.to_string()))
    }
}

/// Errors turning configuration into rules.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SetupError {
    /// The preset name is not recognized.
    #[error("unknown preset `{0}`")]
    #[diagnostic(
        code(class_lint::preset),
        help("available presets: recommended, strict, minimal")
    )]
    UnknownPreset(String),

    /// The `[vocabulary]` table is invalid.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Vocabulary(#[from] VocabularyError),

    /// A rule option is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `handler-capability` (CL001)
/// - `restricted-dependency` (CL002), every role allowed
#[must_use]
pub fn recommended_rules(vocabulary: &Vocabulary) -> Vec<RuleBox> {
    Preset::Recommended.rules(vocabulary)
}

/// Returns the strict set of rules.
///
/// Same rules as recommended, but observers lose their exemption from
/// `restricted-dependency`.
#[must_use]
pub fn strict_rules(vocabulary: &Vocabulary) -> Vec<RuleBox> {
    Preset::Strict.rules(vocabulary)
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules(vocabulary: &Vocabulary) -> Vec<RuleBox> {
    Preset::Minimal.rules(vocabulary)
}

/// Returns the full rule catalogue, one instance of every entry in [`RULES`]
/// with default options, whether or not a preset enables it.
#[must_use]
pub fn all_rules(vocabulary: &Vocabulary) -> Vec<RuleBox> {
    RULES
        .iter()
        .filter_map(|(name, _)| Preset::default().rule(name, vocabulary))
        .collect()
}

/// Builds the rules a configuration asks for.
///
/// `selection` (rule names or codes) overrides the preset's rule list;
/// unknown entries are logged and ignored, and a rule named twice is built once. The `[vocabulary]` table and
/// per-rule options are applied.
///
/// # Errors
///
/// Returns an error for an unknown preset, an invalid vocabulary, or an
/// invalid rule option.
pub fn configured_rules(
    config: &Config,
    selection: Option<&[String]>,
) -> Result<Vec<RuleBox>, SetupError> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse::<Preset>()?,
        None => Preset::default(),
    };
    let vocabulary = Vocabulary::from_config(config.vocabulary.as_ref())?;
    debug!("Using preset {}", preset);

    let names: Vec<&str> = match selection {
        Some(selection) => selection.iter().map(String::as_str).collect(),
        None => preset.rule_names().to_vec(),
    };

    let mut selected: Vec<&'static str> = Vec::new();
    for name in names {
        match canonical_name(name) {
            Some(canonical) if selected.contains(&canonical) => {
                debug!("Rule {} already selected", name);
            }
            Some(canonical) => selected.push(canonical),
            None => warn!("Unknown rule: {}", name),
        }
    }

    let mut rules: Vec<RuleBox> = Vec::new();
    for name in selected {
        if name == restricted_dependency::NAME {
            let mut rule = preset.restricted_dependency(&vocabulary);
            if let Some(options) = config.rule(restricted_dependency::NAME) {
                rule = rule.configure(options)?;
            }
            rules.push(Box::new(rule));
        } else if let Some(rule) = preset.rule(name, &vocabulary) {
            rules.push(rule);
        }
    }

    Ok(rules)
}
