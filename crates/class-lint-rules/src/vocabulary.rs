//! Well-known capability identities and naming matchers.
//!
//! Rules never hard-code framework names. They read them from a
//! [`Vocabulary`], which defaults to the Magento 2 framework and can be
//! overridden from the `[vocabulary]` table of `class-lint.toml`:
//!
//! ```toml
//! [vocabulary]
//! handler = 'Acme\Http\ControllerInterface'
//! handler_refinement = '(?i)(^|\\)Http[a-z]+ControllerInterface$'
//! ```

use class_lint_core::{ClassName, NameError};
use regex::Regex;
use serde::Deserialize;

/// Default handler capability.
pub const HANDLER: &str = "Magento\\Framework\\App\\ActionInterface";
/// Default presentation-surface capability.
pub const PRESENTATION_SURFACE: &str = "Magento\\Framework\\View\\Element\\BlockInterface";
/// Default UI data-provider capability.
pub const DATA_PROVIDER: &str =
    "Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\DataProviderInterface";
/// Default layout-processor capability.
pub const LAYOUT_PROCESSOR: &str = "Magento\\Checkout\\Block\\Checkout\\LayoutProcessorInterface";
/// Default view-model marker capability.
pub const VIEW_MODEL: &str = "Magento\\Framework\\View\\Element\\Block\\ArgumentInterface";
/// Default event-observer capability.
pub const OBSERVER: &str = "Magento\\Framework\\Event\\ObserverInterface";
/// Default structured-document type.
pub const DOCUMENT: &str = "Magento\\Framework\\View\\Element\\UiComponent\\DataProvider\\Document";
/// Default session-manager capability.
pub const SESSION_MANAGER: &str = "Magento\\Framework\\Session\\SessionManagerInterface";
/// Default cookie-reader capability.
pub const COOKIE_READER: &str = "Magento\\Framework\\Stdlib\\Cookie\\CookieReaderInterface";

/// Default pattern for HTTP-method-restricting handler interfaces.
pub const HANDLER_REFINEMENT: &str = r"(?i)(^|\\)Http[a-z]+ActionInterface$";
/// Default pattern for interception hook method names.
pub const INTERCEPTION_HOOK: &str = r"(?i)^(after|around|before).+";

/// A compiled naming convention.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    regex: Regex,
}

impl NameMatcher {
    /// Compiles a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Whether `name` follows the convention.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Errors building a vocabulary from configuration.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum VocabularyError {
    /// The table has an unknown key or a non-string value.
    #[error("invalid [vocabulary] table: {message}")]
    #[diagnostic(
        code(class_lint::vocabulary::table),
        help("keys are capability names or `handler_refinement` / `interception_hook`, all strings")
    )]
    Table {
        /// Deserialization error message.
        message: String,
    },

    /// A capability identity is not a valid class name.
    #[error("vocabulary.{key}: {source}")]
    #[diagnostic(code(class_lint::vocabulary::name))]
    Name {
        /// Offending key.
        key: &'static str,
        /// Underlying name error.
        source: NameError,
    },

    /// A matcher pattern does not compile.
    #[error("vocabulary.{key}: {source}")]
    #[diagnostic(
        code(class_lint::vocabulary::pattern),
        help("patterns use the `regex` crate syntax; prefix with (?i) to ignore case")
    )]
    Pattern {
        /// Offending key.
        key: &'static str,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// Capability identities and naming matchers consumed by the rules.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Request handler capability.
    pub handler: ClassName,
    /// Presentation surface (block) capability.
    pub presentation_surface: ClassName,
    /// UI data-provider capability.
    pub data_provider: ClassName,
    /// Layout processor capability.
    pub layout_processor: ClassName,
    /// View-model marker capability.
    pub view_model: ClassName,
    /// Event observer capability.
    pub observer: ClassName,
    /// Structured document type.
    pub document: ClassName,
    /// Session manager capability.
    pub session_manager: ClassName,
    /// Cookie reader capability.
    pub cookie_reader: ClassName,
    /// Names of handler interfaces that restrict HTTP methods.
    pub handler_refinement: NameMatcher,
    /// Names of interception hook methods.
    pub interception_hook: NameMatcher,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VocabularyOverrides {
    handler: Option<String>,
    presentation_surface: Option<String>,
    data_provider: Option<String>,
    layout_processor: Option<String>,
    view_model: Option<String>,
    observer: Option<String>,
    document: Option<String>,
    session_manager: Option<String>,
    cookie_reader: Option<String>,
    handler_refinement: Option<String>,
    interception_hook: Option<String>,
}

impl Vocabulary {
    /// The Magento 2 framework vocabulary.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the built-in names and patterns are valid.
    pub fn magento() -> Result<Self, VocabularyError> {
        Ok(Self {
            handler: name("handler", HANDLER)?,
            presentation_surface: name("presentation_surface", PRESENTATION_SURFACE)?,
            data_provider: name("data_provider", DATA_PROVIDER)?,
            layout_processor: name("layout_processor", LAYOUT_PROCESSOR)?,
            view_model: name("view_model", VIEW_MODEL)?,
            observer: name("observer", OBSERVER)?,
            document: name("document", DOCUMENT)?,
            session_manager: name("session_manager", SESSION_MANAGER)?,
            cookie_reader: name("cookie_reader", COOKIE_READER)?,
            handler_refinement: matcher("handler_refinement", HANDLER_REFINEMENT)?,
            interception_hook: matcher("interception_hook", INTERCEPTION_HOOK)?,
        })
    }

    /// Builds a vocabulary from the Magento defaults and a `[vocabulary]` table.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, invalid names or invalid patterns.
    pub fn from_table(table: &toml::Table) -> Result<Self, VocabularyError> {
        let overrides: VocabularyOverrides = toml::Value::Table(table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| VocabularyError::Table {
                message: e.message().to_string(),
            })?;

        let mut vocabulary = Self::magento()?;
        override_name(&mut vocabulary.handler, "handler", overrides.handler)?;
        override_name(
            &mut vocabulary.presentation_surface,
            "presentation_surface",
            overrides.presentation_surface,
        )?;
        override_name(&mut vocabulary.data_provider, "data_provider", overrides.data_provider)?;
        override_name(
            &mut vocabulary.layout_processor,
            "layout_processor",
            overrides.layout_processor,
        )?;
        override_name(&mut vocabulary.view_model, "view_model", overrides.view_model)?;
        override_name(&mut vocabulary.observer, "observer", overrides.observer)?;
        override_name(&mut vocabulary.document, "document", overrides.document)?;
        override_name(
            &mut vocabulary.session_manager,
            "session_manager",
            overrides.session_manager,
        )?;
        override_name(&mut vocabulary.cookie_reader, "cookie_reader", overrides.cookie_reader)?;

        if let Some(pattern) = overrides.handler_refinement {
            vocabulary.handler_refinement = matcher("handler_refinement", &pattern)?;
        }
        if let Some(pattern) = overrides.interception_hook {
            vocabulary.interception_hook = matcher("interception_hook", &pattern)?;
        }

        Ok(vocabulary)
    }

    /// Builds a vocabulary from optional configuration.
    ///
    /// # Errors
    ///
    /// See [`Vocabulary::from_table`].
    pub fn from_config(table: Option<&toml::Table>) -> Result<Self, VocabularyError> {
        table.map_or_else(Self::magento, Self::from_table)
    }

    /// The capabilities whose use is restricted by default.
    #[must_use]
    pub fn restricted_capabilities(&self) -> Vec<ClassName> {
        vec![self.session_manager.clone(), self.cookie_reader.clone()]
    }
}

fn name(key: &'static str, raw: &str) -> Result<ClassName, VocabularyError> {
    ClassName::new(raw).map_err(|source| VocabularyError::Name { key, source })
}

fn matcher(key: &'static str, pattern: &str) -> Result<NameMatcher, VocabularyError> {
    NameMatcher::new(pattern).map_err(|source| VocabularyError::Pattern { key, source })
}

fn override_name(
    slot: &mut ClassName,
    key: &'static str,
    value: Option<String>,
) -> Result<(), VocabularyError> {
    if let Some(raw) = value {
        *slot = name(key, &raw)?;
    }
    Ok(())
}
