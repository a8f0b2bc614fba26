//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::filter::NamespaceFilter;
use crate::index::ClassIndex;
use crate::model::ClassModel;
use crate::resolve::ClassResolver;
use crate::rule::{ClassRule, RuleBox};
use crate::snapshot::ClassDescriptor;
use crate::types::{Finding, LintResult};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Namespace glob pattern error.
    #[error("Invalid namespace pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: ClassRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude namespace glob.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude namespace globs.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include namespace glob.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a namespace pattern is malformed.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        // Merge patterns from config
        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let filter = NamespaceFilter::new(&include_patterns, &exclude_patterns)?;

        let known: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        for name in config.unknown_rules(&known) {
            warn!("Configuration mentions unknown rule: {}", name);
        }

        Ok(Analyzer {
            rules: self.rules,
            filter,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    filter: NamespaceFilter,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes every class declaration in the index.
    ///
    /// Interfaces and traits are never subjects. Classes outside the
    /// namespace filter are ignored entirely; classes that cannot be
    /// resolved are counted as skipped.
    #[must_use]
    pub fn analyze(&self, index: &ClassIndex) -> LintResult {
        info!("Starting analysis of {} declarations", index.len());

        let mut result = LintResult::new();

        for descriptor in index.classes() {
            if !self.filter.admits(&descriptor.name) {
                debug!("Excluding: {}", descriptor.name);
                continue;
            }
            result.extend(self.analyze_descriptor(descriptor, index));
        }

        // Sort findings by subject, then rule code
        result.findings.sort_by(|a, b| {
            a.violation
                .subject
                .cmp(&b.violation.subject)
                .then_with(|| a.violation.code.cmp(&b.violation.code))
        });

        info!(
            "Analysis complete: {} findings in {} classes ({} skipped)",
            result.findings.len(),
            result.classes_checked,
            result.classes_skipped
        );

        result
    }

    /// Analyzes one declaration, resolving it through `resolver`.
    fn analyze_descriptor(
        &self,
        descriptor: &ClassDescriptor,
        resolver: &dyn ClassResolver,
    ) -> LintResult {
        let mut result = LintResult::new();

        let class = match resolver.resolve_class(&descriptor.name) {
            Ok(class) => class,
            Err(e) => {
                warn!("Skipping {}: {}", descriptor.name, e);
                result.classes_skipped = 1;
                return result;
            }
        };

        result.findings = self.analyze_class(&class, resolver);
        for finding in &mut result.findings {
            finding.location.clone_from(&descriptor.location);
        }
        result.classes_checked = 1;
        result
    }

    /// Runs every enabled rule against an already resolved class.
    ///
    /// Findings carry no location; the caller knows where the class lives.
    #[must_use]
    pub fn analyze_class(&self, class: &ClassModel, resolver: &dyn ClassResolver) -> Vec<Finding> {
        debug!("Analyzing: {}", class.name());

        let mut findings = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let Some(violation) = rule.check(class, resolver) else {
                continue;
            };

            let severity = self
                .config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity());

            findings.push(Finding {
                message: violation.render(rule.message_template()),
                violation,
                severity,
                location: None,
                help: rule.help().map(String::from),
            });
        }

        findings
    }
}
