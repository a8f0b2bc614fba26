//! Core types for lint violations and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::name::ClassName;

/// Severity level for lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Error for an unrecognized severity string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`, expected: error, warning, info")]
pub struct UnknownSeverity(pub String);

/// Where a class is declared, when the metadata source knows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file path as recorded in the metadata.
    pub file: PathBuf,
    /// Line number (1-indexed), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: Option<usize>) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file.display()),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// A rule's verdict on one class.
///
/// Carries the rule identity and the format arguments for the rule's message
/// template; the subject's fully-qualified name is always the first argument.
/// Rendering is left to the host (see [`Finding`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule code (e.g., "CL001").
    pub code: String,
    /// Rule name (e.g., "handler-capability").
    pub rule: String,
    /// The offending class.
    pub subject: ClassName,
    /// Message template arguments, `{0}` being the subject.
    pub args: Vec<String>,
}

impl Violation {
    /// Creates a new violation for `subject`.
    #[must_use]
    pub fn new(code: impl Into<String>, rule: impl Into<String>, subject: &ClassName) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            subject: subject.clone(),
            args: vec![subject.to_string()],
        }
    }

    /// Appends a further template argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Renders a message template, substituting `{N}` with the N-th argument.
    ///
    /// Placeholders without a matching argument are left as-is.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut message = template.to_string();
        for (i, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }
}

/// A violation as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// The underlying rule verdict.
    #[serde(flatten)]
    pub violation: Violation,
    /// Effective severity after configuration overrides.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
    /// Declaration site of the subject class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Optional fix hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Finding {
    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} in {}",
            self.violation.code, self.violation.rule, self.violation.subject
        );
        if let Some(location) = &self.location {
            let _ = write!(output, " at {location}");
        }
        output.push('\n');
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(help) = &self.help {
            let _ = writeln!(output, "  = help: {help}");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}: ")?,
            None => write!(f, "{}: ", self.violation.subject)?,
        }
        write!(
            f,
            "{} [{}] {}",
            self.severity, self.violation.code, self.message
        )
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All findings.
    pub findings: Vec<Finding>,
    /// Number of classes evaluated by at least one rule.
    pub classes_checked: usize,
    /// Number of classes skipped because they could not be resolved.
    pub classes_skipped: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity >= Severity::Warning)
    }

    /// Returns findings filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Counts findings by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| self.findings.iter().filter(|f| f.severity == severity).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Checks if any findings meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Formats findings as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()` messages
    /// in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Finding> = self
            .findings
            .iter()
            .filter(|f| f.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== class-lint: {} violation(s) ===\n",
            failing.len()
        );

        for finding in &failing {
            let _ = writeln!(report, "{}", finding.format());
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} class(es), {} skipped",
            errors, warnings, infos, self.classes_checked, self.classes_skipped
        );

        report
    }

    /// Adds findings and counters from another result.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.classes_checked += other.classes_checked;
        self.classes_skipped += other.classes_skipped;
    }
}
