//! Shared output formatting for lint results.

use anyhow::Result;
use class_lint_core::{LintResult, Severity};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    for finding in &result.findings {
        let severity_indicator = match finding.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        match &finding.location {
            Some(location) => println!(
                "{} {} in {} at {}",
                finding.violation.code, finding.violation.rule, finding.violation.subject, location
            ),
            None => println!(
                "{} {} in {}",
                finding.violation.code, finding.violation.rule, finding.violation.subject
            ),
        }
        println!("  {}: {}", severity_indicator, finding.message);
        if let Some(help) = &finding.help {
            println!("  = help: {help}");
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} class(es), {} skipped\x1b[0m",
        summary_color, errors, warnings, infos, result.classes_checked, result.classes_skipped
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for finding in &result.findings {
        println!("{finding}");
    }
}
