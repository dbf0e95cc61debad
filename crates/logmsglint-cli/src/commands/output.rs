//! Shared output formatting for lint results.

use anyhow::Result;
use logmsglint_core::{LintResult, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::OutputFormat;

/// Source text of the checked files, keyed by the path violations report.
pub type Sources = HashMap<PathBuf, String>;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, sources: &Sources) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, sources),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }

    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );

    let fixable = result.fixable_count();
    if fixable > 0 {
        println!("{fixable} violation(s) can be fixed with --fix");
    }
}

/// JSON document written by `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    violations: &'a [Violation],
    files_checked: usize,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    infos: usize,
    fixable: usize,
}

fn json_report(result: &LintResult) -> JsonReport<'_> {
    let (errors, warnings, infos) = result.count_by_severity();
    JsonReport {
        violations: &result.violations,
        files_checked: result.files_checked,
        summary: JsonSummary {
            errors,
            warnings,
            infos,
            fixable: result.fixable_count(),
        },
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&json_report(result))?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, sources: &Sources) {
    for violation in &result.violations {
        let diagnostic = ViolationDiagnostic::from(violation);
        let report = match sources.get(&violation.location.file) {
            Some(text) => Report::new(diagnostic).with_source_code(NamedSource::new(
                violation.location.file.display().to_string(),
                text.clone(),
            )),
            None => Report::new(diagnostic),
        };
        println!("{report:?}");
    }

    print_summary(result);
}
