//! Check command implementation.

use anyhow::{bail, Context, Result};
use glob::Pattern;
use logmsglint_core::{Config, LintResult, RuleConfig, Severity};
use logmsglint_go::{GoFrontend, SourceFrontend};
use logmsglint_rules::{find_rule, RULES};
use std::path::{Path, PathBuf};

use super::output::{self, Sources};
use crate::config_resolver::ConfigSource;
use crate::{fix, OutputFormat};

/// Command-line options of `check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to restrict the run to.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Extra sensitive-data patterns.
    pub sensitive_patterns: Vec<String>,
    /// Rewrite fixable messages in place.
    pub fix: bool,
}

/// A checked file.
struct CheckedFile {
    /// Path on disk.
    path: PathBuf,
    /// Path as reported in violations.
    display: PathBuf,
}

/// Everything a run produced.
struct Analysis {
    result: LintResult,
    files: Vec<CheckedFile>,
    sources: Sources,
}

/// Runs the check command. Returns `true` if the run failed, i.e. a
/// violation at or above the configured `fail_on` severity remains.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = effective_config(source.load()?, options)?;
    let analysis = analyze(path, &config, &options.exclude)?;

    output::print(&analysis.result, options.format, &analysis.sources)?;

    let threshold = config.fail_threshold();
    if options.fix {
        let remaining = apply_fixes(&analysis, threshold)?;
        return Ok(remaining > 0);
    }

    Ok(analysis.result.has_violations_at(threshold))
}

/// Merges command-line options into the loaded configuration.
fn effective_config(mut config: Config, options: &CheckOptions) -> Result<Config> {
    config
        .settings
        .sensitive_patterns
        .extend(options.sensitive_patterns.iter().cloned());

    if let Some(filter) = &options.rules {
        restrict_rules(&mut config, filter)?;
    }
    Ok(config)
}

/// Disables every rule not named in `filter`.
fn restrict_rules(config: &mut Config, filter: &str) -> Result<()> {
    let mut selected = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match find_rule(name) {
            Some(info) => selected.push(info.name),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    if selected.is_empty() {
        bail!("--rules selects no known rule (see `logmsglint list-rules`)");
    }

    for info in RULES {
        let enabled = selected.contains(&info.name);
        config
            .rules
            .entry(info.name.to_string())
            .or_insert_with(RuleConfig::default)
            .enabled = Some(enabled);
    }
    Ok(())
}

fn analyze(path: &Path, config: &Config, extra_exclude: &[String]) -> Result<Analysis> {
    let engine = logmsglint_rules::engine(config).context("Failed to build engine")?;
    let frontend = GoFrontend::new();

    let root = if path.is_file() {
        path.to_path_buf()
    } else if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };

    let excludes = compile_excludes(config.analyzer.exclude.iter().chain(extra_exclude))?;
    let files = discover_files(&root, &excludes, config.analyzer.respect_gitignore, &frontend)?;

    tracing::info!(
        "Analyzing {} {} file(s) under {} with {} rules",
        files.len(),
        frontend.language_id(),
        root.display(),
        engine.rule_count()
    );

    let mut parsed = Vec::with_capacity(files.len());
    let mut sources = Sources::new();
    for file in &files {
        let text = std::fs::read_to_string(&file.path)
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        parsed.push(
            frontend
                .parse(&file.display, &text)
                .with_context(|| format!("Failed to parse {}", file.path.display()))?,
        );
        sources.insert(file.display.clone(), text);
    }

    let result = engine.check_all(parsed.iter().map(|p| (&p.unit, &p.types)));

    Ok(Analysis {
        result,
        files,
        sources,
    })
}

fn compile_excludes<'a>(patterns: impl IntoIterator<Item = &'a String>) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn is_excluded(relative: &Path, excludes: &[Pattern]) -> bool {
    excludes.iter().any(|p| p.matches_path(relative))
}

fn discover_files(
    root: &Path,
    excludes: &[Pattern],
    respect_gitignore: bool,
    frontend: &dyn SourceFrontend,
) -> Result<Vec<CheckedFile>> {
    if root.is_file() {
        return Ok(vec![CheckedFile {
            path: root.to_path_buf(),
            display: root.to_path_buf(),
        }]);
    }
    if !root.is_dir() {
        bail!("Path does not exist: {}", root.display());
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .git_ignore(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !frontend.handles(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if is_excluded(relative, excludes) {
            tracing::debug!("Excluding: {}", relative.display());
            continue;
        }

        files.push(CheckedFile {
            path: path.to_path_buf(),
            display: relative.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.display.cmp(&b.display));
    Ok(files)
}

/// Rewrites files with the attached replacements and returns how many
/// violations at or above `threshold` are left unfixed.
fn apply_fixes(analysis: &Analysis, threshold: Severity) -> Result<usize> {
    let violations = &analysis.result.violations;
    let mut fixed = vec![false; violations.len()];
    let mut fixed_files = 0;

    for file in &analysis.files {
        let Some(text) = analysis.sources.get(&file.display) else {
            continue;
        };
        let (indices, replacements): (Vec<usize>, Vec<_>) = violations
            .iter()
            .enumerate()
            .filter(|(_, v)| v.location.file == file.display)
            .filter_map(|(i, v)| v.replacement().map(|r| (i, r)))
            .unzip();
        if replacements.is_empty() {
            continue;
        }

        let outcome = fix::apply(text, &replacements);
        if outcome.applied.is_empty() {
            continue;
        }
        std::fs::write(&file.path, &outcome.text)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        fixed_files += 1;
        for &applied in &outcome.applied {
            fixed[indices[applied]] = true;
        }

        let skipped = outcome.skipped(replacements.len());
        if skipped > 0 {
            tracing::info!(
                "{}: {} overlapping fix(es) left for the next run",
                file.display.display(),
                skipped
            );
        }
    }

    let applied_total = fixed.iter().filter(|f| **f).count();
    tracing::info!("Applied {applied_total} fix(es) in {fixed_files} file(s)");

    let remaining = violations
        .iter()
        .zip(&fixed)
        .filter(|(v, fixed)| !**fixed && v.severity >= threshold)
        .count();
    Ok(remaining)
}
