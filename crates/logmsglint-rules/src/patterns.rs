//! Compilation of sensitive-data patterns.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

/// Token that replaces every sensitive match in a fixed message.
pub const REDACTED: &str = "[redacted]";

/// Built-in sensitive keywords. Always compiled, before any user pattern.
pub const BUILTIN_PATTERNS: &[&str] = &[
    r"(?i)\bpassword\b",
    r"(?i)\bpasswd\b",
    r"(?i)\btoken\b",
    r"(?i)\bapi[_-]?key\b",
    r"(?i)\bsecret\b",
    r"(?i)\bauthorization\b",
    r"(?i)\baccess[_-]?key\b",
];

/// Errors raised while compiling sensitive patterns.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A pattern is not a valid regular expression.
    #[error("invalid sensitive data pattern {pattern:?}: {source}")]
    Invalid {
        /// Pattern text as configured (trimmed).
        pattern: String,
        /// Underlying compilation error.
        source: regex::Error,
    },
}

/// A compiled sensitive-data pattern.
#[derive(Debug, Clone)]
pub struct SensitivePattern {
    source: String,
    regex: Regex,
}

impl SensitivePattern {
    /// Pattern text the regex was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replaces every match in `text` with [`REDACTED`].
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        self.regex.replace_all(text, REDACTED).into_owned()
    }
}

/// Compiles `builtins` followed by `custom` into matchable patterns.
///
/// Entries are trimmed; blank entries and exact duplicates (by trimmed text)
/// are dropped, keeping first-seen order. Every pattern matches
/// case-insensitively.
///
/// # Errors
///
/// Returns [`PatternError::Invalid`] for the first pattern that fails to
/// compile. No partial set is returned.
pub fn compile<B, C>(builtins: &[B], custom: &[C]) -> Result<Vec<SensitivePattern>, PatternError>
where
    B: AsRef<str>,
    C: AsRef<str>,
{
    let merged = builtins
        .iter()
        .map(AsRef::as_ref)
        .chain(custom.iter().map(AsRef::as_ref));

    let mut seen = HashSet::new();
    let mut patterns = Vec::new();

    for raw in merged {
        let pattern = raw.trim();
        if pattern.is_empty() || !seen.insert(pattern) {
            continue;
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::Invalid {
                pattern: pattern.to_string(),
                source,
            })?;

        patterns.push(SensitivePattern {
            source: pattern.to_string(),
            regex,
        });
    }

    tracing::debug!("Compiled {} sensitive pattern(s)", patterns.len());
    Ok(patterns)
}

/// Compiles the built-in set followed by `custom`.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_with_builtins<C: AsRef<str>>(
    custom: &[C],
) -> Result<Vec<SensitivePattern>, PatternError> {
    compile(BUILTIN_PATTERNS, custom)
}
