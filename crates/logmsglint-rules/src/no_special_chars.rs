//! Rule forbidding decorative punctuation and emoji in log messages.
//!
//! Flags `!`, `?`, the ellipsis character `…`, a literal `...` run, and code
//! points from the emoji blocks. The fix removes them and normalizes the
//! whitespace left behind.

use logmsglint_core::{Finding, FragmentPosition, MessageRule};

/// Rule code for no-special-chars.
pub const CODE: &str = "LM003";

/// Rule name for no-special-chars.
pub const NAME: &str = "no-special-chars";

const ELLIPSIS_RUN: &str = "...";

/// Flags messages with exclamation marks, question marks, ellipses or emoji.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecialChars;

impl NoSpecialChars {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MessageRule for NoSpecialChars {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must not contain !, ?, ellipses or emoji"
    }

    fn message(&self) -> &'static str {
        "log message must not contain special characters (!, ?, ...) or emoji"
    }

    fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
        contains_special_chars(text).then(|| Finding::with_fix(text, strip_special_chars(text)))
    }
}

/// Returns true for `!`, `?` and `…`.
fn is_forbidden_punctuation(c: char) -> bool {
    matches!(c, '!' | '?' | '\u{2026}')
}

/// Returns true for pictographs, dingbats and weather symbols, and the emoji
/// presentation selector.
fn is_emoji(c: char) -> bool {
    matches!(c, '\u{1F300}'..='\u{1FAFF}' | '\u{2600}'..='\u{27BF}' | '\u{FE0F}')
}

fn is_special(c: char) -> bool {
    is_forbidden_punctuation(c) || is_emoji(c)
}

/// Returns true if `text` has a `...` run, forbidden punctuation or emoji.
#[must_use]
pub fn contains_special_chars(text: &str) -> bool {
    text.contains(ELLIPSIS_RUN) || text.chars().any(is_special)
}

/// Removes every special character and `...` run, then collapses whitespace
/// runs to single spaces and trims the ends.
///
/// Characters go first so that dots separated only by removed characters
/// are seen as one run. The result never contains anything
/// [`contains_special_chars`] would flag.
#[must_use]
pub fn strip_special_chars(text: &str) -> String {
    let without_chars: String = text.chars().filter(|&c| !is_special(c)).collect();
    let without_runs = without_chars.replace(ELLIPSIS_RUN, "");
    without_runs.split_whitespace().collect::<Vec<_>>().join(" ")
}
