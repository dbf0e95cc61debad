//! Rule requiring log messages to be written in the Latin alphabet.
//!
//! Any letter outside the Latin script is flagged. Accented Latin letters,
//! digits and punctuation are accepted. There is no automatic fix.

use std::sync::LazyLock;

use logmsglint_core::{Finding, FragmentPosition, MessageRule};
use regex::Regex;

/// Rule code for english-only.
pub const CODE: &str = "LM002";

/// Rule name for english-only.
pub const NAME: &str = "english-only";

#[allow(clippy::expect_used)] // literal pattern
static NON_LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}&&[^\p{Script=Latin}]]").expect("non-latin letter class compiles")
});

/// Flags messages containing letters from non-Latin scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishOnly;

impl EnglishOnly {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MessageRule for EnglishOnly {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must only use Latin letters"
    }

    fn message(&self) -> &'static str {
        "log message must contain only English text (Cyrillic and other scripts are not allowed)"
    }

    fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
        contains_non_latin_letters(text).then(|| Finding::new(text))
    }
}

/// Returns true if `text` has a letter from any script other than Latin.
#[must_use]
pub fn contains_non_latin_letters(text: &str) -> bool {
    NON_LATIN_LETTER.is_match(text)
}
