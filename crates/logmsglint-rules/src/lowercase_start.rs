//! Rule requiring log messages to start with a lowercase letter.
//!
//! Only the first fragment of a message is judged: later fragments of a
//! concatenation usually follow runtime values such as paths or identifiers.
//!
//! Only an uppercase ASCII letter at the first visible position is a
//! violation. Messages starting with a digit or punctuation are accepted.

use logmsglint_core::{Finding, FragmentPosition, MessageRule};

/// Rule code for lowercase-start.
pub const CODE: &str = "LM001";

/// Rule name for lowercase-start.
pub const NAME: &str = "lowercase-start";

/// Flags messages whose first visible character is an uppercase ASCII letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseStart;

impl LowercaseStart {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MessageRule for LowercaseStart {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must start with a lowercase letter"
    }

    fn message(&self) -> &'static str {
        "log message must start with a lowercase English letter"
    }

    fn applies_to(&self, position: FragmentPosition) -> bool {
        position.is_first()
    }

    fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
        lowercase_first_letter(text).map(|fixed| Finding::with_fix(text, fixed))
    }
}

/// Returns `text` with its first visible character lowercased, if that
/// character is an uppercase ASCII letter.
#[must_use]
pub fn lowercase_first_letter(text: &str) -> Option<String> {
    let (idx, first) = text.char_indices().find(|(_, c)| !c.is_whitespace())?;
    if !first.is_ascii_uppercase() {
        return None;
    }

    let mut fixed = String::with_capacity(text.len());
    fixed.push_str(&text[..idx]);
    fixed.push(first.to_ascii_lowercase());
    fixed.push_str(&text[idx + first.len_utf8()..]);
    Some(fixed)
}
