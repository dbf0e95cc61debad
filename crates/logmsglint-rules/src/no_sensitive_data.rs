//! Rule forbidding secrets and credential keywords in log messages.
//!
//! Matches the built-in keyword patterns plus any user-configured pattern.
//! The fix replaces every match with [`REDACTED`], applying patterns in
//! their compiled order.

use logmsglint_core::{Finding, FragmentPosition, MessageRule};

use crate::patterns::{self, PatternError, SensitivePattern, REDACTED};

/// Rule code for no-sensitive-data.
pub const CODE: &str = "LM004";

/// Rule name for no-sensitive-data.
pub const NAME: &str = "no-sensitive-data";

/// Flags messages matching any compiled sensitive pattern.
#[derive(Debug, Clone)]
pub struct NoSensitiveData {
    patterns: Vec<SensitivePattern>,
}

impl NoSensitiveData {
    /// Creates the rule from already compiled patterns.
    #[must_use]
    pub fn new(patterns: Vec<SensitivePattern>) -> Self {
        Self { patterns }
    }

    /// Creates the rule with the built-in patterns followed by `custom`.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern fails to compile.
    pub fn with_custom_patterns<C: AsRef<str>>(custom: &[C]) -> Result<Self, PatternError> {
        patterns::compile_with_builtins(custom).map(Self::new)
    }

    /// The compiled patterns, in application order.
    #[must_use]
    pub fn patterns(&self) -> &[SensitivePattern] {
        &self.patterns
    }

    /// Returns true if any pattern matches `text`.
    #[must_use]
    pub fn contains_sensitive_data(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// Applies every pattern in order, each one to the output of the last.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        self.patterns
            .iter()
            .fold(text.to_string(), |acc, pattern| pattern.redact(&acc))
    }
}

impl MessageRule for NoSensitiveData {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Log messages must not mention passwords, tokens, keys or other secrets"
    }

    fn message(&self) -> &'static str {
        "log message contains potentially sensitive data"
    }

    fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
        self.contains_sensitive_data(text)
            .then(|| Finding::with_fix(text, self.redact(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> NoSensitiveData {
        NoSensitiveData::with_custom_patterns::<&str>(&[]).expect("builtins compile")
    }

    #[test]
    fn api_key_is_redacted() {
        let rule = builtin();
        assert!(rule.contains_sensitive_data("API_KEY=3"));
        assert_eq!(rule.redact("API_KEY=3"), "[redacted]=3");
    }

    #[test]
    fn every_keyword_family_in_both_spellings_and_mixed_case() {
        let rule = builtin();
        let samples = [
            ("password=1", "[redacted]=1"),
            ("PassWord: x", "[redacted]: x"),
            ("passwd set", "[redacted] set"),
            ("token expired", "[redacted] expired"),
            ("ToKeN expired", "[redacted] expired"),
            ("api_key=1", "[redacted]=1"),
            ("api-key=1", "[redacted]=1"),
            ("ApiKey=1", "[redacted]=1"),
            ("secret rotated", "[redacted] rotated"),
            ("SECRET rotated", "[redacted] rotated"),
            ("authorization header", "[redacted] header"),
            ("Authorization header", "[redacted] header"),
            ("access_key=1", "[redacted]=1"),
            ("ACCESS-KEY=1", "[redacted]=1"),
            ("accesskey=1", "[redacted]=1"),
        ];
        for (input, expected) in samples {
            assert!(rule.contains_sensitive_data(input), "{input}");
            assert_eq!(rule.redact(input), expected, "{input}");
        }
    }

    #[test]
    fn keywords_inside_words_are_not_matched() {
        let rule = builtin();
        assert!(!rule.contains_sensitive_data("tokenizer started"));
        assert!(!rule.contains_sensitive_data("secretary joined"));
        assert!(!rule.contains_sensitive_data("user logged in"));
    }

    #[test]
    fn custom_pattern_runs_after_builtins() {
        let rule = NoSensitiveData::with_custom_patterns(&[r"(?i)\bsession[_-]?id\b"])
            .expect("valid");
        assert_eq!(
            rule.redact("password=1 token=2 API_KEY=3 session_id=4"),
            "[redacted]=1 [redacted]=2 [redacted]=3 [redacted]=4"
        );
    }

    #[test]
    fn later_patterns_see_earlier_redactions() {
        let rule = NoSensitiveData::new(
            patterns::compile::<&str, &str>(&[], &["token", "redacted"]).expect("valid"),
        );
        assert_eq!(rule.redact("token"), format!("[{REDACTED}]"));
    }

    #[test]
    fn invalid_custom_pattern_is_an_error() {
        assert!(NoSensitiveData::with_custom_patterns(&["[unclosed"]).is_err());
    }

    #[test]
    fn rule_reports_redacted_fix() {
        let position = FragmentPosition { index: 1 };
        let finding = builtin().check(" token=", position);
        assert_eq!(finding, Some(Finding::with_fix(" token=", " [redacted]=")));
    }
}
