//! Rule trait for log message text rules.

use crate::types::Severity;

/// Where a fragment sits in the message it was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentPosition {
    /// Zero-based index in extraction order.
    pub index: usize,
}

impl FragmentPosition {
    /// Returns true for the first fragment of a message.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Outcome of a rule matching a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The fragment text that was judged.
    pub original: String,
    /// Corrected text, when the rule knows a safe correction.
    pub fixed: Option<String>,
}

impl Finding {
    /// A finding without a known correction.
    #[must_use]
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            fixed: None,
        }
    }

    /// A finding with a corrected text.
    #[must_use]
    pub fn with_fix(original: impl Into<String>, fixed: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            fixed: Some(fixed.into()),
        }
    }
}

/// A rule over one literal fragment of a log message.
///
/// Rules are stateless after construction and shared across passes, so they
/// must be `Send + Sync`.
///
/// # Example
///
/// ```ignore
/// use logmsglint_core::{Finding, FragmentPosition, MessageRule};
///
/// pub struct NoTabs;
///
/// impl MessageRule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "LM900" }
///     fn message(&self) -> &'static str { "log message must not contain tabs" }
///
///     fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
///         text.contains('\t').then(|| Finding::with_fix(text, text.replace('\t', " ")))
///     }
/// }
/// ```
pub trait MessageRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "lowercase-start").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "LM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the diagnostic message reported for a finding.
    fn message(&self) -> &'static str;

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether the rule judges the fragment at `position`. By default every
    /// fragment is judged.
    fn applies_to(&self, position: FragmentPosition) -> bool {
        let _ = position;
        true
    }

    /// Checks one fragment.
    fn check(&self, text: &str, position: FragmentPosition) -> Option<Finding>;
}

/// Type alias for boxed `MessageRule` trait objects.
pub type RuleBox = Box<dyn MessageRule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct NoTabs;

    impl MessageRule for NoTabs {
        fn name(&self) -> &'static str {
            "no-tabs"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn message(&self) -> &'static str {
            "no tabs"
        }
        fn check(&self, text: &str, _position: FragmentPosition) -> Option<Finding> {
            text.contains('\t')
                .then(|| Finding::with_fix(text, text.replace('\t', " ")))
        }
    }

    #[test]
    fn test_rule_trait_defaults() {
        let rule = NoTabs;
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(rule.applies_to(FragmentPosition { index: 3 }));
        assert_eq!(rule.description(), "");
    }

    #[test]
    fn test_rule_check() {
        let position = FragmentPosition { index: 0 };
        let finding = NoTabs.check("a\tb", position);
        assert_eq!(finding, Some(Finding::with_fix("a\tb", "a b")));
        assert_eq!(NoTabs.check("ab", position), None);
    }
}
