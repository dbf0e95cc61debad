//! The built-in rule set and engine construction.

use logmsglint_core::{Config, Engine, RuleBox, Settings};

use crate::patterns::{self, PatternError};
use crate::{english_only, lowercase_start, no_sensitive_data, no_special_chars};
use crate::{EnglishOnly, LowercaseStart, NoSensitiveData, NoSpecialChars};

/// Static description of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule code (e.g., "LM001").
    pub code: &'static str,
    /// Rule name (e.g., "lowercase-start").
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Whether the rule can suggest a rewrite.
    pub fixable: bool,
}

/// Every built-in rule, in evaluation order.
pub const RULES: &[RuleInfo] = &[
    RuleInfo {
        code: lowercase_start::CODE,
        name: lowercase_start::NAME,
        description: "Log messages must start with a lowercase letter",
        fixable: true,
    },
    RuleInfo {
        code: english_only::CODE,
        name: english_only::NAME,
        description: "Log messages must only use Latin letters",
        fixable: false,
    },
    RuleInfo {
        code: no_special_chars::CODE,
        name: no_special_chars::NAME,
        description: "Log messages must not contain !, ?, ellipses or emoji",
        fixable: true,
    },
    RuleInfo {
        code: no_sensitive_data::CODE,
        name: no_sensitive_data::NAME,
        description: "Log messages must not mention passwords, tokens, keys or other secrets",
        fixable: true,
    },
];

/// Looks up a built-in rule by name or code.
#[must_use]
pub fn find_rule(name_or_code: &str) -> Option<&'static RuleInfo> {
    RULES
        .iter()
        .find(|info| info.name == name_or_code || info.code.eq_ignore_ascii_case(name_or_code))
}

/// Returns all four rules, with the sensitive-data rule using the built-in
/// patterns followed by `settings.sensitive_patterns`.
///
/// # Errors
///
/// Returns [`PatternError`] if a configured pattern does not compile.
pub fn all_rules(settings: &Settings) -> Result<Vec<RuleBox>, PatternError> {
    let sensitive = patterns::compile_with_builtins(&settings.sensitive_patterns)?;
    Ok(vec![
        Box::new(LowercaseStart::new()),
        Box::new(EnglishOnly::new()),
        Box::new(NoSpecialChars::new()),
        Box::new(NoSensitiveData::new(sensitive)),
    ])
}

/// Builds an engine with every built-in rule, configured by `config`.
///
/// Pattern compilation happens here, once; a bad pattern fails the whole
/// construction.
///
/// # Errors
///
/// Returns [`PatternError`] if a configured pattern does not compile.
pub fn engine(config: &Config) -> Result<Engine, PatternError> {
    for name in config.rules.keys() {
        if find_rule(name).is_none() {
            tracing::warn!("Unknown rule in configuration: {}", name);
        }
    }

    let rules = all_rules(&config.settings)?;
    Ok(Engine::builder().rules(rules).config(config.clone()).build())
}
