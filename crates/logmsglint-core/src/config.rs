//! Configuration types for logmsglint.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Keys accepted for the sensitive pattern list, checked in order.
const SENSITIVE_PATTERN_KEYS: &[&str] = &[
    "sensitive-patterns",
    "sensitive_patterns",
    "sensitivePatterns",
];

/// Top-level configuration for logmsglint.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Severity threshold at which `check` fails (default: warning).
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    pub analyzer: AnalyzerConfig,

    /// Engine settings.
    pub settings: Settings,

    /// Per-rule configurations.
    pub rules: HashMap<String, RuleConfig>,
}

/// On-disk shape of [`Config`]; `[settings]` is validated separately.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    fail_on: Option<Severity>,
    #[serde(default)]
    analyzer: AnalyzerConfig,
    #[serde(default)]
    settings: Option<toml::Value>,
    #[serde(default)]
    rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or `[settings]` has the wrong
    /// shape.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let settings = match &raw.settings {
            Some(value) => Settings::from_value(value)?,
            None => Settings::default(),
        };

        Ok(Self {
            fail_on: raw.fail_on,
            analyzer: raw.analyzer,
            settings,
            rules: raw.rules,
        })
    }

    /// Severity at which a run is considered failed.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Warning)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Settings that shape the engine itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Additional sensitive-data patterns (regular expression syntax),
    /// appended after the built-in set.
    pub sensitive_patterns: Vec<String>,
}

impl Settings {
    /// Creates settings with extra sensitive patterns.
    #[must_use]
    pub fn with_sensitive_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sensitive_patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads settings from a raw configuration value.
    ///
    /// The value must be a table. The pattern list may be given under
    /// `sensitive-patterns`, `sensitive_patterns` or `sensitivePatterns` (the
    /// first present key wins), either as one string or as a list of strings.
    /// Blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when the value is not a
    /// table, the list is neither a string nor an array, or an element is not
    /// a string.
    pub fn from_value(value: &toml::Value) -> Result<Self, ConfigError> {
        let table = value
            .as_table()
            .ok_or_else(|| ConfigError::InvalidConfiguration {
                key: "settings".to_string(),
                message: format!("expected a table, got {}", value.type_str()),
            })?;

        let Some((key, patterns)) = SENSITIVE_PATTERN_KEYS
            .iter()
            .find_map(|key| table.get(*key).map(|v| (*key, v)))
        else {
            return Ok(Self::default());
        };

        Ok(Self {
            sensitive_patterns: string_list(key, patterns)?,
        })
    }
}

fn string_list(key: &str, value: &toml::Value) -> Result<Vec<String>, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidConfiguration {
        key: key.to_string(),
        message,
    };

    match value {
        toml::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![trimmed.to_string()])
            }
        }
        toml::Value::Array(items) => {
            let mut patterns = Vec::with_capacity(items.len());
            for item in items {
                let s = item.as_str().ok_or_else(|| {
                    invalid(format!("list element is not a string: {}", item.type_str()))
                })?;
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    patterns.push(trimmed.to_string());
                }
            }
            Ok(patterns)
        }
        other => Err(invalid(format!(
            "expected a list of strings, got {}",
            other.type_str()
        ))),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A configuration value has a shape the engine does not understand.
    #[error("Invalid configuration for '{key}': {message}")]
    InvalidConfiguration {
        /// Offending key.
        key: String,
        /// What was wrong with it.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(toml_src: &str) -> toml::Value {
        toml::from_str(toml_src).expect("valid toml")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert!(config.settings.sensitive_patterns.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Warning);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "error"

[analyzer]
root = "./cmd"
exclude = ["**/generated/**"]

[settings]
sensitive-patterns = ["(?i)session[_-]?id", "(?i)client_secret"]

[rules.lowercase-start]
enabled = false

[rules.no-sensitive-data]
severity = "error"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./cmd"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert!(!config.is_rule_enabled("lowercase-start"));
        assert!(config.is_rule_enabled("english-only"));
        assert_eq!(
            config.rule_severity("no-sensitive-data"),
            Some(Severity::Error)
        );
        assert_eq!(
            config.settings.sensitive_patterns,
            vec!["(?i)session[_-]?id", "(?i)client_secret"]
        );
    }

    #[test]
    fn settings_accept_alternate_keys_and_single_string() {
        let settings = Settings::from_value(&value(r#"sensitivePatterns = "  (?i)ssn  ""#))
            .expect("valid settings");
        assert_eq!(settings.sensitive_patterns, vec!["(?i)ssn"]);

        let settings = Settings::from_value(&value(r#"sensitive_patterns = ["a", " ", "b"]"#))
            .expect("valid settings");
        assert_eq!(settings.sensitive_patterns, vec!["a", "b"]);
    }

    #[test]
    fn settings_without_patterns_are_default() {
        let settings = Settings::from_value(&value("other = 1")).expect("valid settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_reject_non_string_items() {
        let err = Settings::from_value(&value(r#"sensitive-patterns = ["ok", 42]"#))
            .expect_err("integer item must be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration { ref key, .. } if key == "sensitive-patterns"
        ));
    }

    #[test]
    fn settings_reject_wrong_shapes() {
        let err = Settings::from_value(&toml::Value::String("invalid".into()))
            .expect_err("string settings must be rejected");
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));

        let err = Settings::from_value(&value("sensitive-patterns = 3"))
            .expect_err("integer list must be rejected");
        assert!(err.to_string().contains("expected a list of strings"));
    }

    #[test]
    fn invalid_settings_fail_config_parse() {
        let result = Config::parse("[settings]\nsensitive-patterns = [true]\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }
}
