//! # logmsglint-rules
//!
//! Built-in log message rules for logmsglint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | LM001 | `lowercase-start` | Message must start with a lowercase letter |
//! | LM002 | `english-only` | Message must only use Latin letters |
//! | LM003 | `no-special-chars` | Message must not contain `!`, `?`, ellipses or emoji |
//! | LM004 | `no-sensitive-data` | Message must not mention secrets |
//!
//! ## Usage
//!
//! ```ignore
//! use logmsglint_core::Config;
//!
//! let config = Config::from_file(path)?;
//! let engine = logmsglint_rules::engine(&config)?;
//! let violations = engine.check(&unit, &types);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod english_only;
pub mod lowercase_start;
pub mod no_sensitive_data;
pub mod no_special_chars;
pub mod patterns;
mod presets;

pub use english_only::EnglishOnly;
pub use lowercase_start::LowercaseStart;
pub use no_sensitive_data::NoSensitiveData;
pub use no_special_chars::NoSpecialChars;
pub use patterns::{PatternError, SensitivePattern};
pub use presets::{all_rules, engine, find_rule, RuleInfo, RULES};

/// Re-export core types for convenience.
pub use logmsglint_core::{MessageRule, Severity, Violation};
