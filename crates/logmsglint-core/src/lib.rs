//! # logmsglint-core
//!
//! Core engine for checking the text of structured-logging calls.
//!
//! Front ends lower source files into the [`ast`] expression model and fill a
//! [`TypeTable`]. The [`Engine`] then:
//!
//! - resolves calls to known logging APIs by declared identity
//!   ([`LoggingApiSpec`]),
//! - extracts the literal fragments of the message argument
//!   ([`extract_literals`]),
//! - runs every [`MessageRule`] over the fragments,
//! - reports [`Violation`]s, with a rewrite only when the message is a single
//!   literal.
//!
//! ## Example
//!
//! ```ignore
//! use logmsglint_core::{Engine, Severity};
//!
//! let engine = Engine::builder()
//!     .rules(my_rules)
//!     .build();
//!
//! let violations = engine.check(&unit, &types);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod config;
pub mod diagnostic;
mod engine;
mod extract;
pub mod literal;
mod resolver;
mod rule;
mod type_info;
mod types;

pub use ast::{Expr, ExprKind, NodeId, SourceUnit, Span};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, Settings};
pub use engine::{Engine, EngineBuilder};
pub use extract::extract_literals;
pub use resolver::{LoggingApiSpec, MessageArgument, SLOG_PACKAGE, ZAP_PACKAGE};
pub use rule::{Finding, FragmentPosition, MessageRule, RuleBox};
pub use type_info::{FunctionIdentity, Object, StaticType, TypeResolver, TypeTable};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
