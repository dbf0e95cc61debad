//! # logmsglint-go
//!
//! Tree-sitter based Go front end for logmsglint.
//!
//! Parses a Go file, lowers it into the `logmsglint-core` expression model
//! and fills a `TypeTable` with what a single file can prove:
//!
//! - import aliases (including `v2`-style module paths),
//! - lexical scopes with shadowing,
//! - declared and inferred types of variables, struct fields and calls
//!   to well-known logger constructors,
//! - method selections on typed values and uses of package-qualified
//!   functions.
//!
//! ```ignore
//! use logmsglint_go::{GoFrontend, SourceFrontend};
//!
//! let parsed = GoFrontend::new().parse(path, &source)?;
//! let violations = engine.check(&parsed.unit, &parsed.types);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frontend;
pub mod imports;
pub mod known;
mod lower;
pub mod scope;

pub use frontend::{FrontendError, GoFrontend, ParsedUnit, SourceFrontend};
