//! Go source front end using Tree-sitter.

use std::path::{Path, PathBuf};

use logmsglint_core::{SourceUnit, TypeTable};
use tree_sitter::{Language, Parser};

use crate::lower::Lowerer;

/// Errors raised by a front end.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load the Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("parser produced no syntax tree for {path}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
    },
}

/// A lowered file together with its type annotations.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    /// Expression trees of the file.
    pub unit: SourceUnit,
    /// Resolution results for the expressions in `unit`.
    pub types: TypeTable,
}

/// Turns source text into [`ParsedUnit`]s.
///
/// Implement this to check log calls in another language.
pub trait SourceFrontend: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this front end handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses and lowers one file.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file could not be parsed at all.
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedUnit, FrontendError>;

    /// Returns true if `path` has one of [`extensions`](Self::extensions).
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

/// Front end for Go sources.
pub struct GoFrontend {
    language: Language,
}

impl GoFrontend {
    /// Creates a new Go front end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFrontend for GoFrontend {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    /// Syntax errors are tolerated: Tree-sitter recovers and the remaining
    /// tree is lowered as usual.
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedUnit, FrontendError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| FrontendError::Parse {
                path: path.to_path_buf(),
            })?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("{} has syntax errors, using the recovered tree", path.display());
        }

        let (exprs, types) = Lowerer::new(source.as_bytes()).lower_file(root);
        let mut unit = SourceUnit::new(path);
        unit.exprs = exprs;

        Ok(ParsedUnit { unit, types })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsglint_core::{
        ExprKind, FunctionIdentity, Object, StaticType, TypeResolver, SLOG_PACKAGE, ZAP_PACKAGE,
    };

    fn parse(src: &str) -> ParsedUnit {
        GoFrontend::new()
            .parse(Path::new("main.go"), src)
            .expect("parses")
    }

    /// Identity of the function each call in the file resolves to, in
    /// document order; `None` for unresolved calls.
    fn call_targets(parsed: &ParsedUnit) -> Vec<Option<FunctionIdentity>> {
        parsed
            .unit
            .calls()
            .into_iter()
            .map(|call| {
                let ExprKind::Call { callee, .. } = &call.kind else {
                    return None;
                };
                let object = match &callee.kind {
                    ExprKind::Selector { field, .. } => parsed
                        .types
                        .selection(callee.id)
                        .or_else(|| parsed.types.use_of(field.id)),
                    ExprKind::Ident(_) => parsed.types.use_of(callee.id),
                    _ => None,
                };
                match object {
                    Some(Object::Func(identity)) => Some(identity.clone()),
                    _ => None,
                }
            })
            .collect()
    }

    fn zap_method(receiver: &str, name: &str) -> Option<FunctionIdentity> {
        Some(FunctionIdentity::method(ZAP_PACKAGE, receiver, name))
    }

    #[test]
    fn handles_go_files_only() {
        let frontend = GoFrontend::new();
        assert!(frontend.handles(Path::new("cmd/main.go")));
        assert!(!frontend.handles(Path::new("main.rs")));
        assert!(!frontend.handles(Path::new("Makefile")));
    }

    #[test]
    fn package_function_call() {
        let parsed = parse(
            r#"package main

import "log/slog"

func main() {
	slog.Info("started")
}
"#,
        );
        assert_eq!(
            call_targets(&parsed),
            vec![Some(FunctionIdentity::function(SLOG_PACKAGE, "Info"))]
        );
    }

    #[test]
    fn aliased_import() {
        let parsed = parse(
            r#"package main

import (
	zlog "go.uber.org/zap"
)

func main() {
	l := zlog.NewNop()
	l.Info("started")
}
"#,
        );
        let targets = call_targets(&parsed);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1], zap_method("Logger", "Info"));
    }

    #[test]
    fn sugar_chain_and_multi_value_constructor() {
        let parsed = parse(
            r#"package main

import "go.uber.org/zap"

func main() {
	logger, err := zap.NewProduction()
	if err != nil {
		return
	}
	sugar := logger.Sugar().Named("api")
	sugar.Infow("ready")
}
"#,
        );
        let targets = call_targets(&parsed);
        assert_eq!(targets.last().cloned().flatten(), zap_method("SugaredLogger", "Infow"));
    }

    #[test]
    fn method_on_local_type_is_not_a_library_method() {
        let parsed = parse(
            r#"package main

type audit struct{}

func (a *audit) Info(msg string) {}

func main() {
	a := &audit{}
	var b audit
	b.Info("Hello")
	a.Info("Hello")
}
"#,
        );
        for target in call_targets(&parsed).into_iter().flatten() {
            assert_eq!(target.package.as_deref(), Some("main"));
        }
    }

    #[test]
    fn struct_field_of_logger_type() {
        let parsed = parse(
            r#"package main

import "log/slog"

type server struct {
	log *slog.Logger
}

func (s *server) run() {
	s.log.Warn("slow request")
}
"#,
        );
        assert_eq!(
            call_targets(&parsed),
            vec![Some(FunctionIdentity::method(SLOG_PACKAGE, "Logger", "Warn"))]
        );
    }

    #[test]
    fn embedded_logger_promotes_methods() {
        let parsed = parse(
            r#"package main

import "go.uber.org/zap"

type app struct {
	*zap.Logger
}

func run(a app) {
	a.Error("boom")
}
"#,
        );
        assert_eq!(call_targets(&parsed), vec![zap_method("Logger", "Error")]);
    }

    #[test]
    fn local_variable_shadows_import() {
        let parsed = parse(
            r#"package main

import "log/slog"

type fake struct{}

func (fake) Info(string) {}

func main() {
	slog := fake{}
	slog.Info("Hello")
}
"#,
        );
        let targets = call_targets(&parsed);
        assert_eq!(
            targets.last().cloned().flatten(),
            Some(FunctionIdentity::method("main", "fake", "Info"))
        );
    }

    #[test]
    fn string_typing() {
        let parsed = parse(
            r#"package main

import "fmt"

type label string

func main() {
	name := "x"
	var l label = "y"
	_ = fmt.Sprintf("%s", name) + string(l) + ("z")
}
"#,
        );
        let root = parsed.unit.exprs.last().expect("assignment value");
        assert_eq!(parsed.types.type_of(root.id), Some(&StaticType::String));
    }

    #[test]
    fn package_level_logger() {
        let parsed = parse(
            r#"package main

import "log/slog"

func main() {
	logger.Info("ok")
}

var logger = slog.Default()
"#,
        );
        assert_eq!(
            call_targets(&parsed).first().cloned().flatten(),
            Some(FunctionIdentity::method(SLOG_PACKAGE, "Logger", "Info"))
        );
    }

    #[test]
    fn calls_inside_closures_are_visible() {
        let parsed = parse(
            r#"package main

import "log/slog"

func main() {
	go func() {
		slog.Error("worker failed")
	}()
}
"#,
        );
        assert!(call_targets(&parsed)
            .contains(&Some(FunctionIdentity::function(SLOG_PACKAGE, "Error"))));
    }

    #[test]
    fn broken_source_still_lowers() {
        let parsed = parse(
            r#"package main

import "log/slog"

func main() {
	slog.Info("a"
	slog.Warn("b")
}
"#,
        );
        assert!(!parsed.unit.calls().is_empty());
    }

    #[test]
    fn empty_source() {
        let parsed = parse("");
        assert!(parsed.unit.exprs.is_empty());
    }
}
