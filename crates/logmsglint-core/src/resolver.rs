//! Call-site resolution against the table of known logging APIs.
//!
//! Resolution goes through the declared identity of the called function,
//! never through its name alone: a project's own `Info` method is not a
//! logging call just because it is called `Info`.

use std::collections::HashMap;

use crate::ast::{Expr, ExprKind};
use crate::type_info::{FunctionIdentity, Object, StaticType, TypeResolver};

/// Package path of the standard library structured logger.
pub const SLOG_PACKAGE: &str = "log/slog";

/// Package path of zap (structured and sugared loggers).
pub const ZAP_PACKAGE: &str = "go.uber.org/zap";

const SLOG_METHODS: &[(&str, usize)] = &[
    ("Debug", 0),
    ("Info", 0),
    ("Warn", 0),
    ("Error", 0),
    ("DebugContext", 1),
    ("InfoContext", 1),
    ("WarnContext", 1),
    ("ErrorContext", 1),
    ("Log", 2),
    ("LogAttrs", 2),
];

const ZAP_METHODS: &[(&str, usize)] = &[
    // *zap.Logger
    ("Debug", 0),
    ("Info", 0),
    ("Warn", 0),
    ("Error", 0),
    ("DPanic", 0),
    ("Panic", 0),
    ("Fatal", 0),
    ("Log", 1),
    // *zap.SugaredLogger, printf style
    ("Debugf", 0),
    ("Infof", 0),
    ("Warnf", 0),
    ("Errorf", 0),
    ("DPanicf", 0),
    ("Panicf", 0),
    ("Fatalf", 0),
    // *zap.SugaredLogger, key-value style
    ("Debugw", 0),
    ("Infow", 0),
    ("Warnw", 0),
    ("Errorw", 0),
    ("DPanicw", 0),
    ("Panicw", 0),
    ("Fatalw", 0),
];

/// The message argument of a recognized logging call.
#[derive(Debug, Clone, Copy)]
pub struct MessageArgument<'a> {
    /// The argument expression as written.
    pub expr: &'a Expr,
    /// Zero-based argument index.
    pub index: usize,
}

/// Maps `(package path, function name)` to the message argument index.
#[derive(Debug, Clone)]
pub struct LoggingApiSpec {
    entries: HashMap<(String, String), usize>,
}

impl LoggingApiSpec {
    fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in `log/slog` and `go.uber.org/zap` families.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_family(SLOG_PACKAGE, SLOG_METHODS)
            .with_family(ZAP_PACKAGE, ZAP_METHODS)
    }

    fn with_family(mut self, package: &str, methods: &[(&str, usize)]) -> Self {
        for (name, index) in methods {
            self.entries
                .insert((package.to_owned(), (*name).to_owned()), *index);
        }
        self
    }

    /// Message argument index for a package function or method.
    #[must_use]
    pub fn message_index(&self, package: &str, name: &str) -> Option<usize> {
        self.entries
            .get(&(package.to_owned(), name.to_owned()))
            .copied()
    }

    /// Resolves `call` to its message argument if it targets a known logging
    /// API and the argument is string-typed.
    #[must_use]
    pub fn resolve<'a>(
        &self,
        call: &'a Expr,
        types: &dyn TypeResolver,
    ) -> Option<MessageArgument<'a>> {
        let ExprKind::Call { callee, args } = &call.kind else {
            return None;
        };

        let function = called_function(callee, types)?;
        let package = function.package.as_deref()?;
        let index = self.message_index(package, &function.name)?;

        let Some(expr) = args.get(index) else {
            tracing::debug!("{function} called with {} argument(s), skipping", args.len());
            return None;
        };

        let is_string = types
            .type_of(expr.strip_parens().id)
            .is_some_and(StaticType::is_string_like);
        if !is_string {
            tracing::trace!("message argument of {function} is not a string");
            return None;
        }

        Some(MessageArgument { expr, index })
    }
}

/// Statically known target of a call's callee expression.
fn called_function<'t>(callee: &Expr, types: &'t dyn TypeResolver) -> Option<&'t FunctionIdentity> {
    let object = match &callee.kind {
        ExprKind::Selector { field, .. } => types
            .selection(callee.id)
            .or_else(|| types.use_of(field.id)),
        ExprKind::Ident(_) => types.use_of(callee.id),
        _ => None,
    }?;

    match object {
        Object::Func(function) => Some(function),
        Object::Var(_) | Object::Package(_) => None,
    }
}
