//! Turns rule findings into reportable violations.

use std::path::Path;

use crate::ast::Expr;
use crate::literal;
use crate::rule::{Finding, MessageRule};
use crate::types::{Location, Replacement, Severity, Suggestion, Violation};

/// Help text attached to rewrites.
pub const FIX_MESSAGE: &str = "rewrite the log message";

/// Builds the violation for `finding`, anchored on the whole message argument.
///
/// A replacement is attached only when `rewrite_allowed` holds (the argument
/// is a single literal) and the fixed text is non-empty and differs from the
/// original. The replacement covers the full argument span.
#[must_use]
pub fn build(
    file: &Path,
    message_expr: &Expr,
    rule: &dyn MessageRule,
    severity: Severity,
    finding: &Finding,
    rewrite_allowed: bool,
) -> Violation {
    let location = Location::from_span(file.to_path_buf(), message_expr.span);
    let violation = Violation::new(
        rule.code(),
        rule.name(),
        severity,
        location.clone(),
        rule.message(),
    );

    match finding.fixed.as_deref() {
        Some(fixed) if rewrite_allowed && !fixed.is_empty() && fixed != finding.original => {
            let replacement = Replacement::new(location, literal::quote(fixed));
            violation.with_suggestion(Suggestion::with_fix(FIX_MESSAGE, replacement))
        }
        _ => violation,
    }
}

/// Whether a message argument may be rewritten as a whole: it must be a
/// single string literal, parentheses aside.
#[must_use]
pub fn rewrite_allowed(message_expr: &Expr) -> bool {
    message_expr.is_string_literal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind, NodeId, Position, Span};
    use crate::rule::FragmentPosition;

    struct Shout;

    impl MessageRule for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn message(&self) -> &'static str {
            "too loud"
        }
        fn check(&self, _text: &str, _position: FragmentPosition) -> Option<Finding> {
            None
        }
    }

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            Position {
                offset: start,
                line: 3,
                column: start + 1,
            },
            Position {
                offset: end,
                line: 3,
                column: end + 1,
            },
        )
    }

    fn literal(raw: &str) -> Expr {
        Expr::new(
            NodeId(0),
            span(10, 10 + raw.len()),
            ExprKind::StringLit { raw: raw.into() },
        )
    }

    #[test]
    fn single_literal_gets_rewrite() {
        let expr = literal("\"Failed!\"");
        let finding = Finding::with_fix("Failed!", "failed!");
        let v = build(
            Path::new("main.go"),
            &expr,
            &Shout,
            Severity::Warning,
            &finding,
            rewrite_allowed(&expr),
        );

        let replacement = v.replacement().expect("rewrite expected");
        assert_eq!(replacement.new_text, "\"failed!\"");
        assert_eq!(replacement.location.offset, 10);
        assert_eq!(replacement.location.length, 9);
        assert_eq!(v.location.line, 3);
        assert_eq!(v.code, "TEST002");
        assert_eq!(v.message, "too loud");
    }

    #[test]
    fn concatenation_is_advisory_only() {
        let left = literal("\"Token: \"");
        let right = Expr::new(NodeId(1), span(22, 27), ExprKind::Ident("token".into()));
        let expr = Expr::new(
            NodeId(2),
            span(10, 27),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(left),
                right: Box::new(right),
            },
        );
        assert!(!rewrite_allowed(&expr));

        let finding = Finding::with_fix("Token: ", "token: ");
        let v = build(
            Path::new("main.go"),
            &expr,
            &Shout,
            Severity::Warning,
            &finding,
            rewrite_allowed(&expr),
        );
        assert!(v.suggestion.is_none());
        assert_eq!(v.location.length, 17);
    }

    #[test]
    fn unchanged_or_empty_fix_is_dropped() {
        let expr = literal("\"!!!\"");
        for finding in [Finding::with_fix("!!!", ""), Finding::with_fix("ok", "ok"), Finding::new("x")] {
            let v = build(
                Path::new("main.go"),
                &expr,
                &Shout,
                Severity::Warning,
                &finding,
                true,
            );
            assert!(v.replacement().is_none());
        }
    }

    #[test]
    fn rewrite_is_reencoded() {
        let expr = literal(r#""\nHello""#);
        let finding = Finding::with_fix("\nHello", "\nhello");
        let v = build(Path::new("main.go"), &expr, &Shout, Severity::Warning, &finding, true);
        assert_eq!(v.replacement().map(|r| r.new_text.as_str()), Some(r#""\nhello""#));
    }
}
