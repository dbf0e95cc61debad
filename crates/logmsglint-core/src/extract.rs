//! Literal text extraction from message expressions.

use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::literal;

/// Collects every string literal fragment of `expr` in left-to-right order.
///
/// Only literal leaves and `+` nodes are understood. Any other node
/// contributes nothing without stopping the walk, so literals elsewhere in a
/// concatenation are still found. Literals that fail to decode are skipped.
#[must_use]
pub fn extract_literals(expr: &Expr) -> Vec<String> {
    let mut fragments = Vec::new();
    collect(expr, &mut fragments);
    fragments
}

fn collect(expr: &Expr, out: &mut Vec<String>) {
    match &expr.strip_parens().kind {
        ExprKind::StringLit { raw } => match literal::unquote(raw) {
            Some(text) => out.push(text),
            None => tracing::trace!("Skipping undecodable literal {raw}"),
        },
        ExprKind::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } => {
            collect(left, out);
            collect(right, out);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeIdGen, Span};

    struct Builder(NodeIdGen);

    impl Builder {
        fn new() -> Self {
            Self(NodeIdGen::new())
        }

        fn node(&mut self, kind: ExprKind) -> Expr {
            Expr::new(self.0.fresh(), Span::default(), kind)
        }

        fn lit(&mut self, raw: &str) -> Expr {
            self.node(ExprKind::StringLit { raw: raw.into() })
        }

        fn ident(&mut self, name: &str) -> Expr {
            self.node(ExprKind::Ident(name.into()))
        }

        fn add(&mut self, left: Expr, right: Expr) -> Expr {
            self.node(ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(left),
                right: Box::new(right),
            })
        }

        fn paren(&mut self, inner: Expr) -> Expr {
            self.node(ExprKind::Paren(Box::new(inner)))
        }

        fn call(&mut self, name: &str) -> Expr {
            let callee = self.ident(name);
            self.node(ExprKind::Call {
                callee: Box::new(callee),
                args: vec![],
            })
        }
    }

    #[test]
    fn single_literal() {
        let mut b = Builder::new();
        let expr = b.lit("\"simple message\"");
        assert_eq!(extract_literals(&expr), vec!["simple message"]);
    }

    #[test]
    fn literal_plus_variable() {
        let mut b = Builder::new();
        let left = b.lit("\"user password: \"");
        let right = b.ident("password");
        let expr = b.add(left, right);
        assert_eq!(extract_literals(&expr), vec!["user password: "]);
    }

    #[test]
    fn nested_concatenation_keeps_order() {
        let mut b = Builder::new();
        let a = b.lit("\"a\"");
        let inner_left = b.lit("\"b\"");
        let dynamic = b.call("dynamic");
        let inner = b.add(inner_left, dynamic);
        let grouped = b.paren(inner);
        let expr = b.add(a, grouped);
        assert_eq!(extract_literals(&expr), vec!["a", "b"]);
    }

    #[test]
    fn no_literals_yields_nothing() {
        let mut b = Builder::new();
        let left = b.ident("left");
        let right = b.ident("right");
        let expr = b.add(left, right);
        assert!(extract_literals(&expr).is_empty());
    }

    #[test]
    fn other_operators_are_inert() {
        let mut b = Builder::new();
        let left = b.lit("\"a\"");
        let right = b.lit("\"b\"");
        let expr = b.node(ExprKind::Binary {
            op: BinaryOp::Other("==".into()),
            left: Box::new(left),
            right: Box::new(right),
        });
        assert!(extract_literals(&expr).is_empty());
    }

    #[test]
    fn bad_literal_does_not_hide_siblings() {
        let mut b = Builder::new();
        let bad = b.lit(r#""bad \q""#);
        let good = b.lit("\"token\"");
        let expr = b.add(bad, good);
        assert_eq!(extract_literals(&expr), vec!["token"]);
    }

    #[test]
    fn raw_literal_in_concatenation() {
        let mut b = Builder::new();
        let left = b.lit("\"raw: \"");
        let right = b.lit("`user token leaked\nin multiline raw string`");
        let expr = b.add(left, right);
        assert_eq!(
            extract_literals(&expr),
            vec!["raw: ", "user token leaked\nin multiline raw string"]
        );
    }
}
