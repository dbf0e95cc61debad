//! Host-neutral expression model.
//!
//! Front ends lower their syntax trees into [`Expr`] nodes. Every node that a
//! type-resolution table may annotate carries a [`NodeId`] that is unique
//! within its [`SourceUnit`].

use std::path::{Path, PathBuf};

/// Identifier of a node within a single source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A point in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

/// Half-open byte range `[start, end)` of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Start of the node.
    pub start: Position,
    /// End of the node (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a span from two positions.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binary operator of a [`ExprKind::Binary`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`, which is textual append when both operands are strings.
    Add,
    /// Any other operator, kept verbatim.
    Other(String),
}

/// An identifier that can be annotated on its own (e.g. a selector's field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Node id.
    pub id: NodeId,
    /// Identifier text.
    pub name: String,
    /// Source range.
    pub span: Span,
}

/// Shape of an expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// A string literal; `raw` is the source text including delimiters.
    StringLit {
        /// Literal as written, e.g. `"a\n"` or `` `raw` ``.
        raw: String,
    },
    /// A bare identifier.
    Ident(String),
    /// `operand.field`
    Selector {
        /// Receiver or package expression.
        operand: Box<Expr>,
        /// Selected member.
        field: Ident,
    },
    /// `callee(args...)`
    Call {
        /// Called expression.
        callee: Box<Expr>,
        /// Arguments in source order.
        args: Vec<Expr>,
    },
    /// `left op right`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `(inner)`
    Paren(Box<Expr>),
    /// Any other node. Child expressions are kept in document order so that
    /// calls nested inside (closures, composite literals, ...) stay visible.
    Other {
        /// Front-end specific node kind, for debugging.
        kind: String,
        /// Nested expressions.
        children: Vec<Expr>,
    },
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub span: Span,
    /// Node shape.
    pub kind: ExprKind,
}

impl Expr {
    /// Creates a new expression node.
    #[must_use]
    pub fn new(id: NodeId, span: Span, kind: ExprKind) -> Self {
        Self { id, span, kind }
    }

    /// Returns the expression with all enclosing parentheses removed.
    #[must_use]
    pub fn strip_parens(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    /// Returns true if this is a string literal (after stripping parentheses).
    #[must_use]
    pub fn is_string_literal(&self) -> bool {
        matches!(self.strip_parens().kind, ExprKind::StringLit { .. })
    }

    /// Visits this node and all descendants in pre-order (document order).
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        match &self.kind {
            ExprKind::StringLit { .. } | ExprKind::Ident(_) => {}
            ExprKind::Selector { operand, .. } => operand.walk(f),
            ExprKind::Call { callee, args } => {
                callee.walk(f);
                for arg in args {
                    arg.walk(f);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
            ExprKind::Paren(inner) => inner.walk(f),
            ExprKind::Other { children, .. } => {
                for child in children {
                    child.walk(f);
                }
            }
        }
    }
}

/// One compilation unit as handed over by a front end.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    /// Path of the file, relative to the project root when known.
    pub path: PathBuf,
    /// Root expressions in document order.
    pub exprs: Vec<Expr>,
}

impl SourceUnit {
    /// Creates an empty unit for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exprs: Vec::new(),
        }
    }

    /// Path of the unit.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every call expression in document order.
    #[must_use]
    pub fn calls(&self) -> Vec<&Expr> {
        let mut calls = Vec::new();
        for root in &self.exprs {
            root.walk(&mut |expr| {
                if matches!(expr.kind, ExprKind::Call { .. }) {
                    calls.push(expr);
                }
            });
        }
        calls
    }
}

/// Hands out sequential [`NodeId`]s while a front end lowers a tree.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    /// Creates a generator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
