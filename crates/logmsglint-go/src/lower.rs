//! Lowering of a Go syntax tree into the core expression model.
//!
//! Lowering happens in two passes over the top-level declarations. The first
//! pass collects the package name, imports, type declarations and function
//! signatures. The second pass walks every declaration and statement, emits
//! expression trees and fills the [`TypeTable`] as it goes: identifier uses,
//! method selections and the static types it can prove.
//!
//! Resolution is single-file and conservative. Whatever cannot be proven is
//! left unannotated, which the core treats as "not a logging call".

use std::collections::HashMap;

use logmsglint_core::ast::{BinaryOp, Ident, NodeIdGen, Position};
use logmsglint_core::{
    Expr, ExprKind, FunctionIdentity, NodeId, Object, Span, StaticType, TypeResolver, TypeTable,
};
use tree_sitter::Node;

use crate::imports::ImportTable;
use crate::known;
use crate::scope::Scopes;

/// Embedding chains deeper than this are not followed.
const MAX_EMBEDDING_DEPTH: usize = 4;

/// Source text of `node`.
pub(crate) fn node_text<'s>(node: Node<'_>, src: &'s [u8]) -> &'s str {
    node.utf8_text(src).unwrap_or("")
}

fn span_of(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        Position {
            offset: node.start_byte(),
            line: start.row + 1,
            column: start.column + 1,
        },
        Position {
            offset: node.end_byte(),
            line: end.row + 1,
            column: end.column + 1,
        },
    )
}

/// Named children without comments, which may appear anywhere.
fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    nodes
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == token);
    found
}

fn is_expression(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "interpreted_string_literal"
            | "raw_string_literal"
            | "int_literal"
            | "float_literal"
            | "imaginary_literal"
            | "rune_literal"
            | "true"
            | "false"
            | "nil"
            | "iota"
            | "call_expression"
            | "selector_expression"
            | "binary_expression"
            | "unary_expression"
            | "parenthesized_expression"
            | "index_expression"
            | "slice_expression"
            | "type_assertion_expression"
            | "type_conversion_expression"
            | "type_instantiation_expression"
            | "composite_literal"
            | "func_literal"
    )
}

fn is_type(kind: &str) -> bool {
    kind.ends_with("_type")
        || matches!(
            kind,
            "type_identifier"
                | "type_arguments"
                | "type_parameter_list"
                | "field_identifier"
                | "package_identifier"
                | "label_name"
        )
}

fn is_comparison(op: &str) -> bool {
    matches!(op, "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||")
}

fn deref(ty: &StaticType) -> &StaticType {
    match ty {
        StaticType::Pointer(inner) => deref(inner),
        other => other,
    }
}

/// A type declared in the file being lowered.
#[derive(Debug, Default)]
struct LocalType {
    underlying: Option<StaticType>,
    fields: HashMap<String, StaticType>,
    embedded: Vec<StaticType>,
}

/// Top-level declarations, collected before any body is lowered.
#[derive(Debug, Default)]
struct Declarations {
    types: HashMap<String, LocalType>,
    aliases: HashMap<String, StaticType>,
    functions: HashMap<String, Vec<StaticType>>,
    methods: HashMap<(String, String), Vec<StaticType>>,
}

/// What a selector `x.name` on a typed value refers to.
enum Member {
    Field(StaticType),
    Method(FunctionIdentity),
}

/// Lowers one file. Consumed by [`Lowerer::lower_file`].
pub(crate) struct Lowerer<'s> {
    src: &'s [u8],
    package: String,
    ids: NodeIdGen,
    types: TypeTable,
    imports: ImportTable,
    scopes: Scopes,
    decls: Declarations,
    /// Result types of calls, also for calls returning several values.
    results: HashMap<NodeId, Vec<StaticType>>,
}

impl<'s> Lowerer<'s> {
    pub(crate) fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            package: String::new(),
            ids: NodeIdGen::new(),
            types: TypeTable::new(),
            imports: ImportTable::new(),
            scopes: Scopes::new(),
            decls: Declarations::default(),
            results: HashMap::new(),
        }
    }

    /// Lowers a `source_file` node into root expressions (in document order)
    /// and their annotations.
    pub(crate) fn lower_file(mut self, root: Node<'_>) -> (Vec<Expr>, TypeTable) {
        let top = children(root);

        for node in &top {
            match node.kind() {
                "package_clause" => {
                    if let Some(name) = children(*node).first() {
                        self.package = node_text(*name, self.src).to_string();
                    }
                }
                "import_declaration" => self.imports.collect(*node, self.src),
                _ => {}
            }
        }

        self.collect_types(&top);
        self.collect_signatures(&top);

        let mut exprs = Vec::new();
        // package-level variables first, so that function bodies see them
        for node in &top {
            if matches!(node.kind(), "var_declaration" | "const_declaration") {
                self.visit(*node, &mut exprs);
            }
        }
        for node in &top {
            if !matches!(node.kind(), "var_declaration" | "const_declaration") {
                self.visit(*node, &mut exprs);
            }
        }
        exprs.sort_by_key(|expr| expr.span.start.offset);

        tracing::trace!(
            "Lowered package {:?}: {} root expression(s), {} typed node(s)",
            self.package,
            exprs.len(),
            self.types.typed_len()
        );
        (exprs, self.types)
    }

    // ---- declarations ----------------------------------------------------

    fn type_specs<'t>(top: &[Node<'t>]) -> Vec<Node<'t>> {
        top.iter()
            .filter(|node| node.kind() == "type_declaration")
            .flat_map(|node| children(*node))
            .filter(|spec| matches!(spec.kind(), "type_spec" | "type_alias"))
            .collect()
    }

    fn collect_types(&mut self, top: &[Node<'_>]) {
        let specs = Self::type_specs(top);

        // names first, so that declarations can refer to each other
        for spec in &specs {
            if spec.kind() == "type_spec" {
                if let Some(name) = spec.child_by_field_name("name") {
                    let name = node_text(name, self.src).to_string();
                    self.decls.types.insert(name, LocalType::default());
                }
            }
        }

        for spec in &specs {
            let (Some(name), Some(ty)) = (
                spec.child_by_field_name("name"),
                spec.child_by_field_name("type"),
            ) else {
                continue;
            };
            let name = node_text(name, self.src).to_string();

            if spec.kind() == "type_alias" {
                let target = self.lower_type(ty);
                self.decls.aliases.insert(name, target);
                continue;
            }

            let local = if ty.kind() == "struct_type" {
                self.struct_layout(ty)
            } else {
                LocalType {
                    underlying: Some(self.lower_type(ty)),
                    ..LocalType::default()
                }
            };
            self.decls.types.insert(name, local);
        }
    }

    fn struct_layout(&self, struct_type: Node<'_>) -> LocalType {
        let mut local = LocalType {
            underlying: Some(StaticType::Other("struct".to_string())),
            ..LocalType::default()
        };

        let field_lists = children(struct_type)
            .into_iter()
            .filter(|child| child.kind() == "field_declaration_list");
        for list in field_lists {
            for field in children(list) {
                if field.kind() != "field_declaration" {
                    continue;
                }
                let Some(ty_node) = field.child_by_field_name("type") else {
                    continue;
                };
                let ty = self.lower_type(ty_node);
                let names = self.field_names(field, "name");

                if names.is_empty() {
                    // embedded: the field is named after its type
                    let type_name = match deref(&ty) {
                        StaticType::Named { name, .. } => Some(name.clone()),
                        _ => None,
                    };
                    if let Some(type_name) = type_name {
                        local.fields.insert(type_name, ty.clone());
                    }
                    local.embedded.push(ty);
                } else {
                    for name in names {
                        local.fields.insert(name, ty.clone());
                    }
                }
            }
        }
        local
    }

    fn collect_signatures(&mut self, top: &[Node<'_>]) {
        for node in top {
            let Some(name) = node.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(name, self.src).to_string();
            let results = self.result_types(node.child_by_field_name("result"));

            match node.kind() {
                "function_declaration" => {
                    self.decls.functions.insert(name, results);
                }
                "method_declaration" => {
                    if let Some(receiver) = node
                        .child_by_field_name("receiver")
                        .and_then(|r| self.receiver_type_name(r))
                    {
                        self.decls.methods.insert((receiver, name), results);
                    }
                }
                _ => {}
            }
        }
    }

    fn receiver_type_name(&self, receiver: Node<'_>) -> Option<String> {
        let param = children(receiver)
            .into_iter()
            .find(|p| p.kind() == "parameter_declaration")?;
        let mut ty = param.child_by_field_name("type")?;
        loop {
            match ty.kind() {
                "pointer_type" | "parenthesized_type" => ty = *children(ty).first()?,
                "generic_type" => ty = ty.child_by_field_name("type")?,
                "type_identifier" => return Some(node_text(ty, self.src).to_string()),
                _ => return None,
            }
        }
    }

    fn result_types(&self, result: Option<Node<'_>>) -> Vec<StaticType> {
        let Some(result) = result else {
            return Vec::new();
        };
        if result.kind() != "parameter_list" {
            return vec![self.lower_type(result)];
        }

        let mut types = Vec::new();
        for param in children(result) {
            let Some(ty) = param.child_by_field_name("type") else {
                continue;
            };
            let ty = self.lower_type(ty);
            let count = self.field_names(param, "name").len().max(1);
            types.extend(std::iter::repeat(ty).take(count));
        }
        types
    }

    fn field_names(&self, node: Node<'_>, field: &str) -> Vec<String> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name(field, &mut cursor)
            .map(|n| node_text(n, self.src).to_string())
            .collect();
        names
    }

    // ---- types -------------------------------------------------------------

    fn local_named(&self, name: &str) -> StaticType {
        let underlying = self
            .decls
            .types
            .get(name)
            .and_then(|local| local.underlying.clone())
            .unwrap_or_else(|| StaticType::Other("named".to_string()));
        StaticType::Named {
            package: self.package.clone(),
            name: name.to_string(),
            underlying: Box::new(underlying),
        }
    }

    fn lower_type(&self, node: Node<'_>) -> StaticType {
        match node.kind() {
            "type_identifier" => {
                let name = node_text(node, self.src);
                if let Some(target) = self.decls.aliases.get(name) {
                    target.clone()
                } else if self.decls.types.contains_key(name) {
                    self.local_named(name)
                } else if name == "string" {
                    StaticType::String
                } else {
                    StaticType::Other(name.to_string())
                }
            }
            "pointer_type" => {
                let inner = children(node).first().map_or_else(
                    || StaticType::Other(String::new()),
                    |inner| self.lower_type(*inner),
                );
                StaticType::Pointer(Box::new(inner))
            }
            "qualified_type" => {
                let package = node
                    .child_by_field_name("package")
                    .and_then(|p| self.imports.resolve(node_text(p, self.src)));
                let name = node.child_by_field_name("name");
                match (package, name) {
                    (Some(package), Some(name)) => {
                        known::external(package, node_text(name, self.src))
                    }
                    _ => StaticType::Other(node_text(node, self.src).to_string()),
                }
            }
            "parenthesized_type" => children(node).first().map_or_else(
                || StaticType::Other(String::new()),
                |inner| self.lower_type(*inner),
            ),
            "generic_type" => node.child_by_field_name("type").map_or_else(
                || StaticType::Other("generic".to_string()),
                |base| self.lower_type(base),
            ),
            other => StaticType::Other(other.to_string()),
        }
    }

    fn type_of(&self, expr: &Expr) -> Option<StaticType> {
        self.types.type_of(expr.id).cloned()
    }

    // ---- statements --------------------------------------------------------

    fn visit(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        match node.kind() {
            "function_declaration" | "method_declaration" => self.lower_function(node, out),
            "block" | "if_statement" | "for_statement" | "expression_switch_statement"
            | "select_statement" | "expression_case" | "default_case" | "type_case"
            | "communication_case" => {
                self.scopes.push();
                self.visit_children(node, out);
                self.scopes.pop();
            }
            "type_switch_statement" => self.visit_type_switch(node, out),
            "short_var_declaration" => self.visit_short_var(node, out),
            "var_spec" | "const_spec" => self.visit_spec(node, out),
            "range_clause" | "receive_statement" => self.visit_declaring(node, out),
            "package_clause" | "import_declaration" | "type_declaration" | "comment" => {}
            kind if is_expression(kind) => {
                let expr = self.lower_expr(node);
                out.push(expr);
            }
            kind if is_type(kind) => {}
            _ => self.visit_children(node, out),
        }
    }

    fn visit_children(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        for child in children(node) {
            self.visit(child, out);
        }
    }

    /// Functions, methods and function literals: parameters and named results
    /// are bound in a fresh scope around the body.
    fn lower_function(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        self.scopes.push();
        for field in ["receiver", "parameters", "result"] {
            if let Some(list) = node.child_by_field_name(field) {
                if list.kind() == "parameter_list" {
                    self.declare_parameters(list);
                }
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, out);
        }
        self.scopes.pop();
    }

    fn declare_parameters(&mut self, list: Node<'_>) {
        for param in children(list) {
            let ty = param.child_by_field_name("type").map(|ty| {
                if param.kind() == "variadic_parameter_declaration" {
                    StaticType::Other("variadic".to_string())
                } else {
                    self.lower_type(ty)
                }
            });
            for name in self.field_names(param, "name") {
                self.scopes.declare(&name, ty.clone());
            }
        }
    }

    fn visit_short_var(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        let values = node
            .child_by_field_name("right")
            .map(|right| self.lower_list(right))
            .unwrap_or_default();
        let names = node
            .child_by_field_name("left")
            .map(|left| self.identifiers(left))
            .unwrap_or_default();

        let types = self.value_types(&values, names.len());
        for (i, name) in names.iter().enumerate() {
            self.scopes.declare(name, types.get(i).cloned().flatten());
        }
        out.extend(values);
    }

    fn visit_spec(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        let names = self.field_names(node, "name");
        let declared = node.child_by_field_name("type").map(|ty| self.lower_type(ty));
        let values = node
            .child_by_field_name("value")
            .map(|value| self.lower_list(value))
            .unwrap_or_default();

        let inferred = self.value_types(&values, names.len());
        for (i, name) in names.iter().enumerate() {
            let ty = declared
                .clone()
                .or_else(|| inferred.get(i).cloned().flatten());
            self.scopes.declare(name, ty);
        }
        out.extend(values);
    }

    /// `range` clauses and `select` receives, which bind their left side
    /// with `:=` and assign to it with `=`.
    fn visit_declaring(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        if let Some(right) = node.child_by_field_name("right") {
            let expr = self.lower_expr(right);
            out.push(expr);
        }
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        if has_token(node, ":=") {
            for name in self.identifiers(left) {
                self.scopes.declare(&name, None);
            }
        } else {
            let targets = self.lower_list(left);
            out.extend(targets);
        }
    }

    fn visit_type_switch(&mut self, node: Node<'_>, out: &mut Vec<Expr>) {
        self.scopes.push();
        if let Some(init) = node.child_by_field_name("initializer") {
            self.visit(init, out);
        }
        if let Some(value) = node.child_by_field_name("value") {
            let expr = self.lower_expr(value);
            out.push(expr);
        }
        if let Some(alias) = node.child_by_field_name("alias") {
            for name in self.identifiers(alias) {
                self.scopes.declare(&name, None);
            }
        }
        for child in children(node) {
            if matches!(child.kind(), "type_case" | "default_case") {
                self.visit(child, out);
            }
        }
        self.scopes.pop();
    }

    /// Types of the values assigned to `names` targets. A single call on the
    /// right of several targets spreads its results over them.
    fn value_types(&self, values: &[Expr], names: usize) -> Vec<Option<StaticType>> {
        if let [single] = values {
            if names > 1 {
                let results = self.results.get(&single.strip_parens().id);
                return (0..names)
                    .map(|i| results.and_then(|r| r.get(i).cloned()))
                    .collect();
            }
        }
        values.iter().map(|value| self.type_of(value)).collect()
    }

    fn identifiers(&self, list: Node<'_>) -> Vec<String> {
        let nodes = if list.kind() == "expression_list" {
            children(list)
        } else {
            vec![list]
        };
        nodes
            .into_iter()
            .filter(|n| n.kind() == "identifier")
            .map(|n| node_text(n, self.src).to_string())
            .collect()
    }

    // ---- expressions -------------------------------------------------------

    fn lower_list(&mut self, list: Node<'_>) -> Vec<Expr> {
        if list.kind() != "expression_list" {
            return vec![self.lower_expr(list)];
        }
        children(list)
            .into_iter()
            .map(|child| self.lower_expr(child))
            .collect()
    }

    fn lower_children(&mut self, node: Node<'_>) -> Vec<Expr> {
        children(node)
            .into_iter()
            .filter(|child| !is_type(child.kind()))
            .map(|child| self.lower_expr(child))
            .collect()
    }

    fn other(&mut self, id: NodeId, span: Span, node: Node<'_>) -> Expr {
        let children = self.lower_children(node);
        Expr::new(
            id,
            span,
            ExprKind::Other {
                kind: node.kind().to_string(),
                children,
            },
        )
    }

    fn lower_expr(&mut self, node: Node<'_>) -> Expr {
        let id = self.ids.fresh();
        let span = span_of(node);

        match node.kind() {
            "interpreted_string_literal" | "raw_string_literal" => {
                self.types.record_type(id, StaticType::String);
                let raw = node_text(node, self.src).to_string();
                Expr::new(id, span, ExprKind::StringLit { raw })
            }
            "identifier" => {
                let name = node_text(node, self.src);
                self.resolve_identifier(id, name);
                Expr::new(id, span, ExprKind::Ident(name.to_string()))
            }
            "parenthesized_expression" => match children(node).first() {
                Some(inner) => {
                    let inner = self.lower_expr(*inner);
                    if let Some(ty) = self.type_of(&inner) {
                        self.types.record_type(id, ty);
                    }
                    Expr::new(id, span, ExprKind::Paren(Box::new(inner)))
                }
                None => self.other(id, span, node),
            },
            "binary_expression" => self.lower_binary(id, span, node),
            "selector_expression" => self.lower_selector(id, span, node),
            "call_expression" => self.lower_call(id, span, node),
            "type_conversion_expression" | "type_assertion_expression" => {
                let ty = node.child_by_field_name("type").map(|ty| self.lower_type(ty));
                let expr = self.other(id, span, node);
                if let Some(ty) = ty {
                    self.types.record_type(id, ty);
                }
                expr
            }
            "composite_literal" => {
                let ty = node.child_by_field_name("type").map(|ty| self.lower_type(ty));
                let expr = self.other(id, span, node);
                if let Some(ty) = ty {
                    self.types.record_type(id, ty);
                }
                expr
            }
            "unary_expression" => self.lower_unary(id, span, node),
            "func_literal" => {
                let mut children = Vec::new();
                self.lower_function(node, &mut children);
                Expr::new(
                    id,
                    span,
                    ExprKind::Other {
                        kind: "func_literal".to_string(),
                        children,
                    },
                )
            }
            _ => self.other(id, span, node),
        }
    }

    fn resolve_identifier(&mut self, id: NodeId, name: &str) {
        match self.scopes.lookup(name).map(Option::<&StaticType>::cloned) {
            Some(Some(ty)) => {
                self.types.record_use(id, Object::Var(ty.clone()));
                self.types.record_type(id, ty);
            }
            Some(None) => {}
            None => {
                if let Some(path) = self.imports.resolve(name) {
                    let object = Object::Package(path.to_string());
                    self.types.record_use(id, object);
                } else if self.decls.functions.contains_key(name) {
                    let identity = FunctionIdentity::function(self.package.clone(), name);
                    self.types.record_use(id, Object::Func(identity));
                }
            }
        }
    }

    fn lower_binary(&mut self, id: NodeId, span: Span, node: Node<'_>) -> Expr {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return self.other(id, span, node);
        };
        let operator = node
            .child_by_field_name("operator")
            .map_or("", |op| node_text(op, self.src));

        let left = self.lower_expr(left);
        let right = self.lower_expr(right);
        let (left_ty, right_ty) = (self.type_of(&left), self.type_of(&right));

        let (op, ty) = if operator == "+" {
            let ty = match (left_ty, right_ty) {
                (Some(l), _) if l.is_string_like() => Some(l),
                (_, Some(r)) if r.is_string_like() => Some(r),
                (l, _) => l,
            };
            (BinaryOp::Add, ty)
        } else if is_comparison(operator) {
            (
                BinaryOp::Other(operator.to_string()),
                Some(StaticType::Other("bool".to_string())),
            )
        } else {
            (BinaryOp::Other(operator.to_string()), left_ty)
        };

        if let Some(ty) = ty {
            self.types.record_type(id, ty);
        }
        Expr::new(
            id,
            span,
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    /// `&x` and `*x` keep track of pointers; other operators lose the type.
    fn lower_unary(&mut self, id: NodeId, span: Span, node: Node<'_>) -> Expr {
        let operator = node
            .child_by_field_name("operator")
            .map_or("", |op| node_text(op, self.src));
        let expr = self.other(id, span, node);

        let operand_ty = match &expr.kind {
            ExprKind::Other { children, .. } => children.first().and_then(|c| self.type_of(c)),
            _ => None,
        };
        let ty = match (operator, operand_ty) {
            ("&", Some(ty)) => Some(StaticType::Pointer(Box::new(ty))),
            ("*", Some(StaticType::Pointer(inner))) => Some(*inner),
            _ => None,
        };
        if let Some(ty) = ty {
            self.types.record_type(id, ty);
        }
        expr
    }

    fn lower_selector(&mut self, id: NodeId, span: Span, node: Node<'_>) -> Expr {
        let (Some(operand), Some(field)) = (
            node.child_by_field_name("operand"),
            node.child_by_field_name("field"),
        ) else {
            return self.other(id, span, node);
        };

        let operand = self.lower_expr(operand);
        let field = Ident {
            id: self.ids.fresh(),
            name: node_text(field, self.src).to_string(),
            span: span_of(field),
        };

        let package = match self.types.use_of(operand.id) {
            Some(Object::Package(path)) if matches!(operand.kind, ExprKind::Ident(_)) => {
                Some(path.clone())
            }
            _ => None,
        };

        if let Some(package) = package {
            let identity = FunctionIdentity::function(package, field.name.as_str());
            self.types.record_use(field.id, Object::Func(identity));
        } else if let Some(ty) = self.type_of(&operand) {
            match self.member(&ty, &field.name, 0) {
                Some(Member::Field(field_ty)) => {
                    self.types.record_use(field.id, Object::Var(field_ty.clone()));
                    self.types.record_type(id, field_ty);
                }
                Some(Member::Method(identity)) => {
                    self.types.record_selection(id, Object::Func(identity));
                }
                None => {}
            }
        }

        Expr::new(
            id,
            span,
            ExprKind::Selector {
                operand: Box::new(operand),
                field,
            },
        )
    }

    /// Resolves `name` on a value of type `ty`. Types from other packages
    /// only have methods as far as this file can tell; local structs have
    /// fields, declared methods and members promoted from embedded fields.
    fn member(&self, ty: &StaticType, name: &str, depth: usize) -> Option<Member> {
        let StaticType::Named {
            package,
            name: type_name,
            ..
        } = deref(ty)
        else {
            return None;
        };

        if *package != self.package {
            return Some(Member::Method(FunctionIdentity::method(
                package.as_str(),
                type_name.as_str(),
                name,
            )));
        }

        let local = self.decls.types.get(type_name);
        if let Some(field_ty) = local.and_then(|l| l.fields.get(name)) {
            return Some(Member::Field(field_ty.clone()));
        }

        let declared = self
            .decls
            .methods
            .contains_key(&(type_name.clone(), name.to_string()));
        if !declared && depth < MAX_EMBEDDING_DEPTH {
            let promoted = local
                .into_iter()
                .flat_map(|l| l.embedded.iter())
                .find_map(|embedded| self.member(embedded, name, depth + 1));
            if promoted.is_some() {
                return promoted;
            }
        }

        Some(Member::Method(FunctionIdentity::method(
            package.as_str(),
            type_name.as_str(),
            name,
        )))
    }

    fn lower_call(&mut self, id: NodeId, span: Span, node: Node<'_>) -> Expr {
        let Some(function) = node.child_by_field_name("function") else {
            return self.other(id, span, node);
        };

        let callee = self.lower_expr(function);
        let args = node
            .child_by_field_name("arguments")
            .map(|arguments| self.lower_children(arguments))
            .unwrap_or_default();

        let results = self.call_results(&callee);
        if let [single] = results.as_slice() {
            self.types.record_type(id, single.clone());
        }
        if !results.is_empty() {
            self.results.insert(id, results);
        }

        Expr::new(
            id,
            span,
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
        )
    }

    /// Result types of calling `callee`, empty when unknown.
    fn call_results(&self, callee: &Expr) -> Vec<StaticType> {
        let callee = callee.strip_parens();
        match &callee.kind {
            ExprKind::Ident(name) => {
                if self.scopes.lookup(name).is_some() {
                    // a local function value
                    return Vec::new();
                }
                if let Some(results) = self.decls.functions.get(name) {
                    results.clone()
                } else if let Some(target) = self.decls.aliases.get(name) {
                    vec![target.clone()]
                } else if self.decls.types.contains_key(name) {
                    vec![self.local_named(name)]
                } else if name == "string" {
                    vec![StaticType::String]
                } else {
                    Vec::new()
                }
            }
            ExprKind::Selector { field, .. } => {
                if let Some(Object::Func(function)) = self.types.use_of(field.id) {
                    return function
                        .package
                        .as_deref()
                        .and_then(|package| known::function_results(package, &function.name))
                        .unwrap_or_default();
                }
                let Some(Object::Func(method)) = self.types.selection(callee.id) else {
                    return Vec::new();
                };
                let (Some(package), Some(receiver)) = (&method.package, &method.receiver) else {
                    return Vec::new();
                };
                if *package == self.package {
                    self.decls
                        .methods
                        .get(&(receiver.clone(), method.name.clone()))
                        .cloned()
                        .unwrap_or_default()
                } else {
                    known::method_results(package, receiver, &method.name).unwrap_or_default()
                }
            }
            _ => Vec::new(),
        }
    }
}
