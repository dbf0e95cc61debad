//! Import alias resolution for a single Go file.

use std::collections::HashMap;

use logmsglint_core::literal;
use tree_sitter::Node;

use crate::lower::node_text;

/// Maps the local name of each import to its package path.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    aliases: HashMap<String, String>,
}

impl ImportTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` under `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, path: impl Into<String>) {
        self.aliases.insert(alias.into(), path.into());
    }

    /// Package path imported under `alias`.
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Collects every `import_spec` below an `import_declaration` node.
    pub(crate) fn collect(&mut self, declaration: Node<'_>, src: &[u8]) {
        let mut cursor = declaration.walk();
        for child in declaration.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => self.add_spec(child, src),
                "import_spec_list" => self.collect(child, src),
                _ => {}
            }
        }
    }

    fn add_spec(&mut self, spec: Node<'_>, src: &[u8]) {
        let Some(path) = spec
            .child_by_field_name("path")
            .and_then(|node| literal::unquote(node_text(node, src)))
        else {
            return;
        };

        let alias = match spec.child_by_field_name("name") {
            Some(name) if name.kind() == "package_identifier" => node_text(name, src).to_string(),
            // `_` and `.` imports bind no usable name
            Some(_) => return,
            None => default_alias(&path).to_string(),
        };

        tracing::trace!("import {} => {}", alias, path);
        self.insert(alias, path);
    }
}

/// Name a package is referred to by when imported without an alias.
///
/// This is the last path element, except that a major-version element such
/// as `v2` falls back to the element before it and a `.vN` suffix
/// (`gopkg.in/yaml.v3`) is dropped.
#[must_use]
pub fn default_alias(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let last = elements.next().unwrap_or(path);

    if is_major_version(last) {
        if let Some(previous) = elements.next() {
            return previous;
        }
    }

    match last.rsplit_once('.') {
        Some((name, suffix)) if is_major_version(suffix) && !name.is_empty() => name,
        _ => last,
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
