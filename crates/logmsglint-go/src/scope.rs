//! Lexical scopes for local name resolution.

use std::collections::HashMap;

use logmsglint_core::StaticType;

/// A stack of block scopes, innermost last.
///
/// A name bound without a type still shadows outer bindings and imports:
/// it is known to be *something else*, even if not what.
#[derive(Debug, Clone)]
pub struct Scopes {
    stack: Vec<HashMap<String, Option<StaticType>>>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// Creates a stack holding only the file scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![HashMap::new()],
        }
    }

    /// Opens a nested scope.
    pub fn push(&mut self) {
        self.stack.push(HashMap::new());
    }

    /// Closes the innermost scope. The file scope is never popped.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Binds `name` in the innermost scope. The blank identifier is ignored.
    pub fn declare(&mut self, name: &str, ty: Option<StaticType>) {
        if name == "_" {
            return;
        }
        if let Some(scope) = self.stack.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    /// Looks `name` up from the innermost scope outwards.
    ///
    /// `None` means unbound; `Some(None)` means bound to a value of unknown
    /// type.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Option<&StaticType>> {
        self.stack
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(Option::as_ref)
    }
}
