//! Type-resolution interface consumed by the call-site resolver.
//!
//! The core never computes types itself. Front ends fill a [`TypeTable`] (or
//! implement [`TypeResolver`] over their own structures) and hand it to the
//! engine read-only.

use std::collections::HashMap;
use std::fmt;

use crate::ast::NodeId;

/// Declared identity of a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionIdentity {
    /// Path of the declaring package (`None` for builtins).
    pub package: Option<String>,
    /// Receiver type name for methods (e.g. `Logger`).
    pub receiver: Option<String>,
    /// Function or method name.
    pub name: String,
}

impl FunctionIdentity {
    /// A package-level function.
    #[must_use]
    pub fn function(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            receiver: None,
            name: name.into(),
        }
    }

    /// A method declared on `receiver` in `package`.
    #[must_use]
    pub fn method(
        package: impl Into<String>,
        receiver: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: Some(package.into()),
            receiver: Some(receiver.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for FunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let package = self.package.as_deref().unwrap_or("<builtin>");
        match &self.receiver {
            Some(receiver) => write!(f, "({package}.{receiver}).{}", self.name),
            None => write!(f, "{package}.{}", self.name),
        }
    }
}

/// Static type of an expression, as far as the front end could tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticType {
    /// The builtin string type.
    String,
    /// A named type with its underlying type.
    Named {
        /// Declaring package path.
        package: String,
        /// Type name.
        name: String,
        /// Underlying type.
        underlying: Box<StaticType>,
    },
    /// Pointer to another type.
    Pointer(Box<StaticType>),
    /// Anything else (numbers, structs, unknown shapes).
    Other(String),
}

impl StaticType {
    /// Returns true for `string` and named types whose underlying type is
    /// `string`.
    #[must_use]
    pub fn is_string_like(&self) -> bool {
        match self {
            Self::String => true,
            Self::Named { underlying, .. } => underlying.is_string_like(),
            Self::Pointer(_) | Self::Other(_) => false,
        }
    }
}

/// What an identifier or selector refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// A function or method.
    Func(FunctionIdentity),
    /// A variable or constant of the given type.
    Var(StaticType),
    /// An imported package.
    Package(String),
}

/// Read-only lookup over a front end's resolution results.
pub trait TypeResolver {
    /// Object an identifier node refers to.
    fn use_of(&self, node: NodeId) -> Option<&Object>;

    /// Object selected by a selector node (method or field access through a
    /// value, as opposed to a package-qualified name).
    fn selection(&self, node: NodeId) -> Option<&Object>;

    /// Static type of an expression node.
    fn type_of(&self, node: NodeId) -> Option<&StaticType>;
}

/// Map-backed [`TypeResolver`].
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    uses: HashMap<NodeId, Object>,
    selections: HashMap<NodeId, Object>,
    types: HashMap<NodeId, StaticType>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records what an identifier refers to.
    pub fn record_use(&mut self, node: NodeId, object: Object) {
        self.uses.insert(node, object);
    }

    /// Records what a selector selects.
    pub fn record_selection(&mut self, node: NodeId, object: Object) {
        self.selections.insert(node, object);
    }

    /// Records the static type of an expression.
    pub fn record_type(&mut self, node: NodeId, ty: StaticType) {
        self.types.insert(node, ty);
    }

    /// Number of typed expressions.
    #[must_use]
    pub fn typed_len(&self) -> usize {
        self.types.len()
    }
}

impl TypeResolver for TypeTable {
    fn use_of(&self, node: NodeId) -> Option<&Object> {
        self.uses.get(&node)
    }

    fn selection(&self, node: NodeId) -> Option<&Object> {
        self.selections.get(&node)
    }

    fn type_of(&self, node: NodeId) -> Option<&StaticType> {
        self.types.get(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_string_is_string_like() {
        let named = StaticType::Named {
            package: "main".into(),
            name: "Msg".into(),
            underlying: Box::new(StaticType::String),
        };
        assert!(named.is_string_like());
        assert!(!StaticType::Pointer(Box::new(StaticType::String)).is_string_like());
        assert!(!StaticType::Other("int".into()).is_string_like());
    }

    #[test]
    fn identity_display() {
        let method = FunctionIdentity::method("go.uber.org/zap", "Logger", "Info");
        assert_eq!(method.to_string(), "(go.uber.org/zap.Logger).Info");
        let func = FunctionIdentity::function("log/slog", "Warn");
        assert_eq!(func.to_string(), "log/slog.Warn");
    }
}
