//! Type expressions

use crate::Span;
use serde::{Deserialize, Serialize};

/// A type expression as written in a field, argument, typedef or constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    /// Built-in base type: `i32`, `string`, ...
    Primitive(BaseType),

    /// `list<T>`
    List(Box<TypeExpr>),

    /// `set<T>`
    Set(Box<TypeExpr>),

    /// `map<K, V>`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },

    /// Reference to a user-defined symbol, local or `include.Symbol`
    Named(TypeRef),
}

impl TypeExpr {
    pub fn primitive(base: BaseType) -> Self {
        TypeExpr::Primitive(base)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(TypeRef::local(name))
    }

    pub fn list(value: TypeExpr) -> Self {
        TypeExpr::List(Box::new(value))
    }

    pub fn set(value: TypeExpr) -> Self {
        TypeExpr::Set(Box::new(value))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Key type of a map, `None` for every other expression
    pub fn key_type(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Element type of a container, `None` for primitives and references
    pub fn value_type(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::List(value) | TypeExpr::Set(value) => Some(value),
            TypeExpr::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Built-in base types. These are never pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Bool,
    Byte,
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

/// A named type reference
///
/// `name` is the spelling from the source. For a qualified reference such as
/// `shared.Widget` the parser records the position of the include edge the
/// qualifier resolves to in `include`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<usize>,
    #[serde(default)]
    pub span: Span,
}

impl TypeRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include: None,
            span: Span::dummy(),
        }
    }

    /// Reference to `symbol` in the file included at position `index` under `qualifier`
    pub fn qualified(qualifier: &str, index: usize, symbol: &str) -> Self {
        Self {
            name: format!("{}.{}", qualifier, symbol),
            include: Some(index),
            span: Span::dummy(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Include prefix of a qualified reference
    pub fn qualifier(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(qualifier, _)| qualifier)
    }

    /// Bare symbol name, without the include prefix
    pub fn symbol(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(_, symbol)| symbol)
            .unwrap_or(&self.name)
    }

    pub fn is_qualified(&self) -> bool {
        self.include.is_some() || self.qualifier().is_some()
    }
}
