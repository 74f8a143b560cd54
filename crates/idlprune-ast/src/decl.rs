//! Declaration nodes (one document per IDL file)

use crate::{file_stem_name, FileId, Span, TypeExpr};
use serde::{Deserialize, Serialize};

/// A parsed IDL file
///
/// Collections keep source order. The pruner only ever removes entries from
/// them; nothing is renamed, renumbered or reordered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Normalized path of the file, used as its identity
    pub path: String,
    pub includes: Vec<Include>,
    pub services: Vec<Service>,
    pub structs: Vec<StructLike>,
    pub unions: Vec<StructLike>,
    pub exceptions: Vec<StructLike>,
    pub typedefs: Vec<Typedef>,
    pub enums: Vec<Enum>,
    pub constants: Vec<Constant>,
}

impl Document {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Structs, unions and exceptions, in that order
    pub fn struct_likes(&self) -> impl Iterator<Item = &StructLike> {
        self.structs
            .iter()
            .chain(self.unions.iter())
            .chain(self.exceptions.iter())
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.services.iter().flat_map(|s| s.functions.iter())
    }

    /// Include edge recorded at position `index` when the file was parsed
    ///
    /// Looks at [`Include::index`] rather than the current position, which
    /// shifts once unused includes are dropped.
    pub fn include(&self, index: usize) -> Option<&Include> {
        self.includes.iter().find(|inc| inc.index == index)
    }

    /// Include edge whose file stem matches a reference qualifier
    pub fn include_named(&self, qualifier: &str) -> Option<&Include> {
        self.includes.iter().find(|inc| inc.name() == qualifier)
    }

    /// Number of prunable declarations (functions, structured types, typedefs, enums)
    pub fn declaration_count(&self) -> usize {
        self.functions().count()
            + self.struct_likes().count()
            + self.typedefs.len()
            + self.enums.len()
    }
}

/// `include "path"` edge to another document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    /// Path as written in the include statement
    pub path: String,
    /// Position of this edge in the owner's include list at parse time
    pub index: usize,
    /// Target document in the graph arena
    pub target: FileId,
    #[serde(default)]
    pub span: Span,
}

impl Include {
    pub fn new(path: impl Into<String>, index: usize, target: FileId) -> Self {
        Self {
            path: path.into(),
            index,
            target,
            span: Span::dummy(),
        }
    }

    /// Qualifier used to reference symbols of the included file
    pub fn name(&self) -> &str {
        file_stem_name(&self.path)
    }
}

/// `service Name extends Base { ... }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub span: Span,
}

/// A service method
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// `None` for `void`
    #[serde(default)]
    pub return_type: Option<TypeExpr>,
    #[serde(default)]
    pub arguments: Vec<Field>,
    #[serde(default)]
    pub throws: Vec<Field>,
    #[serde(default)]
    pub oneway: bool,
    #[serde(default)]
    pub span: Span,
}

/// Field of a structured type, function argument or throws clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub requiredness: Requiredness,
    #[serde(default)]
    pub span: Span,
}

impl Field {
    pub fn new(id: i32, name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
            requiredness: Requiredness::Default,
            span: Span::dummy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requiredness {
    #[default]
    Default,
    Required,
    Optional,
}

/// Struct, union or exception
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructLike {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub span: Span,
}

/// `typedef <type> Alias`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typedef {
    pub alias: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// `const <type> NAME = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub value: ConstValue,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
    Int(i64),
    Double(f64),
    Literal(String),
    /// Reference to another constant or an enum value
    Identifier(String),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
}
