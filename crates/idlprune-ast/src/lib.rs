//! idlprune AST - Core types for IDL documents
//!
//! This crate defines the declaration and type-expression nodes produced by
//! an IDL parser, the [`IdlGraph`] arena that connects documents through
//! their include edges, and the [`SymbolSet`] used to track reserved names.

mod decl;
mod graph;
mod path;
mod span;
mod symbols;
mod types;

pub use decl::*;
pub use graph::{FileId, IdlGraph};
pub use path::{file_stem_name, normalize_filename};
pub use span::Span;
pub use symbols::SymbolSet;
pub use types::*;
