//! Codegen Library - AST class generation for the slang interpreter
//!
//! Turns a hierarchy table (one shape line per node variant) into C++
//! headers: a visitor interface, an abstract base, a value adapter and one
//! class per variant, per hierarchy.

pub mod cpp_header;
pub mod cpp_nodes;
pub mod cpp_value_getter;
pub mod cpp_visitor;
pub mod error;
pub mod ir;
pub mod naming;
pub mod shape;
pub mod table;
pub mod writer;

pub use crate::ir::*;
pub use cpp_header::CppHeaderGenerator;
pub use error::{FileWriteError, ShapeError, TableError, WriteError};
pub use shape::{parse_shape, Grammar};
pub use table::{default_table, HierarchyEntry, Table};
pub use writer::write_files;

/// Codegen trait - implement this for each output language
pub trait Codegen {
    fn generate(&self, schema: &Schema) -> anyhow::Result<GeneratedCode>;
    fn language(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative to the output directory.
    pub path: String,
    pub content: String,
}
