use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single shape line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("missing 'with' separator")]
    MissingSeparator,

    #[error("invalid class name '{0}'")]
    InvalidClassName(String),

    #[error("empty field list")]
    EmptyFieldList,

    #[error("empty field (stray comma?)")]
    EmptyField,

    #[error("field '{0}' must be '<type> <identifier>' separated by exactly one space")]
    MalformedField(String),

    #[error("field '{field}' has invalid identifier '{name}'")]
    InvalidFieldName { field: String, name: String },

    #[error("field '{0}' has an empty type")]
    EmptyType(String),

    #[error("unbalanced '{0}'")]
    UnbalancedBracket(char),
}

/// The hierarchy table is malformed. These are defects in the table itself,
/// not recoverable conditions.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("cannot read table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid namespace '{0}'")]
    InvalidNamespace(String),

    #[error("invalid hierarchy name '{0}'")]
    InvalidHierarchyName(String),

    #[error("hierarchy '{0}' declared twice")]
    DuplicateHierarchy(String),

    #[error("hierarchies '{first}' and '{second}' differ only in case and would share a guard and namespace")]
    CaseCollision { first: String, second: String },

    #[error("hierarchy '{0}' has no variants")]
    EmptyHierarchy(String),

    #[error("hierarchy '{hierarchy}', variant #{index} `{line}`: {source}")]
    Shape {
        hierarchy: String,
        index: usize,
        line: String,
        #[source]
        source: ShapeError,
    },

    #[error("hierarchy '{hierarchy}', variant #{index}: class name '{class_name}' is reserved")]
    ReservedName {
        hierarchy: String,
        index: usize,
        class_name: String,
    },

    #[error("hierarchy '{hierarchy}': variant '{class_name}' declared twice (#{first} and #{second})")]
    DuplicateVariant {
        hierarchy: String,
        class_name: String,
        first: usize,
        second: usize,
    },

    #[error("hierarchy '{hierarchy}', variant #{index} `{line}`: field '{field}' declared twice")]
    DuplicateField {
        hierarchy: String,
        index: usize,
        line: String,
        field: String,
    },

    #[error("hierarchy '{hierarchy}' includes its own header '{include}'")]
    SelfInclude { hierarchy: String, include: String },

    #[error("hierarchy '{hierarchy}' includes '{include}' of '{target}', which must be declared before it")]
    ForwardInclude {
        hierarchy: String,
        include: String,
        target: String,
    },
}

/// One generated file could not be written.
#[derive(Error, Debug)]
#[error("cannot write {path}: {source}")]
pub struct FileWriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Some generated files could not be written. Files that were written stay
/// on disk, including a partially written one.
#[derive(Error, Debug)]
#[error("{} of {attempted} file(s) could not be written", .failures.len())]
pub struct WriteError {
    pub attempted: usize,
    pub failures: Vec<FileWriteError>,
}
