//! Traits for the reader and writer halves of a translation.

use crate::ast::Module;

/// Error that can occur when reading source code into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The source is not valid Python. Line and column are 1-based.
    #[error("{message} (line {line}, column {column})")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}

/// A reader parses source code into the syntax tree.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "python").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into a module.
    fn read(&self, source: &str) -> Result<Module, ReadError>;
}

/// A writer emits a syntax tree as source code in a target language.
///
/// Implementations must build fresh per-call state inside `write`, so a
/// single writer can serve concurrent callers.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "javascript").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "js").
    fn extension(&self) -> &'static str;

    /// Emit the module as source code.
    fn write(&self, module: &Module) -> String;
}
