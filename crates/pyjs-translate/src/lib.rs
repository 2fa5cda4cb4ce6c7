//! Source-to-source translation of a Python subset into JavaScript.
//!
//! `pyjs-translate` parses Python with tree-sitter into a closed syntax
//! tree and walks that tree to emit JavaScript. It maps syntax, not deep
//! semantics: only a fixed subset of statements and expressions has a
//! translation rule.
//!
//! # Architecture
//!
//! ```text
//! Python source       Syntax tree       JavaScript source
//! ─────────────    ───────────────    ─────────────────
//! input::python ──> Module (ast.rs) ──> output::javascript
//!                                          │
//!                              tables.rs ──┤
//!                              indent.rs ──┘
//! ```
//!
//! # Example
//!
//! ```
//! let js = pyjs_translate::transpile("def soma(a, b):\n    return a + b");
//! assert_eq!(js, "function soma(a, b) {\n    return a + b;\n}");
//! ```
//!
//! # Degradation
//!
//! Valid Python that has no translation rule never aborts the translation.
//! An unsupported statement becomes a `// Unsupported: <Kind>` line and an
//! unsupported expression becomes an inline `/* Unsupported: <Kind> */`
//! comment, while everything around it translates normally. Only source
//! the parser rejects is terminal, and even then [`transpile`] returns a
//! `// Python syntax error: ...` line instead of an error.

pub mod ast;
pub mod indent;
pub mod tables;
pub mod traits;

pub mod input;
pub mod output;

pub mod translate;

// Re-exports: syntax tree
pub use ast::{
    BinaryOp, BoolOp, ClassDef, CmpOp, Constant, DictItem, Expr, FStringPart, FunctionDef,
    Module, Param, ParamKind, Stmt, UnaryOp,
};

// Re-exports: Traits
pub use traits::{ReadError, Reader, Writer};

// Re-exports: reader and writer
pub use input::{PYTHON_READER, PythonReader, read_python};
pub use output::{JAVASCRIPT_WRITER, JavaScriptWriter, JavaScriptWriterImpl};

// Re-exports: entry points
pub use translate::{TranslateOptions, Transpiler, syntax_error_comment, transpile};
