//! Output writers - emit the syntax tree as source code.

pub mod javascript;

pub use javascript::{JAVASCRIPT_WRITER, JavaScriptWriter, JavaScriptWriterImpl};
