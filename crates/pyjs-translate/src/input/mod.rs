//! Input readers - parse source code into the syntax tree.

pub mod python;

pub use python::{PYTHON_READER, PythonReader, read_python};
