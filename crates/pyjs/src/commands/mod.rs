//! Command implementations. Each `run` returns the process exit code.

pub mod examples;
pub mod parse;
pub mod repl;
pub mod translate;
