//! Top-level entry point: Python source text in, JavaScript source text out.

use crate::indent::DEFAULT_INDENT_WIDTH;
use crate::input::PYTHON_READER;
use crate::output::JavaScriptWriter;
use crate::traits::{ReadError, Reader};

/// Options for one translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Spaces per nesting level in the output.
    pub indent_width: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Translates Python source into JavaScript.
///
/// A `Transpiler` only holds options. Every call parses the source and
/// walks it with a new [`JavaScriptWriter`], so one instance can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    options: TranslateOptions,
}

impl Transpiler {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate `source`, returning the parse failure as a value.
    pub fn try_transpile(&self, source: &str) -> Result<String, ReadError> {
        let module = PYTHON_READER.read(source)?;
        let output = JavaScriptWriter::emit_with(&module, &self.options);
        tracing::debug!(
            statements = module.body.len(),
            bytes = output.len(),
            "translated module"
        );
        Ok(output)
    }

    /// Translate `source`. Never fails: invalid Python yields a single
    /// comment line carrying the parser diagnostic.
    pub fn transpile(&self, source: &str) -> String {
        match self.try_transpile(source) {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(error = %err, "python source rejected by parser");
                syntax_error_comment(&err)
            }
        }
    }
}

/// Translate `source` with default options.
pub fn transpile(source: &str) -> String {
    Transpiler::default().transpile(source)
}

/// The line comment returned in place of a translation when parsing fails.
pub fn syntax_error_comment(err: &ReadError) -> String {
    // Keep the comment on one line whatever the diagnostic contains.
    let message = err.to_string().replace(['\r', '\n'], " ");
    format!("// Python syntax error: {message}")
}
