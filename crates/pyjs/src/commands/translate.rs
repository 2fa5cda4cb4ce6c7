//! Translate command - convert a Python file to JavaScript.

use crate::config::PyjsConfig;
use anyhow::Context;
use clap::Args;
use pyjs_translate::{JAVASCRIPT_WRITER, PYTHON_READER, Reader, Transpiler, Writer};
use std::path::{Path, PathBuf};

/// Translate command arguments
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Input Python file, use - for stdin
    pub input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level (overrides config)
    #[arg(long)]
    pub indent: Option<usize>,
}

/// Read a source file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Run the translate command
pub fn run(args: TranslateArgs, config: &PyjsConfig) -> i32 {
    let content = match read_input(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{e:#}");
            return 1;
        }
    };

    let mut options = config.translate_options();
    if let Some(width) = args.indent {
        options.indent_width = width;
    }

    let code = match Transpiler::new(options).try_transpile(&content) {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "Failed to parse {} as {}: {}",
                args.input.display(),
                PYTHON_READER.language(),
                e
            );
            return 1;
        }
    };

    if let Some(path) = args.output {
        if let Err(e) = std::fs::write(&path, format!("{code}\n")) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            return 1;
        }
        eprintln!(
            "Translated {} -> {} ({})",
            args.input.display(),
            path.display(),
            JAVASCRIPT_WRITER.language()
        );
    } else {
        println!("{}", code);
    }

    0
}
