//! Parse command - dump the syntax tree the translator works on.

use super::translate::read_input;
use clap::Args;
use pyjs_translate::{PYTHON_READER, Reader};
use std::path::PathBuf;

/// Parse command arguments
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input Python file, use - for stdin
    pub input: PathBuf,

    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

/// Run the parse command
pub fn run(args: ParseArgs) -> i32 {
    let content = match read_input(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{e:#}");
            return 1;
        }
    };

    let module = match PYTHON_READER.read(&content) {
        Ok(module) => module,
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

    let json = if args.compact {
        serde_json::to_string(&module)
    } else {
        serde_json::to_string_pretty(&module)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Failed to serialize syntax tree: {e}");
            1
        }
    }
}
