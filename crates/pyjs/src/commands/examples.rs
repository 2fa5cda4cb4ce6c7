//! Examples command - show the built-in example programs and their translations.

use crate::catalog::{self, RenderedExample};
use crate::config::PyjsConfig;
use clap::Args;
use pyjs_translate::Transpiler;

/// Examples command arguments
#[derive(Args, Debug)]
pub struct ExamplesArgs {
    /// Show only this example (slug or name)
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the examples command
pub fn run(args: ExamplesArgs, config: &PyjsConfig) -> i32 {
    let transpiler = Transpiler::new(config.translate_options());

    let rendered = match &args.name {
        Some(name) => match catalog::find(name) {
            Some(example) => vec![example.render(&transpiler)],
            None => {
                eprintln!("Unknown example: {name}");
                eprintln!("Available examples:");
                for example in catalog::EXAMPLES {
                    eprintln!("  {} ({})", example.slug, example.name);
                }
                return 1;
            }
        },
        None => catalog::render_all(&transpiler),
    };

    if args.json {
        match serde_json::to_string_pretty(&rendered) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize examples: {e}");
                return 1;
            }
        }
    } else {
        let blocks: Vec<String> = rendered.iter().map(format_example).collect();
        println!("{}", blocks.join("\n\n"));
    }

    0
}

fn format_example(example: &RenderedExample) -> String {
    format!(
        "== {} ==\n-- Python --\n{}\n-- JavaScript --\n{}",
        example.name, example.python, example.javascript
    )
}
