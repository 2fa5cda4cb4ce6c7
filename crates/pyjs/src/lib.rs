//! Command-line, REPL and HTTP front ends for `pyjs-translate`.
//!
//! Everything here is glue: it reads Python text from somewhere, hands it
//! to [`pyjs_translate::Transpiler`], and shows the result.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod logging;
pub mod serve;

use clap::{Parser, Subcommand};
use config::PyjsConfig;

/// Translate Python source into JavaScript
#[derive(Parser, Debug)]
#[command(name = "pyjs", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a Python file to JavaScript
    Translate(commands::translate::TranslateArgs),

    /// Print the syntax tree of a Python file as JSON
    Parse(commands::parse::ParseArgs),

    /// Show the built-in examples and their translations
    Examples(commands::examples::ExamplesArgs),

    /// Translate interactively
    Repl,

    /// Start the HTTP translation service
    Serve(serve::ServeArgs),
}

/// Dispatch a parsed command line. Returns the process exit code.
pub fn run(cli: Cli) -> i32 {
    let root = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let config = PyjsConfig::load(&root);
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Translate(args) => commands::translate::run(args, &config),
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Examples(args) => commands::examples::run(args, &config),
        Commands::Repl => commands::repl::run(&config),
        Commands::Serve(args) => serve::run(args, &config),
    }
}
