use clap::Parser;
use pyjs::{Cli, Commands, logging};

fn main() {
    let cli = Cli::parse();

    // The server reports requests at info level.
    let verbosity = match cli.command {
        Commands::Serve(_) => cli.verbose.max(1),
        _ => cli.verbose,
    };
    if let Err(e) = logging::init(logging::default_directive(verbosity)) {
        eprintln!("{e:#}");
    }

    std::process::exit(pyjs::run(cli));
}
