use clap::Parser;
use tickbox::cli::commands::{Cli, Commands};
use tickbox::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::cmd_tui(&cli),
        Some(Commands::Reset) => handlers::cmd_reset(&cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
