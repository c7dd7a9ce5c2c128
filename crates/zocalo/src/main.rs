mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zocalo", version, about = "A replacement taskbar shell for Windows")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration files
    Init,
    /// Run the shell (the default when no subcommand is given)
    Run,
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
    }
}
