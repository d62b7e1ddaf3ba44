mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "zonas",
    version,
    about = "A zone-based window snapping engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Check configuration, zone history, and editor wiring
    Doctor,
    /// Print the effective settings
    Config,
    /// List persisted work areas and their layouts
    Layouts,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Doctor => commands::doctor::execute(),
        Commands::Config => commands::config::execute(),
        Commands::Layouts => commands::layouts::execute(),
    }
}
