//! Zendo CLI - command-line interface for the ambience engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zendo")]
#[command(author, version, about = "Procedural ambience engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the ambience live on an output device
    Play(commands::play::PlayArgs),

    /// Render the ambience to a WAV file
    Render(commands::render::RenderArgs),

    /// Show the mode and breath-phase mix tables
    Profiles(commands::profiles::ProfilesArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Profiles(args) => commands::profiles::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
