use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tepang_core::Config;

mod commands;
mod input;
mod logging;
mod screen;

#[derive(Parser)]
#[command(name = "tepang", version, about = "Tepang Waktos: Pomodoro timer with ambient music")]
struct Cli {
    /// Config file (default: <config dir>/tepang/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively
    Run(commands::run::RunArgs),
    /// Print the starting view
    View {
        /// Render the dark theme
        #[arg(long)]
        dark: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured audio assets
    Assets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Load the config file and install logging from it.
fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::load_from(path)?;
    logging::init(&config.logging);
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        Commands::Run(args) => commands::run::run(&load(&config_path)?, args),
        Commands::View { dark, json } => commands::view::run(&load(&config_path)?, dark, json),
        Commands::Assets { json } => commands::assets::run(&load(&config_path)?, json),
        Commands::Config { action } => commands::config::run(action, &config_path),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
