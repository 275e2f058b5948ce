use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "breathbox", version, about = "Guided box-breathing companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or inspect a breathing session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Breathing settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily accountability table
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Time-of-day ambient theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Theme { action } => commands::theme::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
