//! CLI frontend for the Aether randomizer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aether",
    about = "Aether randomizer — portrait shuffles and Iron Man run tracking",
    version,
    propagate_version = true
)]
struct Cli {
    /// TOML file with the roster and an optional fixed seed
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle the roster (or 0..len) and print the new order
    Shuffle {
        /// Shuffle plain indices 0..len instead of the roster
        #[arg(short, long)]
        len: Option<usize>,

        /// RNG seed (default: configured seed, else the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// List the configured roster
    Roster,

    /// Track an Iron Man run interactively
    Play {
        /// Seed for the first run's queue
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Serve line-delimited JSON requests on stdin/stdout (for UI clients)
    Serve,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Shuffle { len, seed, json } => {
                commands::shuffle::run(config, len, seed, json)
            }
            Commands::Roster => commands::roster::run(&config),
            Commands::Play { seed } => commands::play::run(config, seed),
            Commands::Serve => commands::serve::run(config),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
