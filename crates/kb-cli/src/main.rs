//! CLI frontend for the Kabut interactive fiction engine.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kabut",
    about = "Kabut: whispers from the fog, a text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Overridden by KABUT_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story in the terminal
    Play {
        /// RNG seed for reproducible fights
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file with session settings (missing fields use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Milliseconds per character when printing narration (0 disables)
        #[arg(long, default_value = "0")]
        text_delay: u64,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the narrative graph
    Graph {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: GraphFormat,
    },
}

/// How `graph` prints the story.
#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
    Text,
    Json,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("KABUT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            seed,
            config,
            text_delay,
            no_color,
        } => commands::play::run(seed, config.as_deref(), text_delay, no_color),
        Commands::Graph { format } => match format {
            GraphFormat::Text => commands::graph::run_text(),
            GraphFormat::Json => commands::graph::run_json(),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
