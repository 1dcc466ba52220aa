//! Command-line hunt counter for Shiny Tracker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap::builder::BoolishValueParser;
use tracing_subscriber::EnvFilter;

use shiny_core::HuntMethod;

#[derive(Parser)]
#[command(
    name = "shiny",
    about = "Shiny Tracker: count attempts and estimate your odds",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding session files (default: platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current hunt, its settings, and odds
    Status,

    /// Show the odds for the current settings with attempt milestones
    Odds,

    /// Add attempts to the counter (negative values subtract)
    Inc {
        /// Number of attempts to add
        #[arg(default_value = "1", allow_negative_numbers = true)]
        delta: i64,
    },

    /// Set the counter back to zero
    Reset,

    /// Change the title or settings of the current hunt
    Set(SetArgs),

    /// Archive the current hunt and start a new one
    Complete,

    /// List archived hunts
    History,

    /// Delete an archived hunt
    Delete {
        /// Id or unique id prefix of the archived hunt
        id: String,
    },

    /// Copy an archived hunt's title, counter, and settings into the current hunt
    Load {
        /// Id or unique id prefix of the archived hunt
        id: String,
    },
}

#[derive(Args)]
struct SetArgs {
    /// New title
    #[arg(short, long)]
    title: Option<String>,

    /// Hunt method: wild, outbreak, masuda
    #[arg(short, long)]
    method: Option<HuntMethod>,

    /// Shiny charm owned (true/false)
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    charm: Option<bool>,

    /// Sparkling power active (true/false)
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    sparkling: Option<bool>,

    /// Outbreak defeat count
    #[arg(long)]
    defeated: Option<u32>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dir = cli.data_dir.as_deref();
    let result = match cli.command {
        Commands::Status => commands::status::run(dir),
        Commands::Odds => commands::odds::run(dir),
        Commands::Inc { delta } => commands::counter::increment(dir, delta),
        Commands::Reset => commands::counter::reset(dir),
        Commands::Set(args) => commands::set::run(dir, args),
        Commands::Complete => commands::complete::run(dir),
        Commands::History => commands::history::run(dir),
        Commands::Delete { id } => commands::archive::delete(dir, &id),
        Commands::Load { id } => commands::archive::load(dir, &id),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
