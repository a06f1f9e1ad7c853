mod commands;
mod fetch;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "choreboard")]
#[command(about = "Track family chores and merge them with your shared calendar feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage chores
    Chore {
        #[command(subcommand)]
        action: commands::chore::ChoreAction,
    },
    /// Manage family members
    Family {
        #[command(subcommand)]
        action: commands::family::FamilyAction,
    },
    /// Toggle completion of a chore for a person on a date
    Toggle {
        /// Chore id or exact title
        chore: String,

        /// Person id or name (defaults to the chore's assignee)
        #[arg(short, long)]
        person: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the weekly agenda grid
    Week {
        /// Any date inside the week to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Fetch the calendar feed and refresh the cached events
    Sync {
        /// Test the connection without replacing cached events
        #[arg(long)]
        check: bool,

        /// Feed URL override (otherwise taken from config)
        #[arg(long)]
        url: Option<String>,
    },
    /// Weekly aggregate counts per person
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export all stored data as one JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },
    /// Import a JSON export, replacing all stored data
    Import {
        file: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chore { action } => commands::chore::run(action),
        Commands::Family { action } => commands::family::run(action),
        Commands::Toggle { chore, person, date } => {
            commands::toggle::run(&chore, person.as_deref(), date.as_deref())
        }
        Commands::Week { date } => commands::week::run(date.as_deref()),
        Commands::Sync { check, url } => commands::sync::run(check, url).await,
        Commands::Stats { json } => commands::stats::run(json),
        Commands::Export { out } => commands::data::export(out.as_deref()),
        Commands::Import { file } => commands::data::import(&file),
    }
}
