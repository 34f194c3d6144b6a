mod commands;
mod config;
mod gateway;
mod study;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use flashcard_core::SessionConfig;

use crate::config::Config;
use crate::gateway::{DeckLibrary, HttpGateway};

#[derive(Parser)]
#[command(name = "flashdeck", about = "Study question/answer decks in the terminal", version)]
struct Cli {
    /// Deck service URL (default: $FLASHDECK_API_URL or http://localhost:3000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory progress exports are written to (default: Downloads)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a delimited file and study it
    Study {
        /// CSV/TSV file with question and answer columns
        file: PathBuf,
        #[command(flatten)]
        prefs: SessionArgs,
    },

    /// Manage saved decks
    #[command(subcommand)]
    Decks(DecksCommand),
}

#[derive(Subcommand)]
enum DecksCommand {
    /// List saved decks, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Import a file and save it under a title
    Save {
        title: String,
        file: PathBuf,
    },

    /// Delete a saved deck
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Load a saved deck and study it
    Study {
        id: Uuid,
        #[command(flatten)]
        prefs: SessionArgs,
    },
}

#[derive(Args, Clone, Copy)]
struct SessionArgs {
    /// Shuffle the queue on every reset
    #[arg(long)]
    shuffle: bool,

    /// Queue missed cards again later in the session
    #[arg(long)]
    repeat_unknown: bool,

    /// Show answers as questions
    #[arg(long)]
    reverse: bool,
}

impl From<SessionArgs> for SessionConfig {
    fn from(args: SessionArgs) -> Self {
        Self {
            shuffle_enabled: args.shuffle,
            repeat_unknown_enabled: args.repeat_unknown,
            reversed: args.reverse,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.api_url, cli.export_dir);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut library = DeckLibrary::new(HttpGateway::new(&config.api_url));

    match cli.command {
        Command::Study { file, prefs } => commands::study_file(&config, &file, prefs.into()),
        Command::Decks(DecksCommand::List { json }) => commands::list(&mut library, json).await,
        Command::Decks(DecksCommand::Save { title, file }) => {
            commands::save(&mut library, &title, &file).await
        }
        Command::Decks(DecksCommand::Delete { id, yes }) => {
            commands::delete(&mut library, id, yes).await
        }
        Command::Decks(DecksCommand::Study { id, prefs }) => {
            commands::study_saved(&config, &mut library, id, prefs.into()).await
        }
    }
}
