//! Command implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use uuid::Uuid;

use flashcard_core::{parser, DeckEntry, Record, Session, SessionConfig};

use crate::config::Config;
use crate::gateway::{DeckGateway, DeckLibrary, GatewayError};
use crate::study::{self, StudyApp};

/// Read and normalize a delimited file.
pub fn import_file(path: &Path) -> anyhow::Result<Vec<Record>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records =
        parser::parse_bytes(&bytes).with_context(|| format!("importing {}", path.display()))?;
    tracing::info!(path = %path.display(), cards = records.len(), "deck imported");
    Ok(records)
}

/// Import a file and open the study screen on it.
pub fn study_file(config: &Config, path: &Path, prefs: SessionConfig) -> anyhow::Result<()> {
    let records = import_file(path)?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported deck".to_string());
    study_records(config, &title, records, prefs)
}

fn study_records(
    config: &Config,
    title: &str,
    records: Vec<Record>,
    prefs: SessionConfig,
) -> anyhow::Result<()> {
    let mut session = Session::new(prefs);
    session.load(records);
    let mut app = StudyApp::new(title, session, config.export_dir.clone());
    study::run(&mut app)?;

    let session = app.session();
    tracing::info!(
        known = session.known_count(),
        unknown = session.unknown_count(),
        total = session.records().len(),
        "study session closed"
    );
    Ok(())
}

/// Print saved decks, newest first.
pub async fn list<G: DeckGateway>(library: &mut DeckLibrary<G>, json: bool) -> anyhow::Result<()> {
    library.refresh().await.context("failed to list decks")?;
    let entries = library.entries();

    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No saved decks.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", describe(entry));
    }
    Ok(())
}

fn describe(entry: &DeckEntry) -> String {
    format!(
        "{}  {}  ({} cards, saved {})",
        entry.id,
        entry.title,
        entry.records.len(),
        entry.created_at.format("%Y-%m-%d %H:%M")
    )
}

/// Import a file and save it under `title`.
pub async fn save<G: DeckGateway>(
    library: &mut DeckLibrary<G>,
    title: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let records = import_file(path)?;
    match library.save(title, &records).await {
        Ok(entry) => {
            println!("Saved \"{}\" ({} cards) as {}", entry.title, entry.records.len(), entry.id);
            Ok(())
        }
        Err(GatewayError::Validation(e)) => {
            println!("Cannot save: {}", e);
            Ok(())
        }
        Err(e) => Err(e).context("failed to save deck"),
    }
}

/// Delete a saved deck after confirmation.
pub async fn delete<G: DeckGateway>(
    library: &mut DeckLibrary<G>,
    id: Uuid,
    assume_yes: bool,
) -> anyhow::Result<()> {
    library.refresh().await.context("failed to list decks")?;
    let Some(entry) = library.find(id) else {
        bail!("no saved deck with id {}", id);
    };

    let prompt = format!("Delete \"{}\" ({} cards)? [y/N] ", entry.title, entry.records.len());
    let confirmed = assume_yes || confirm(&prompt)?;

    if library.delete(id, confirmed).await.context("failed to delete deck")? {
        println!("Deleted {}", id);
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

/// Load a saved deck and open the study screen on it.
pub async fn study_saved<G: DeckGateway>(
    config: &Config,
    library: &mut DeckLibrary<G>,
    id: Uuid,
    prefs: SessionConfig,
) -> anyhow::Result<()> {
    library.refresh().await.context("failed to load decks")?;
    let Some(entry) = library.find(id) else {
        bail!("no saved deck with id {}", id);
    };
    let title = entry.title.clone();
    let records = entry.to_records();
    study_records(config, &title, records, prefs)
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
