//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from flashcard-core
pub use flashcard_core::types::{CardPayload, DeckEntry, NewDeck};

// === Database Entity Types ===

/// Deck stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbDeck {
    pub id: Uuid,
    pub title: String,
    pub records: Json<Vec<CardPayload>>,
    pub created_at: DateTime<Utc>,
}

impl DbDeck {
    /// Convert to API deck entry
    pub fn into_entry(self) -> DeckEntry {
        DeckEntry {
            id: self.id,
            title: self.title,
            records: self.records.0,
            created_at: self.created_at,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDeckResponse {
    pub deleted: bool,
}
