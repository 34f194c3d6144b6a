//! Core types for the flashcard study tool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A single question/answer pair.
///
/// Identity is the record's position in the deck, not its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub question: String,
    pub answer: String,
}

impl Record {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Session preferences. These survive session resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub shuffle_enabled: bool,
    pub repeat_unknown_enabled: bool,
    pub reversed: bool,
}

/// Borrowed view of the card under the cursor, already oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentCard<'a> {
    /// Index into the deck.
    pub index: usize,
    pub question: &'a str,
    pub answer: &'a str,
}

/// 1-based display position within the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub current: usize,
    pub total: usize,
}

/// Stored form of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPayload {
    pub front: String,
    pub back: String,
}

impl CardPayload {
    /// True when either side is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() || self.back.trim().is_empty()
    }
}

impl From<&Record> for CardPayload {
    fn from(record: &Record) -> Self {
        Self {
            front: record.question.clone(),
            back: record.answer.clone(),
        }
    }
}

impl From<CardPayload> for Record {
    fn from(payload: CardPayload) -> Self {
        Self {
            question: payload.front,
            answer: payload.back,
        }
    }
}

/// A validated request to persist a named deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeck {
    pub title: String,
    pub records: Vec<CardPayload>,
}

impl NewDeck {
    /// Validate a title and deck before they are sent to storage.
    ///
    /// The title is trimmed. Blank titles, empty decks and blank cards are refused.
    pub fn validate(title: &str, records: &[Record]) -> Result<Self, ValidationError> {
        let deck = Self {
            title: title.trim().to_string(),
            records: records.iter().map(CardPayload::from).collect(),
        };
        deck.check()?;
        Ok(deck)
    }

    /// Re-check a request received over the wire.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.records.is_empty() {
            return Err(ValidationError::EmptyDeck);
        }
        if let Some(index) = self.records.iter().position(CardPayload::is_blank) {
            return Err(ValidationError::BlankCard { index });
        }
        Ok(())
    }
}

/// A persisted named deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub id: Uuid,
    pub title: String,
    pub records: Vec<CardPayload>,
    pub created_at: DateTime<Utc>,
}

impl DeckEntry {
    /// Map stored payloads back into deck records.
    pub fn to_records(&self) -> Vec<Record> {
        self.records.iter().cloned().map(Record::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![Record::new("Q1", "A1"), Record::new("Q2", "A2")]
    }

    #[test]
    fn validate_trims_title() {
        let deck = NewDeck::validate("  Capitals ", &records()).unwrap();
        assert_eq!(deck.title, "Capitals");
        assert_eq!(deck.records[0].front, "Q1");
        assert_eq!(deck.records[0].back, "A1");
    }

    #[test]
    fn validate_rejects_blank_title() {
        assert_eq!(
            NewDeck::validate("   ", &records()),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn validate_rejects_empty_deck() {
        assert_eq!(
            NewDeck::validate("Capitals", &[]),
            Err(ValidationError::EmptyDeck)
        );
    }

    #[test]
    fn validate_rejects_blank_card() {
        let records = vec![Record::new("Q1", "A1"), Record::new("Q2", "  ")];
        assert_eq!(
            NewDeck::validate("Capitals", &records),
            Err(ValidationError::BlankCard { index: 1 })
        );
    }

    #[test]
    fn check_rejects_blank_payloads() {
        let deck = NewDeck {
            title: "Capitals".to_string(),
            records: vec![
                CardPayload {
                    front: " ".to_string(),
                    back: "A1".to_string(),
                },
                CardPayload {
                    front: "Q2".to_string(),
                    back: "A2".to_string(),
                },
            ],
        };
        let err = deck.check().unwrap_err();
        assert_eq!(err, ValidationError::BlankCard { index: 0 });
        assert_eq!(err.to_string(), "card 1 has an empty question or answer");
    }

    #[test]
    fn entry_maps_back_to_records() {
        let deck = NewDeck::validate("Capitals", &records()).unwrap();
        let entry = DeckEntry {
            id: Uuid::new_v4(),
            title: deck.title,
            records: deck.records,
            created_at: Utc::now(),
        };
        assert_eq!(entry.to_records(), records());
    }

    #[test]
    fn payload_serializes_front_and_back() {
        let payload = CardPayload::from(&Record::new("Q", "A"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "front": "Q", "back": "A" }));
    }
}
