//! Client side of deck persistence.

use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use flashcard_core::{DeckEntry, NewDeck, Record, ValidationError};

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Remote store of named decks.
#[allow(async_fn_in_trait)]
pub trait DeckGateway {
    async fn save(&self, deck: &NewDeck) -> Result<DeckEntry, GatewayError>;

    async fn list(&self) -> Result<Vec<DeckEntry>, GatewayError>;

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError>;
}

#[derive(Debug, Deserialize)]
struct DeckListResponse {
    decks: Vec<DeckEntry>,
}

/// HTTP client for the deck service.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    backend_url: String,
}

impl HttpGateway {
    pub fn new(backend_url: &str) -> Self {
        Self {
            client: Client::new(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(GatewayError::Backend { status, message })
}

impl DeckGateway for HttpGateway {
    async fn save(&self, deck: &NewDeck) -> Result<DeckEntry, GatewayError> {
        let resp = self
            .client
            .post(self.url("/api/decks"))
            .json(deck)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        check(resp)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<DeckEntry>, GatewayError> {
        let resp = self
            .client
            .get(self.url("/api/decks"))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response: DeckListResponse = check(resp)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        Ok(response.decks)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/decks/{}", id)))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        check(resp).await?;
        Ok(())
    }
}

/// Locally known deck list, refreshed from a gateway.
///
/// A failed refresh leaves the previous list in place.
pub struct DeckLibrary<G> {
    gateway: G,
    entries: Vec<DeckEntry>,
}

impl<G: DeckGateway> DeckLibrary<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn find(&self, id: Uuid) -> Option<&DeckEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Reload the list, newest first.
    pub async fn refresh(&mut self) -> Result<&[DeckEntry], GatewayError> {
        let mut entries = self.gateway.list().await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.entries = entries;
        tracing::debug!(count = self.entries.len(), "deck list refreshed");
        Ok(&self.entries)
    }

    /// Validate locally, then save. Invalid decks never reach the gateway.
    pub async fn save(&mut self, title: &str, records: &[Record]) -> Result<DeckEntry, GatewayError> {
        let deck = NewDeck::validate(title, records)?;
        let entry = self.gateway.save(&deck).await?;
        tracing::info!(deck_id = %entry.id, title = %entry.title, "deck saved");
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Delete a deck once the user has confirmed. Returns whether anything was sent.
    pub async fn delete(&mut self, id: Uuid, confirmed: bool) -> Result<bool, GatewayError> {
        if !confirmed {
            return Ok(false);
        }
        self.gateway.delete(id).await?;
        self.entries.retain(|e| e.id != id);
        tracing::info!(deck_id = %id, "deck deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryGateway {
        decks: Mutex<Vec<DeckEntry>>,
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl MemoryGateway {
        fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn guard(&self) -> Result<(), GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(GatewayError::Backend {
                    status: 500,
                    message: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    impl DeckGateway for &MemoryGateway {
        async fn save(&self, deck: &NewDeck) -> Result<DeckEntry, GatewayError> {
            self.guard()?;
            let mut decks = self.decks.lock().unwrap();
            let entry = DeckEntry {
                id: Uuid::new_v4(),
                title: deck.title.clone(),
                records: deck.records.clone(),
                created_at: Utc::now() + Duration::seconds(decks.len() as i64),
            };
            decks.push(entry.clone());
            Ok(entry)
        }

        async fn list(&self) -> Result<Vec<DeckEntry>, GatewayError> {
            self.guard()?;
            Ok(self.decks.lock().unwrap().clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
            self.guard()?;
            self.decks.lock().unwrap().retain(|e| e.id != id);
            Ok(())
        }
    }

    fn records() -> Vec<Record> {
        vec![Record::new("Q1", "A1"), Record::new("Q2", "A2")]
    }

    #[tokio::test]
    async fn save_then_refresh_lists_newest_first() {
        let gateway = MemoryGateway::default();
        let mut library = DeckLibrary::new(&gateway);

        let first = library.save("First", &records()).await.unwrap();
        let second = library.save("Second", &records()).await.unwrap();

        let titles: Vec<String> = library
            .refresh()
            .await
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, vec!["Second".to_string(), "First".to_string()]);
        assert_eq!(library.find(first.id).unwrap().title, "First");
        assert_eq!(library.find(second.id).unwrap().to_records(), records());
    }

    #[tokio::test]
    async fn invalid_save_never_reaches_gateway() {
        let gateway = MemoryGateway::default();
        let mut library = DeckLibrary::new(&gateway);

        let err = library.save("  ", &records()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(ValidationError::EmptyTitle)));

        let err = library.save("Empty", &[]).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(ValidationError::EmptyDeck)));

        let blank = vec![Record::new("Q1", "A1"), Record::new("", "A2")];
        let err = library.save("Blank", &blank).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::BlankCard { index: 1 })
        ));

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let gateway = MemoryGateway::default();
        let mut library = DeckLibrary::new(&gateway);
        library.save("Kept", &records()).await.unwrap();
        library.refresh().await.unwrap();

        gateway.fail(true);
        assert!(library.refresh().await.is_err());
        assert_eq!(library.entries().len(), 1);
        assert_eq!(library.entries()[0].title, "Kept");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let gateway = MemoryGateway::default();
        let mut library = DeckLibrary::new(&gateway);
        let entry = library.save("Doomed", &records()).await.unwrap();

        assert!(!library.delete(entry.id, false).await.unwrap());
        assert_eq!(gateway.decks.lock().unwrap().len(), 1);

        assert!(library.delete(entry.id, true).await.unwrap());
        assert!(gateway.decks.lock().unwrap().is_empty());
        assert!(library.find(entry.id).is_none());
    }

    #[tokio::test]
    async fn failed_delete_keeps_entry() {
        let gateway = MemoryGateway::default();
        let mut library = DeckLibrary::new(&gateway);
        let entry = library.save("Sticky", &records()).await.unwrap();

        gateway.fail(true);
        assert!(library.delete(entry.id, true).await.is_err());
        assert!(library.find(entry.id).is_some());
    }

    #[test]
    fn backend_error_message() {
        let err = GatewayError::Backend {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error: 404 - not found");
    }
}
