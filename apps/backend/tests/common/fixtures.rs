//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Generate `num_cards` question/answer payloads.
pub fn sample_records(num_cards: usize) -> serde_json::Value {
    let records: Vec<serde_json::Value> = (0..num_cards)
        .map(|i| {
            json!({
                "front": format!("Question {}?", i + 1),
                "back": format!("Answer {}.", i + 1),
            })
        })
        .collect();
    json!(records)
}

/// Create a save deck request body.
pub fn create_deck_request(title: &str, num_cards: usize) -> serde_json::Value {
    json!({
        "title": title,
        "records": sample_records(num_cards),
    })
}

/// Generate a unique deck title to avoid collisions between runs.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Parse the `id` field of a deck entry response.
pub fn deck_id(body: &serde_json::Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("response should contain a deck id")
}
