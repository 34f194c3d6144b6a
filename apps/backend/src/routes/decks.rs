//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<DeckListResponse>> {
    let decks = state
        .db
        .list_decks()
        .await?
        .into_iter()
        .map(DbDeck::into_entry)
        .collect();
    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<NewDeck>,
) -> Result<(StatusCode, Json<DeckEntry>)> {
    request.check()?;

    let entry = state.db.create_deck(&request).await?.into_entry();
    tracing::info!(deck_id = %entry.id, cards = entry.records.len(), "deck saved");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/decks/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<DeckEntry>> {
    let deck = state
        .db
        .get_deck(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("deck {}", id)))?;
    Ok(Json(deck.into_entry()))
}

/// DELETE /api/decks/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteDeckResponse>> {
    if !state.db.delete_deck(id).await? {
        return Err(ApiError::NotFound(format!("deck {}", id)));
    }
    tracing::info!(deck_id = %id, "deck deleted");

    Ok(Json(DeleteDeckResponse { deleted: true }))
}
