//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Deck Repository ===

    /// Insert a named deck
    pub async fn create_deck(&self, deck: &NewDeck) -> Result<DbDeck> {
        let row = sqlx::query_as::<_, DbDeck>(
            r#"
            INSERT INTO decks (title, records)
            VALUES ($1, $2)
            RETURNING id, title, records, created_at
            "#,
        )
        .bind(deck.title.trim())
        .bind(Json(&deck.records))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all decks, newest first
    pub async fn list_decks(&self) -> Result<Vec<DbDeck>> {
        let rows = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, title, records, created_at
            FROM decks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a deck by ID
    pub async fn get_deck(&self, id: Uuid) -> Result<Option<DbDeck>> {
        let row = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, title, records, created_at
            FROM decks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete a deck. Returns false when no deck had that ID.
    pub async fn delete_deck(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
