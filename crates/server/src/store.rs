//! Sqlite-backed cache of searched positions, keyed by the 71-character
//! board encoding.

use sqlx::{Pool, Sqlite};

#[derive(Clone)]
pub struct PositionStore {
    pool: Pool<Sqlite>,
}

impl PositionStore {
    /// Wraps the pool and makes sure the cache table exists.
    pub async fn new(pool: Pool<Sqlite>) -> Result<Self, sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS position (
                name CHAR(71) NOT NULL PRIMARY KEY,
                best_move CHAR(5) NOT NULL,
                score REAL NOT NULL
            );",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    /// Cached best move and score for an encoding, if present.
    pub async fn lookup(&self, encoding: &str) -> Result<Option<(String, f64)>, sqlx::Error> {
        sqlx::query_as("SELECT best_move, score FROM position WHERE name = ?")
            .bind(encoding)
            .fetch_optional(&self.pool)
            .await
    }

    /// Stores a search result, replacing any previous entry for the encoding.
    pub async fn insert(
        &self,
        encoding: &str,
        best_move: &str,
        score: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR REPLACE INTO position (name, best_move, score) VALUES (?, ?, ?)")
            .bind(encoding)
            .bind(best_move)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
