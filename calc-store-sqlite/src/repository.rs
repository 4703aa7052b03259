use anyhow::{Context, Result};
use async_trait::async_trait;
use calc_core::models::{GolfRound, NewGolfRound};
use calc_core::store::repository::{ROUND_HISTORY_CAP, RoundStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use crate::decimal::{decimal_to_f64, get_decimal};

pub struct SqliteRoundStore {
    pool: SqlitePool,
}

impl SqliteRoundStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Deletes everything but the newest [`ROUND_HISTORY_CAP`] rounds by
    /// creation time (id breaks ties for same-instant inserts).
    async fn evict_beyond_cap(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM golf_rounds WHERE id NOT IN (
                SELECT id FROM golf_rounds ORDER BY created_at DESC, id DESC LIMIT ?
             )",
        )
        .bind(ROUND_HISTORY_CAP as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

fn row_to_round(row: &sqlx::sqlite::SqliteRow) -> Result<GolfRound, StoreError> {
    Ok(GolfRound {
        id: row
            .try_get("id")
            .map_err(|e| StoreError::Database(e.to_string()))?,
        played_on: row
            .try_get::<NaiveDate, _>("played_on")
            .map_err(|e| StoreError::Database(format!("Failed to get played_on: {}", e)))?,
        score: row
            .try_get("score")
            .map_err(|e| StoreError::Database(e.to_string()))?,
        course_rating: get_decimal(row, "course_rating")?,
        slope_rating: row
            .try_get("slope_rating")
            .map_err(|e| StoreError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| StoreError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl RoundStore for SqliteRoundStore {
    async fn add_round(&self, round: NewGolfRound) -> Result<GolfRound, StoreError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO golf_rounds (played_on, score, course_rating, slope_rating, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(round.played_on)
        .bind(round.score)
        .bind(decimal_to_f64(round.course_rating))
        .bind(round.slope_rating)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        let evicted = self.evict_beyond_cap().await?;
        if evicted > 0 {
            debug!(evicted, "evicted oldest rounds beyond history cap");
        }

        let row = sqlx::query(
            "SELECT id, played_on, score, course_rating, slope_rating, created_at
             FROM golf_rounds WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        row_to_round(&row)
    }

    async fn list_rounds(&self) -> Result<Vec<GolfRound>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, played_on, score, course_rating, slope_rating, created_at
             FROM golf_rounds ORDER BY played_on DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(row_to_round).collect()
    }

    async fn delete_round(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM golf_rounds WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn clear_rounds(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM golf_rounds")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn round_count(&self) -> Result<usize, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM golf_rounds")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(count as usize)
    }
}
