//! The round history store.
//!
//! One calculator keeps durable state: the golf handicap round list. The
//! store is a capped collection: at most [`ROUND_HISTORY_CAP`] rounds are
//! retained, and inserting beyond the cap evicts the oldest entries by
//! creation time. Backends implement [`RoundStore`]; the calculation layer
//! never touches a database directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{GolfRound, NewGolfRound};

/// Maximum rounds retained; older entries are evicted on insert.
pub const ROUND_HISTORY_CAP: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait RoundStore: Send + Sync {
    /// Inserts a round and enforces the history cap, evicting the oldest
    /// entries (by creation time) beyond [`ROUND_HISTORY_CAP`].
    async fn add_round(&self, round: NewGolfRound) -> Result<GolfRound, StoreError>;

    /// All retained rounds, most recently played first.
    async fn list_rounds(&self) -> Result<Vec<GolfRound>, StoreError>;

    async fn delete_round(&self, id: i64) -> Result<(), StoreError>;

    async fn clear_rounds(&self) -> Result<(), StoreError>;

    async fn round_count(&self) -> Result<usize, StoreError>;
}
