use async_trait::async_trait;

use calc_core::store::factory::{StoreConfig, StoreFactory};
use calc_core::store::repository::{RoundStore, StoreError};

use crate::repository::SqliteRoundStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`calc_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use calc_core::store::StoreRegistry;
/// use calc_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A sqlx-style URL — e.g. `"sqlite:golf.db?mode=rwc"` to create the
    ///   file if it does not exist.
    /// * `":memory:"` — an ephemeral in-memory database (useful for tests).
    ///
    /// Migrations run before the store is returned.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn RoundStore>, StoreError> {
        let store = SqliteRoundStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use calc_core::store::factory::{StoreConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    /// Full round-trip: factory → SqliteRoundStore with an in-memory DB.
    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let result = SqliteStoreFactory.create(&config).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory store: {:#?}",
            result.err()
        );
    }
}
