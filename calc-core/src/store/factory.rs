use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{RoundStore, StoreError};

/// Backend-agnostic connection configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory.  `connection_string` is passed through to that factory
/// unchanged — its meaning is entirely backend-specific.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `golf.db`, `:memory:`               |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// One implementation per storage backend.  Each backend crate exports a
/// single unit struct that implements this trait and is registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) a connection and return a ready-to-use store.
    /// Implementations are free to run migrations or warm connection pools
    /// inside this method.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn RoundStore>, StoreError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `StoreRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` whenever a new store is needed.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`StoreFactory::backend_name`] is already
    /// present it is silently replaced.
    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return
    /// the store it produces.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] — no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn RoundStore>, StoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::models::{GolfRound, NewGolfRound};

    use super::{RoundStore, StoreConfig, StoreError, StoreFactory, StoreRegistry};

    // ── stub store ───────────────────────────────────────────────────────
    // Every method is `unimplemented!()` — the tests never call them;
    // they only verify that the registry routes to the correct factory.
    struct StubStore;

    #[async_trait]
    impl RoundStore for StubStore {
        async fn add_round(&self, _round: NewGolfRound) -> Result<GolfRound, StoreError> {
            unimplemented!()
        }
        async fn list_rounds(&self) -> Result<Vec<GolfRound>, StoreError> {
            unimplemented!()
        }
        async fn delete_round(&self, _id: i64) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn clear_rounds(&self) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn round_count(&self) -> Result<usize, StoreError> {
            unimplemented!()
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    /// A factory whose `create` flips an `AtomicBool` and returns a
    /// [`StubStore`].  The flag lets tests prove that `create` was
    /// actually called.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StoreFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn RoundStore>, StoreError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubStore))
        }
    }

    /// A factory that always returns a `Connection` error — used to verify
    /// that the registry surfaces errors from the underlying factory.
    struct FailingFactory;

    #[async_trait]
    impl StoreFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn RoundStore>, StoreError> {
            Err(StoreError::Connection("intentional failure".to_string()))
        }
    }

    /// Build a `StubFactory` and return it alongside the flag so tests can
    /// assert whether `create` was reached.
    fn stub_factory(name: &'static str) -> (Box<dyn StoreFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    // ── StoreConfig ──────────────────────────────────────────────────────
    #[test]
    fn config_default_is_sqlite_memory() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, ":memory:");
    }

    // ── registry construction ────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(StoreRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn default_registry_is_empty() {
        assert!(StoreRegistry::default().available_backends().is_empty());
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn register_single_backend() {
        let mut reg = StoreRegistry::new();
        let (factory, _) = stub_factory("sqlite");
        reg.register(factory);
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = StoreRegistry::new();
        // Register in reverse alphabetical order on purpose.
        let (f1, _) = stub_factory("sqlite");
        let (f2, _) = stub_factory("postgres");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["postgres", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = StoreRegistry::new();
        let (old, _) = stub_factory("sqlite");
        let (new, _) = stub_factory("sqlite");
        reg.register(old);
        reg.register(new);
        // Only one entry should remain.
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    // ── successful dispatch ──────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_matching_factory() {
        let mut reg = StoreRegistry::new();
        let (factory, called) = stub_factory("sqlite");
        reg.register(factory);

        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let result = reg.create(&config).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(
            called.load(Ordering::SeqCst),
            "factory create was not invoked"
        );
    }

    #[tokio::test]
    async fn create_does_not_call_non_matching_factory() {
        let mut reg = StoreRegistry::new();
        let (sqlite_factory, sqlite_called) = stub_factory("sqlite");
        let (postgres_factory, _postgres_called) = stub_factory("postgres");
        reg.register(sqlite_factory);
        reg.register(postgres_factory);

        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        reg.create(&config).await.unwrap();
        assert!(sqlite_called.load(Ordering::SeqCst));
    }

    // ── unknown backend ──────────────────────────────────────────────────
    #[tokio::test]
    async fn unknown_backend_returns_configuration_error() {
        let reg = StoreRegistry::new();
        let config = StoreConfig {
            backend: "nope".to_string(),
            connection_string: "x".to_string(),
        };
        assert!(matches!(
            reg.create(&config).await,
            Err(StoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn configuration_error_names_requested_and_available_backends() {
        let mut reg = StoreRegistry::new();
        let (f, _) = stub_factory("sqlite");
        reg.register(f);

        let config = StoreConfig {
            backend: "postgres".to_string(),
            connection_string: "x".to_string(),
        };

        match reg.create(&config).await {
            Err(StoreError::Configuration(msg)) => {
                assert!(
                    msg.contains("postgres"),
                    "error should name the requested backend"
                );
                assert!(
                    msg.contains("sqlite"),
                    "error should list available backends"
                );
            }
            Ok(_) => panic!("expected Configuration error, got Ok(store)"),
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
        }
    }

    // ── factory errors propagate ─────────────────────────────────────────
    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = StoreRegistry::new();
        reg.register(Box::new(FailingFactory));

        let config = StoreConfig {
            backend: "failing".to_string(),
            connection_string: "x".to_string(),
        };

        let err = reg
            .create(&config)
            .await
            .err()
            .expect("factory error should propagate");
        assert_eq!(
            err,
            StoreError::Connection("intentional failure".to_string())
        );
    }
}
