//! Application state - shared across all handlers.

use std::sync::Arc;

use forum_core::PostService;
use forum_core::ports::PostRepository;
use forum_infra::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use forum_infra::PostgresPostRepository;

/// Which store backs the post service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    InMemory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::InMemory => "in-memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub store: StoreBackend,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with the appropriate repository.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the connection cannot be established.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let repo: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(conn.main.clone()));
                    Self {
                        posts: PostService::new(repo),
                        store: StoreBackend::Postgres,
                        db: Some(conn),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            Self::in_memory()
        };

        tracing::info!(store = state.store.as_str(), "Application state initialized");
        state
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), StoreBackend::InMemory)
    }

    /// State over any repository implementation.
    pub fn with_repository(repo: Arc<dyn PostRepository>, store: StoreBackend) -> Self {
        Self {
            posts: PostService::new(repo),
            store,
            db: None,
        }
    }
}
