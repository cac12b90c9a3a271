//! Store connection settings.

/// Default upper bound on pooled connections for file-backed databases.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for opening a [`SqliteRepository`](crate::SqliteRepository).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct StoreConfig {
    /// sqlx connection string, e.g. `sqlite://app.db` or `sqlite::memory:`.
    pub url: String,

    /// Maximum number of pooled connections. Ignored for in-memory databases,
    /// which always use a single connection.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Create a config for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), max_connections: DEFAULT_MAX_CONNECTIONS }
    }

    /// A private in-memory database, discarded when the pool closes.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Override the pool size.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// `true` if the URL names an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
