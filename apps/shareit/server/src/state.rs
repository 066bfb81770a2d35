//! Shared state of the readiness probe.

/// Cloned into handlers that need the raw connection pool
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
