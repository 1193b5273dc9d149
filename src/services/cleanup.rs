//! Cleanup service for expired tokens
//!
//! Runs as a background task on startup, then periodically.
//! - Drops tokens past their expiry
//! - Drops connections no remaining token refers to

use std::time::Duration;
use tokio::time;

use crate::metrics;
use crate::services::connections::ConnectionStore;

/// Configuration for the cleanup service
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_secs: u64,
}

/// Result of a cleanup operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupResult {
    pub tokens_deleted: usize,
    pub connections_deleted: usize,
}

impl CleanupResult {
    pub fn total_deleted(&self) -> usize {
        self.tokens_deleted + self.connections_deleted
    }
}

/// Run a single cleanup cycle
pub async fn run_cleanup(connections: &ConnectionStore) -> CleanupResult {
    let (tokens_deleted, connections_deleted) = connections.purge_expired().await;
    let result = CleanupResult {
        tokens_deleted,
        connections_deleted,
    };

    if result.total_deleted() > 0 {
        tracing::info!(
            "Cleanup: deleted {} expired tokens, {} idle connections",
            result.tokens_deleted,
            result.connections_deleted
        );
    }
    metrics::ACTIVE_CONNECTIONS.set(connections.active_count().await as i64);

    result
}

/// Start the background cleanup task
///
/// The first tick fires immediately, then every `interval_secs`.
/// This should be spawned as a background task using `tokio::spawn`.
pub async fn start_cleanup_task(connections: ConnectionStore, config: CleanupConfig) {
    tracing::info!("Starting cleanup task (interval: {}s)", config.interval_secs);

    let mut interval = time::interval(Duration::from_secs(config.interval_secs.max(1)));

    loop {
        interval.tick().await;
        run_cleanup(&connections).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::xtream::XtreamCredentials;

    #[tokio::test]
    async fn test_run_cleanup_removes_expired() {
        let store = ConnectionStore::new(0);
        let creds = XtreamCredentials::new("http://example.com", "u", "p");
        store.connect(&creds).await;
        store.connect(&creds).await;

        let result = run_cleanup(&store).await;
        assert_eq!(
            result,
            CleanupResult {
                tokens_deleted: 2,
                connections_deleted: 2
            }
        );
        assert_eq!(result.total_deleted(), 4);
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_run_cleanup_keeps_live_tokens() {
        let store = ConnectionStore::new(3600);
        let creds = XtreamCredentials::new("http://example.com", "u", "p");
        store.connect(&creds).await;

        assert_eq!(run_cleanup(&store).await.total_deleted(), 0);
        assert_eq!(store.active_count().await, 1);
    }
}
