//! Provider connections and the bearer tokens issued for them
//!
//! Tokens are opaque random strings; nothing is signed. Connections and
//! tokens live in separate maps, so a resolved token may still point at a
//! connection that has since been removed.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Connection;
use crate::services::xtream::XtreamCredentials;

#[derive(Debug, Clone)]
struct TokenEntry {
    connection_id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct ConnectionsInner {
    connections: HashMap<String, Connection>,
    tokens: HashMap<String, TokenEntry>,
}

/// Result of resolving a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    /// Token valid; carries the connection id it was issued for
    Valid(String),
    Invalid,
}

/// Shared handle to connections and tokens
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    inner: Arc<RwLock<ConnectionsInner>>,
    token_ttl: Duration,
}

impl ConnectionStore {
    pub fn new(token_ttl_seconds: u64) -> Self {
        let ttl_secs = i64::try_from(token_ttl_seconds).unwrap_or(i64::MAX / 1000);
        Self {
            inner: Arc::new(RwLock::new(ConnectionsInner::default())),
            token_ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        }
    }

    /// Store a new connection and issue a token for it
    pub async fn connect(&self, creds: &XtreamCredentials) -> (Connection, String) {
        let now = Utc::now();
        let connection = Connection {
            id: Uuid::new_v4().to_string(),
            url: creds.server.clone(),
            username: creds.username.clone(),
            password: creds.password.clone(),
            api_url: creds.api_url(),
            connected_at: now,
            last_activity: now,
        };
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = now.checked_add_signed(self.token_ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut inner = self.inner.write().await;
        inner
            .connections
            .insert(connection.id.clone(), connection.clone());
        inner.tokens.insert(
            token.clone(),
            TokenEntry {
                connection_id: connection.id.clone(),
                expires_at,
            },
        );

        (connection, token)
    }

    /// Resolve a token, refreshing the connection's last activity
    pub async fn resolve(&self, token: &str) -> TokenLookup {
        let now = Utc::now();
        let mut inner = self.inner.write().await;

        let connection_id = match inner.tokens.get(token) {
            Some(entry) if entry.expires_at > now => entry.connection_id.clone(),
            Some(_) => {
                inner.tokens.remove(token);
                return TokenLookup::Invalid;
            }
            None => return TokenLookup::Invalid,
        };

        if let Some(connection) = inner.connections.get_mut(&connection_id) {
            connection.last_activity = now;
        }

        TokenLookup::Valid(connection_id)
    }

    pub async fn get(&self, connection_id: &str) -> Option<Connection> {
        self.inner.read().await.connections.get(connection_id).cloned()
    }

    /// Remove a connection and revoke the given token. Idempotent.
    pub async fn disconnect(&self, connection_id: &str, token: &str) {
        let mut inner = self.inner.write().await;
        inner.connections.remove(connection_id);
        inner.tokens.remove(token);
    }

    pub async fn active_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }

    /// Drop expired tokens, then connections no token refers to.
    /// Returns (tokens removed, connections removed).
    pub async fn purge_expired(&self) -> (usize, usize) {
        let now = Utc::now();
        let mut inner = self.inner.write().await;

        let tokens_before = inner.tokens.len();
        inner.tokens.retain(|_, entry| entry.expires_at > now);
        let tokens_removed = tokens_before - inner.tokens.len();

        let ConnectionsInner {
            connections,
            tokens,
        } = &mut *inner;
        let connections_before = connections.len();
        connections.retain(|id, _| tokens.values().any(|t| &t.connection_id == id));
        let connections_removed = connections_before - connections.len();

        (tokens_removed, connections_removed)
    }
}
