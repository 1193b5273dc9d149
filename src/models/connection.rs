use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider connection held in memory for the lifetime of its tokens
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub api_url: String,
    pub connected_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

/// Request body for POST /api/auth/connect
#[derive(Debug, Default, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Summary of the provider returned right after connecting
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectServerInfo {
    pub server_name: String,
    pub expiry_date: String,
    pub active_connections: String,
    pub max_connections: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummary {
    pub id: String,
    pub url: String,
    pub username: String,
    pub server_info: ConnectServerInfo,
}

/// Response for POST /api/auth/connect
#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub success: bool,
    pub token: String,
    pub connection: ConnectionSummary,
}

/// Account details for GET /api/auth/server-info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub url: String,
    pub username: String,
    pub status: String,
    pub expiry_date: String,
    pub is_trial: bool,
    pub active_cons: String,
    pub max_connections: String,
    pub allowed_formats: Vec<String>,
}

/// Plain `{success, message}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
