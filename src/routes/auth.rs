//! Provider connection endpoints and the bearer-token extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::models::{
    ApiResponse, ConnectRequest, ConnectResponse, ConnectServerInfo, ConnectionSummary,
    MessageResponse, ServerInfo,
};
use crate::services::connections::TokenLookup;
use crate::services::xtream::XtreamCredentials;
use crate::AppState;

/// Provider details reported until real account data is fetched
const SERVER_NAME: &str = "IPTV Server";
const EXPIRY_DATE: &str = "2025-12-31";
const ACTIVE_CONNECTIONS: &str = "1";
const MAX_CONNECTIONS: &str = "1";
const ALLOWED_FORMATS: [&str; 3] = ["m3u8", "ts", "rtmp"];

/// Caller authenticated by a bearer token
#[derive(Debug, Clone)]
pub struct AuthConnection {
    pub connection_id: String,
    pub token: String,
}

/// Second space-separated part of the header, e.g. `Bearer <token>`
fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthConnection {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::unauthorized("No token provided"))?
            .to_string();

        match state.connections.resolve(&token).await {
            TokenLookup::Valid(connection_id) => Ok(Self {
                connection_id,
                token,
            }),
            TokenLookup::Invalid => Err(ApiError::unauthorized("Invalid token")),
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/auth/connect - Register provider credentials and issue a token
pub async fn connect(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<ConnectRequest>>,
) -> ApiResult<impl IntoResponse> {
    let req = payload.map(|Json(p)| p).unwrap_or_default();

    let (url, username, password) = match (
        required(req.url),
        required(req.username),
        required(req.password),
    ) {
        (Some(url), Some(username), Some(password)) => (url, username, password),
        _ => {
            return Err(ApiError::bad_request(
                "Please provide URL, username and password",
            ))
        }
    };

    let creds = XtreamCredentials::new(&url, &username, &password);
    if !creds.has_valid_server() {
        tracing::warn!(server = %creds.server, "Rejected connection with invalid server URL");
        return Err(ApiError::unauthorized(
            "Invalid IPTV credentials or server URL",
        ));
    }

    let (connection, token) = state.connections.connect(&creds).await;
    metrics::ACTIVE_CONNECTIONS.set(state.connections.active_count().await as i64);

    tracing::info!(
        connection_id = %connection.id,
        server = %connection.url,
        username = %connection.username,
        "Provider connected"
    );

    Ok(Json(ConnectResponse {
        success: true,
        token,
        connection: ConnectionSummary {
            id: connection.id,
            url: connection.url,
            username: connection.username,
            server_info: ConnectServerInfo {
                server_name: SERVER_NAME.to_string(),
                expiry_date: EXPIRY_DATE.to_string(),
                active_connections: ACTIVE_CONNECTIONS.to_string(),
                max_connections: MAX_CONNECTIONS.to_string(),
            },
        },
    }))
}

/// GET /api/auth/server-info - Account details for the caller's connection
pub async fn server_info(
    State(state): State<Arc<AppState>>,
    auth: AuthConnection,
) -> ApiResult<impl IntoResponse> {
    let connection = state
        .connections
        .get(&auth.connection_id)
        .await
        .ok_or_else(|| ApiError::not_found("Connection not found"))?;

    Ok(Json(ApiResponse::success(ServerInfo {
        url: connection.url,
        username: connection.username,
        status: "Active".to_string(),
        expiry_date: EXPIRY_DATE.to_string(),
        is_trial: false,
        active_cons: ACTIVE_CONNECTIONS.to_string(),
        max_connections: MAX_CONNECTIONS.to_string(),
        allowed_formats: ALLOWED_FORMATS.iter().map(|f| f.to_string()).collect(),
    })))
}

/// POST /api/auth/disconnect - Drop the connection and revoke the token
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    auth: AuthConnection,
) -> impl IntoResponse {
    state
        .connections
        .disconnect(&auth.connection_id, &auth.token)
        .await;
    metrics::ACTIVE_CONNECTIONS.set(state.connections.active_count().await as i64);

    tracing::info!(connection_id = %auth.connection_id, "Provider disconnected");

    Json(MessageResponse::new("Disconnected successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{connect_token, json_request, read_json, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token(""), None);
    }

    #[tokio::test]
    async fn test_connect_issues_token() {
        let response = test_app()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/connect",
                None,
                Some(json!({
                    "url": "http://provider.example:8080/",
                    "username": "alice",
                    "password": "s3cret"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["token"].as_str().unwrap().len() >= 32);
        assert_eq!(body["connection"]["url"], "http://provider.example:8080");
        assert_eq!(body["connection"]["username"], "alice");
        assert_eq!(body["connection"]["serverInfo"]["serverName"], "IPTV Server");
        assert!(body["connection"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_connect_validation() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/connect",
                None,
                Some(json!({ "url": "http://provider.example", "username": "alice" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await["error"],
            "Please provide URL, username and password"
        );

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/connect",
                None,
                Some(json!({ "url": "provider.example", "username": "a", "password": "b" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            read_json(response).await["error"],
            "Invalid IPTV credentials or server URL"
        );
    }

    #[tokio::test]
    async fn test_server_info_requires_token() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/auth/server-info", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(response).await["error"], "No token provided");

        let response = app
            .oneshot(json_request(
                Method::GET,
                "/api/auth/server-info",
                Some("bogus"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(response).await["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_server_info_and_disconnect() {
        let app = test_app();
        let token = connect_token(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::GET,
                "/api/auth/server-info",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], "Active");
        assert_eq!(body["data"]["username"], "alice");
        assert_eq!(body["data"]["allowedFormats"], json!(["m3u8", "ts", "rtmp"]));

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/disconnect",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["message"], "Disconnected successfully");

        let response = app
            .oneshot(json_request(
                Method::GET,
                "/api/auth/server-info",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
