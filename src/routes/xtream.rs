//! Xtream Codes Proxy Routes
//!
//! Serve the provider catalog to authenticated callers and build playback
//! URLs from the caller's stored credentials.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{ApiResponse, CountedResponse};
use crate::routes::auth::AuthConnection;
use crate::services::xtream::{StreamKind, StreamUrl, XtreamCredentials};
use crate::AppState;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize, Default)]
pub struct StreamsQuery {
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct StreamUrlQuery {
    #[serde(default = "default_stream_type", rename = "type")]
    pub kind: String,
}

fn default_stream_type() -> String {
    StreamKind::Live.as_str().to_string()
}

fn category_filter(query: &StreamsQuery) -> Option<&str> {
    query.category_id.as_deref().filter(|c| !c.is_empty())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/xtream/live-categories
pub async fn live_categories(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
) -> impl IntoResponse {
    Json(ApiResponse::success(state.catalog.live_categories()))
}

/// GET /api/xtream/live-streams?category_id=
pub async fn live_streams(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
    Query(query): Query<StreamsQuery>,
) -> impl IntoResponse {
    Json(CountedResponse::new(
        state.catalog.live_streams(category_filter(&query)),
    ))
}

/// GET /api/xtream/vod-categories
pub async fn vod_categories(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
) -> impl IntoResponse {
    Json(ApiResponse::success(state.catalog.vod_categories()))
}

/// GET /api/xtream/vod-streams?category_id=
pub async fn vod_streams(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
    Query(query): Query<StreamsQuery>,
) -> impl IntoResponse {
    Json(CountedResponse::new(
        state.catalog.vod_streams(category_filter(&query)),
    ))
}

/// GET /api/xtream/series-categories
pub async fn series_categories(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
) -> impl IntoResponse {
    Json(ApiResponse::success(state.catalog.series_categories()))
}

/// GET /api/xtream/epg/:stream_id
pub async fn epg(
    State(state): State<Arc<AppState>>,
    _auth: AuthConnection,
    Path(stream_id): Path<String>,
) -> impl IntoResponse {
    Json(ApiResponse::success(state.catalog.short_epg(&stream_id)))
}

/// GET /api/xtream/stream-url/:stream_id?type=live|movie|series
pub async fn stream_url(
    State(state): State<Arc<AppState>>,
    auth: AuthConnection,
    Path(stream_id): Path<String>,
    Query(query): Query<StreamUrlQuery>,
) -> ApiResult<impl IntoResponse> {
    let kind = StreamKind::parse(&query.kind)
        .ok_or_else(|| ApiError::bad_request("Unsupported stream type"))?;

    let connection = state
        .connections
        .get(&auth.connection_id)
        .await
        .ok_or_else(|| ApiError::not_found("Connection not found"))?;

    let creds = XtreamCredentials::new(&connection.url, &connection.username, &connection.password);
    let url = creds.stream_url(kind, &stream_id);

    tracing::debug!(stream_id = %stream_id, kind = %kind, "Built stream URL");

    Ok(Json(ApiResponse::success(StreamUrl {
        stream_id,
        url,
        kind: kind.to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{connect_token, json_request, read_json, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_routes_require_token() {
        let app = test_app();

        for path in [
            "/api/xtream/live-categories",
            "/api/xtream/live-streams",
            "/api/xtream/vod-categories",
            "/api/xtream/vod-streams",
            "/api/xtream/series-categories",
            "/api/xtream/epg/1001",
            "/api/xtream/stream-url/1001",
        ] {
            let response = app
                .clone()
                .oneshot(json_request(Method::GET, path, None, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_categories() {
        let app = test_app();
        let token = connect_token(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(Method::GET, "/api/xtream/live-categories", Some(&token), None))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"][0]["category_name"], "Sports");

        let response = app
            .oneshot(json_request(Method::GET, "/api/xtream/series-categories", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(read_json(response).await["data"][2]["category_name"], "Disney+");
    }

    #[tokio::test]
    async fn test_streams_filtered_by_category() {
        let app = test_app();
        let token = connect_token(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::GET,
                "/api/xtream/live-streams?category_id=2",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(read_json(response).await["count"], 2);

        let response = app
            .oneshot(json_request(
                Method::GET,
                "/api/xtream/vod-streams?category_id=13",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["count"], 0);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_epg_tagged_with_stream_id() {
        let app = test_app();
        let token = connect_token(&app).await;

        let response = app
            .oneshot(json_request(Method::GET, "/api/xtream/epg/1002", Some(&token), None))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"][0]["channel_id"], "1002");
        assert_eq!(body["data"][1]["title"], "Documentary Hour");
    }

    #[tokio::test]
    async fn test_stream_url_uses_connection_credentials() {
        let app = test_app();
        let token = connect_token(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::GET,
                "/api/xtream/stream-url/1001",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"]["type"], "live");
        assert_eq!(
            body["data"]["url"],
            "http://provider.example:8080/live/alice/s3cret/1001.m3u8"
        );

        let response = app
            .clone()
            .oneshot(json_request(
                Method::GET,
                "/api/xtream/stream-url/5001?type=movie",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(
            read_json(response).await["data"]["url"],
            "http://provider.example:8080/movie/alice/s3cret/5001.mp4"
        );

        let response = app
            .oneshot(json_request(
                Method::GET,
                "/api/xtream/stream-url/1?type=radio",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
