use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::models::{ApiResponse, ChannelQuery, ImportRequest, ImportResponse, MessageResponse, NewChannel};
use crate::services::m3u_parser;
use crate::AppState;

/// Non-numeric ids behave like unknown ones
fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found("Channel not found"))
}

/// GET /api/channels - Search, filter, sort and paginate
pub async fn list_channels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
) -> impl IntoResponse {
    Json(state.channels.list(&query, state.config.max_items_page).await)
}

/// GET /api/channels/:id
pub async fn get_channel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let channel = state
        .channels
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found("Channel not found"))?;

    Ok(Json(ApiResponse::success(channel)))
}

/// POST /api/channels - Add a channel by hand
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<NewChannel>>,
) -> ApiResult<impl IntoResponse> {
    let new = payload.map(|Json(p)| p).unwrap_or_default();

    let channel = state
        .channels
        .create(new)
        .await
        .ok_or_else(|| ApiError::bad_request("Name and URL are required fields"))?;

    tracing::info!(id = channel.id, name = %channel.name, "Channel created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(channel))))
}

/// DELETE /api/channels/:id
pub async fn delete_channel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;

    if !state.channels.delete(id).await {
        return Err(ApiError::not_found("Channel not found"));
    }

    tracing::info!(id, "Channel deleted");

    Ok(Json(MessageResponse::new("Channel deleted successfully")))
}

/// GET /api/channels/categories/list
pub async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::success(state.channels.categories().await))
}

/// GET /api/channels/countries/list
pub async fn list_countries(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::success(state.channels.countries().await))
}

/// POST /api/channels/import-m3u - Decode a playlist and append its channels
pub async fn import_m3u(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let max_bytes = state.config.max_m3u_bytes();
    let too_large = || {
        ApiError::PayloadTooLarge(format!(
            "Playlist too large (limit {}MB)",
            state.config.max_m3u_size_mb
        ))
    };

    let content = match payload {
        Ok(Json(req)) => req.m3u_content.filter(|c| !c.is_empty()),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(too_large());
        }
        Err(rejection) => {
            tracing::debug!("Import body rejected: {}", rejection);
            None
        }
    }
    .ok_or_else(|| ApiError::bad_request("M3U content is required"))?;

    if content.len() > max_bytes {
        return Err(too_large());
    }

    let decoded = m3u_parser::decode(&content);
    let stored = state.channels.append(decoded).await;

    metrics::PLAYLIST_IMPORTS.inc();
    metrics::CHANNELS_IMPORTED.inc_by(stored.len() as u64);
    tracing::info!(
        bytes = content.len(),
        channels = stored.len(),
        "Playlist imported"
    );

    Ok(Json(ImportResponse {
        success: true,
        message: format!("Added {} new channels", stored.len()),
        data: stored,
    }))
}
