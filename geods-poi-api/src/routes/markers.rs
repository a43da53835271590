use std::{path::Path, sync::Arc};

use axum::{
    extract::{Path as UrlPath, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::PoiApiError;

pub async fn marker(
    State(state): State<Arc<AppState>>,
    UrlPath(category): UrlPath<String>,
) -> Result<Response, PoiApiError> {
    let icon = state
        .markers
        .icon_path(&category)
        .ok_or_else(|| PoiApiError::NotFound(String::from("category not found")))?;
    png(&icon).await
}

pub async fn shadow(State(state): State<Arc<AppState>>) -> Result<Response, PoiApiError> {
    png(&state.markers.shadow_path()).await
}

async fn png(path: &Path) -> Result<Response, PoiApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        log::warn!("cannot read marker '{}': {e}", path.display());
        PoiApiError::NotFound(String::from("marker not found"))
    })?;
    Ok(([(CONTENT_TYPE, "image/png")], bytes).into_response())
}
