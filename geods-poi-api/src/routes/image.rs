use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::AppState;
use crate::{error::PoiApiError, image::ImageSummary};

/// only categories with a marker are looked up
pub async fn image(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ImageSummary>, PoiApiError> {
    if !state.markers.contains(&category) {
        return Err(PoiApiError::NotFound(String::from("category not found")));
    }
    state
        .images
        .first_photo(&category)
        .await?
        .map(Json)
        .ok_or_else(|| PoiApiError::NotFound(String::from("no image found for category")))
}
