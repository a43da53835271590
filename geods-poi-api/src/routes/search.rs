use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use geods_poi_core::search::PointOfInterest;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::PoiApiError;

/// raw query parameters. a missing `bbox` is rejected by the parser, a
/// missing `categories` matches everything.
#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub bbox: String,
    #[serde(default)]
    pub categories: String,
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub results: Vec<PointOfInterest>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, PoiApiError> {
    let Query(params) = params.map_err(|e| PoiApiError::InvalidUserInput(e.body_text()))?;
    let results = state
        .search
        .search(&params.bbox, &params.categories)
        .await?;
    Ok(Json(SearchResponse { results }))
}
