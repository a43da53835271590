use std::sync::Arc;

use axum::{extract::State, Json};

use super::AppState;
use crate::gpkg::RefData;

pub async fn ref_data(State(state): State<Arc<AppState>>) -> Json<RefData> {
    Json(state.ref_data.clone())
}
