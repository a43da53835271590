use std::collections::BTreeMap;

use futures::TryStreamExt;
use geods_poi_core::search::{category_tags, CategoryCensus};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::error::PoiApiError;

pub const UNKNOWN_LAST_UPDATED: &str = "unknown";

/// catalog-wide summary served by the reference data route. computed once at
/// start-up.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RefData {
    pub count: usize,
    pub last_updated: String,
    pub categories: BTreeMap<String, usize>,
    pub attribution: Vec<String>,
}

impl RefData {
    pub async fn load(pool: &SqlitePool, attribution: Vec<String>) -> Result<Self, PoiApiError> {
        let census = precompute_categories(pool).await?;
        let last_updated = last_updated(pool).await?;
        Ok(Self {
            count: census.record_count(),
            last_updated,
            categories: census.into_counts(),
            attribution,
        })
    }
}

/// counts every category tag over the whole `poi_uk` table.
pub async fn precompute_categories(pool: &SqlitePool) -> Result<CategoryCensus, PoiApiError> {
    log::info!("pre-computing POI categories");
    let mut census = CategoryCensus::new();
    let mut rows = sqlx::query("SELECT main_category, alternate_category FROM poi_uk").fetch(pool);
    while let Some(row) = rows.try_next().await? {
        let main_category: Option<String> = row.try_get("main_category")?;
        let alternate_category: Option<String> = row.try_get("alternate_category")?;
        census.add_record(&category_tags(
            main_category.as_deref(),
            alternate_category.as_deref(),
        ));
    }
    log::info!(
        "discovered {} distinct categories from {} points of interest",
        census.distinct_categories(),
        census.record_count()
    );
    Ok(census)
}

/// `last_change` of the first `gpkg_contents` entry, or [`UNKNOWN_LAST_UPDATED`]
/// when it is missing or empty.
pub async fn last_updated(pool: &SqlitePool) -> Result<String, PoiApiError> {
    let last_change: Option<Option<String>> =
        sqlx::query_scalar("SELECT last_change FROM gpkg_contents")
            .fetch_optional(pool)
            .await?;
    match last_change.flatten().filter(|s| !s.is_empty()) {
        Some(timestamp) => {
            log::info!("last updated timestamp in db: {timestamp}");
            Ok(timestamp)
        }
        None => {
            log::warn!("gpkg_contents has no last_change timestamp");
            Ok(String::from(UNKNOWN_LAST_UPDATED))
        }
    }
}
