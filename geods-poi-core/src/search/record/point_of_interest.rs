use serde::{Deserialize, Serialize};

use super::RawRow;

/// a search result. optional text attributes are omitted from the serialized
/// form when absent; `categories` is always written, empty or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub fid: i64,
    pub geom: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_name: Option<String>,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub source: String,
    pub source_record_id: String,
    pub lat: f64,
    pub long: f64,
    pub h3_15: String,
    pub easting: f64,
    pub northing: f64,
    pub lsoa21cd: String,
}

impl PointOfInterest {
    /// moves the pass-through attributes of `row` into a result, attaching the
    /// decoded geometry and the category tags built for it.
    pub fn from_row(row: RawRow, geom: String, categories: Vec<String>) -> Self {
        Self {
            fid: row.fid,
            geom,
            id: row.id,
            primary_name: row.primary_name,
            categories,
            address: row.address,
            locality: row.locality,
            postcode: row.postcode,
            region: row.region,
            country: row.country,
            source: row.source,
            source_record_id: row.source_record_id,
            lat: row.lat,
            long: row.long,
            h3_15: row.h3_15,
            easting: row.easting,
            northing: row.northing,
            lsoa21cd: row.lsoa21cd,
        }
    }
}
