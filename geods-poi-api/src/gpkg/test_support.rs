//! in-memory GeoPackage fixtures shared by the service tests.
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

// POINT(-0.12 51.5)
pub const CAFE_POINT: &str = "47500001e61000000101000000b81e85eb51b8bebf0000000000c04940";
// POINT(0.5 51.75)
pub const PARK_POINT: &str = "47500001e61000000101000000000000000000e03f0000000000e04940";

/// a single connection keeps the in-memory database alive for the test.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("test invariant failed: cannot open in-memory sqlite");
    for statement in [
        "CREATE TABLE poi_uk (
            fid INTEGER PRIMARY KEY,
            geom BLOB,
            id TEXT NOT NULL,
            primary_name TEXT,
            main_category TEXT,
            alternate_category TEXT,
            address TEXT,
            locality TEXT,
            postcode TEXT,
            region TEXT,
            country TEXT,
            source TEXT NOT NULL,
            source_record_id TEXT NOT NULL,
            lat REAL NOT NULL,
            long REAL NOT NULL,
            h3_15 TEXT NOT NULL,
            easting REAL NOT NULL,
            northing REAL NOT NULL,
            lsoa21cd TEXT NOT NULL
        )",
        "CREATE TABLE gpkg_contents (
            table_name TEXT NOT NULL PRIMARY KEY,
            data_type TEXT NOT NULL,
            last_change DATETIME
        )",
    ] {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("test invariant failed: cannot create schema");
    }
    pool
}

pub struct Fixture {
    pub fid: i64,
    pub geom: Vec<u8>,
    pub long: f64,
    pub lat: f64,
    pub primary_name: Option<String>,
    pub main_category: Option<String>,
    pub alternate_category: Option<String>,
}

impl Fixture {
    pub fn new(fid: i64, geom_hex: &str, long: f64, lat: f64) -> Self {
        Self {
            fid,
            geom: hex::decode(geom_hex).expect("test invariant failed: fixture is not valid hex"),
            long,
            lat,
            primary_name: None,
            main_category: None,
            alternate_category: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.primary_name = Some(name.to_string());
        self
    }

    pub fn primary(mut self, category: &str) -> Self {
        self.main_category = Some(category.to_string());
        self
    }

    pub fn alternate(mut self, categories: &str) -> Self {
        self.alternate_category = Some(categories.to_string());
        self
    }
}

pub async fn insert_poi(pool: &SqlitePool, poi: &Fixture) {
    sqlx::query(
        "INSERT INTO poi_uk (fid, geom, id, primary_name, main_category, alternate_category, \
         locality, source, source_record_id, lat, long, h3_15, easting, northing, lsoa21cd) \
         VALUES (?, ?, ?, ?, ?, ?, 'London', 'meta', ?, ?, ?, '8f195da49a0d400', 530000.0, 180000.0, 'E01004734')",
    )
    .bind(poi.fid)
    .bind(&poi.geom)
    .bind(format!("poi-{}", poi.fid))
    .bind(&poi.primary_name)
    .bind(&poi.main_category)
    .bind(&poi.alternate_category)
    .bind(poi.fid.to_string())
    .bind(poi.lat)
    .bind(poi.long)
    .execute(pool)
    .await
    .expect("test invariant failed: cannot insert fixture row");
}

pub async fn set_last_change(pool: &SqlitePool, last_change: Option<&str>) {
    sqlx::query(
        "INSERT INTO gpkg_contents (table_name, data_type, last_change) VALUES ('poi_uk', 'features', ?)",
    )
    .bind(last_change)
    .execute(pool)
    .await
    .expect("test invariant failed: cannot insert gpkg_contents row");
}
