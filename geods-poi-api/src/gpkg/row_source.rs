use futures::StreamExt;
use geods_poi_core::search::{Bbox, PoiSearchError, RawRow, RowSource, RowStream};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// the rectangle is pushed down to SQLite so only candidate rows are read.
/// coordinates are cast to REAL since SQLite may store whole numbers as
/// INTEGER cells.
const ROWS_WITHIN_QUERY: &str = "\
    SELECT fid, geom, id, primary_name, main_category, alternate_category, address, locality, \
           postcode, region, country, source, source_record_id, \
           CAST(lat AS REAL) AS lat, CAST(long AS REAL) AS long, h3_15, \
           CAST(easting AS REAL) AS easting, CAST(northing AS REAL) AS northing, lsoa21cd \
    FROM poi_uk \
    WHERE lat BETWEEN ? AND ? AND long BETWEEN ? AND ?";

/// [`RowSource`] reading the `poi_uk` table of a GeoPackage.
#[derive(Debug, Clone)]
pub struct GeoPackageRowSource {
    pool: SqlitePool,
}

impl GeoPackageRowSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl RowSource for GeoPackageRowSource {
    fn rows_within(&self, bbox: Bbox) -> RowStream<'_> {
        sqlx::query(ROWS_WITHIN_QUERY)
            .bind(bbox.bottom)
            .bind(bbox.top)
            .bind(bbox.left)
            .bind(bbox.right)
            .fetch(&self.pool)
            .map(|result| {
                result
                    .and_then(|row| raw_row(&row))
                    .map_err(|e| PoiSearchError::RowSource(e.to_string()))
            })
            .boxed()
    }
}

fn raw_row(row: &SqliteRow) -> Result<RawRow, sqlx::Error> {
    Ok(RawRow {
        fid: row.try_get("fid")?,
        geom: row.try_get("geom")?,
        id: row.try_get("id")?,
        primary_name: row.try_get("primary_name")?,
        main_category: row.try_get("main_category")?,
        alternate_category: row.try_get("alternate_category")?,
        address: row.try_get("address")?,
        locality: row.try_get("locality")?,
        postcode: row.try_get("postcode")?,
        region: row.try_get("region")?,
        country: row.try_get("country")?,
        source: row.try_get("source")?,
        source_record_id: row.try_get("source_record_id")?,
        lat: row.try_get("lat")?,
        long: row.try_get("long")?,
        h3_15: row.try_get("h3_15")?,
        easting: row.try_get("easting")?,
        northing: row.try_get("northing")?,
        lsoa21cd: row.try_get("lsoa21cd")?,
    })
}
