/// one row of the `poi_uk` table as delivered by a
/// [`RowSource`](crate::search::RowSource). `geom` is the undecoded
/// GeoPackage geometry blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub fid: i64,
    pub geom: Vec<u8>,
    pub id: String,
    pub primary_name: Option<String>,
    pub main_category: Option<String>,
    pub alternate_category: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub postcode: Option<String>,
    pub region: Option<String>,
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
