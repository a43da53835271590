use super::GeometryDecodeError;

#[derive(thiserror::Error, Debug)]
pub enum PoiSearchError {
    #[error("{0}")]
    InvalidBbox(String),
    #[error("{0}")]
    InvalidCategories(String),
    #[error("error converting geometry of row {fid} from WKB to WKT: {source}")]
    GeometryDecode {
        fid: i64,
        source: GeometryDecodeError,
    },
    #[error("error retrieving rows from source: {0}")]
    RowSource(String),
}

impl PoiSearchError {
    /// true when the caller supplied a malformed request. these are reported
    /// back verbatim; every other variant is an internal fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PoiSearchError::InvalidBbox(_) | PoiSearchError::InvalidCategories(_)
        )
    }
}
