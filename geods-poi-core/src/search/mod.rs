mod error;
mod executor;
mod row_source;

pub mod filter;
pub mod record;
pub mod taxonomy;

pub use error::PoiSearchError;
pub use executor::{PoiSearch, SearchOptions, SearchRequest};
pub use filter::{Bbox, CategoryFilter, CategoryMatching};
pub use record::{
    geometry_gpkg_codec::{DecodedPoint, GeometryDecodeError, HeaderPolicy},
    PointOfInterest, RawRow,
};
pub use row_source::{InMemoryRowSource, RowSource, RowStream};
pub use taxonomy::{category_tags, CategoryCensus};
