//! read-only access to the `poi_uk` GeoPackage.
mod pool;
mod ref_data;
mod row_source;
#[cfg(test)]
pub(crate) mod test_support;

pub use pool::{open_pool, ping};
pub use ref_data::{last_updated, precompute_categories, RefData, UNKNOWN_LAST_UPDATED};
pub use row_source::GeoPackageRowSource;
