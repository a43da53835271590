pub mod geometry_gpkg_codec;
mod point_of_interest;
mod raw_row;

pub use point_of_interest::PointOfInterest;
pub use raw_row::RawRow;
