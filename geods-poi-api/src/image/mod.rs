//! photo lookup for categories via the Unsplash search API.
mod lookup;
#[cfg(test)]
pub(crate) mod test_support;
mod unsplash;

pub use lookup::{ImageLookup, ImageSummary, PhotoAttribution};
pub use unsplash::{Photo, PhotoLinks, SearchPhotosResponse, Urls, User, UserLinks};
