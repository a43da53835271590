mod bbox;
mod category_filter;

pub use bbox::Bbox;
pub use category_filter::{CategoryFilter, CategoryMatching};
