pub mod app;
pub mod error;
pub mod gpkg;
pub mod http_metrics;
pub mod image;
pub mod markers;
pub mod routes;
