mod humantime_duration;
mod poi_app;
mod server_config;

pub use poi_app::{PoiApp, PoiOperation};
pub use server_config::{ConfigOverrides, ImageConfig, ServerConfig, ENV_PREFIX};
