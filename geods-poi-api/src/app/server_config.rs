use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use geods_poi_core::search::SearchOptions;
use serde::{Deserialize, Serialize};

use crate::error::PoiApiError;

/// prefix of environment variables overriding configuration values, for
/// example `GEODS_POI__PORT=9000` or `GEODS_POI__SEARCH__STRICT_BBOX=true`.
pub const ENV_PREFIX: &str = "GEODS_POI";
const ENV_SEPARATOR: &str = "__";
const ENV_LIST_SEPARATOR: &str = ";";

/// runtime configuration of the HTTP API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// GeoPackage holding the `poi_uk` table
    pub db: PathBuf,
    pub port: u16,
    /// size of the read-only connection pool
    pub max_connections: u32,
    #[serde(with = "super::humantime_duration")]
    pub request_timeout: Duration,
    pub search: SearchOptions,
    pub markers_dir: PathBuf,
    /// JSON object mapping category to marker icon file name
    pub marker_mappings: PathBuf,
    pub image: ImageConfig,
    /// attribution lines returned with the reference data
    pub attribution: Vec<String>,
}

/// upstream photo search used by the image lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    pub api_url: String,
    pub access_key: Option<String>,
    #[serde(with = "super::humantime_duration")]
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

/// values supplied on the command line, which take precedence over every
/// other configuration source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db: Option<PathBuf>,
    pub port: Option<u16>,
    pub access_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db: PathBuf::from("./data/poi_uk.gpkg"),
            port: 8080,
            max_connections: 5,
            request_timeout: Duration::from_secs(30),
            search: SearchOptions::default(),
            markers_dir: PathBuf::from("./data/markers"),
            marker_mappings: PathBuf::from("./data/markers/_mappings.json"),
            image: ImageConfig::default(),
            attribution: vec![],
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.unsplash.com/search/photos"),
            access_key: None,
            cache_ttl: Duration::from_secs(10 * 24 * 60 * 60),
            cache_capacity: 1024,
        }
    }
}

impl ServerConfig {
    /// layers, lowest precedence first: built-in defaults, the optional
    /// configuration file, `GEODS_POI__*` environment variables and finally
    /// the command line overrides.
    pub fn load(
        configuration_file: Option<&str>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, PoiApiError> {
        let mut builder = Config::builder();
        if let Some(f) = configuration_file {
            builder = builder.add_source(File::from(Path::new(f)));
        }
        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(ENV_LIST_SEPARATOR)
            .with_list_parse_key("attribution")
            .try_parsing(true);
        Self::from_sources(builder.add_source(environment), overrides).map_err(|e| {
            match (e, configuration_file) {
                (PoiApiError::ConfigurationError(msg), Some(f)) => {
                    PoiApiError::ConfigurationError(format!("file '{f}' produced error: {msg}"))
                }
                (e, _) => e,
            }
        })
    }

    fn from_sources(
        builder: ConfigBuilder<DefaultState>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, PoiApiError> {
        let db = overrides
            .db
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        let config: ServerConfig = builder
            .set_override_option("db", db)
            .and_then(|b| b.set_override_option("port", overrides.port.map(i64::from)))
            .and_then(|b| b.set_override_option("image.access_key", overrides.access_key.clone()))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .map_err(|e| PoiApiError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PoiApiError> {
        if self.max_connections == 0 {
            return Err(PoiApiError::ConfigurationError(String::from(
                "max_connections must be at least 1",
            )));
        }
        if self.image.cache_capacity == 0 {
            return Err(PoiApiError::ConfigurationError(String::from(
                "image.cache_capacity must be at least 1",
            )));
        }
        Ok(())
    }
}
