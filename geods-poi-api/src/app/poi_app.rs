use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{
    app::{ConfigOverrides, ServerConfig},
    error::PoiApiError,
};

/// HTTP API serving bounding box and category searches over the GeoDS points of interest
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct PoiApp {
    #[command(subcommand)]
    pub op: PoiOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum PoiOperation {
    /// run the HTTP API server
    Http {
        /// GeoPackage file containing the poi_uk table. overrides the configured value.
        #[arg(long)]
        db: Option<PathBuf>,

        /// port to listen on. overrides the configured value.
        #[arg(short, long)]
        port: Option<u16>,

        /// optional TOML file with server settings. values are further overridden by
        /// GEODS_POI__* environment variables and by the flags of this command.
        #[arg(short, long)]
        configuration_file: Option<String>,

        /// access key for the Unsplash photo search used by the image lookup
        #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
        #[serde(skip_serializing)]
        unsplash_access_key: Option<String>,
    },
}

impl PoiOperation {
    pub fn run(&self) -> Result<(), PoiApiError> {
        match self {
            PoiOperation::Http {
                db,
                port,
                configuration_file,
                unsplash_access_key,
            } => {
                let overrides = ConfigOverrides {
                    db: db.clone(),
                    port: *port,
                    access_key: unsplash_access_key.clone(),
                };
                let config = ServerConfig::load(configuration_file.as_deref(), &overrides)?;
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| {
                        PoiApiError::TokioError(format!(
                            "failure creating async rust tokio runtime: {e}"
                        ))
                    })?;
                runtime.block_on(crate::routes::serve(config))
            }
        }
    }
}
