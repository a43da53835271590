//! map marker icons keyed by category.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::error::PoiApiError;

pub const SHADOW_FILE_NAME: &str = "_shadow.png";

/// category to icon file lookup, loaded once at start-up.
#[derive(Debug, Clone, Default)]
pub struct MarkerCatalog {
    dir: PathBuf,
    icons: HashMap<String, String>,
}

impl MarkerCatalog {
    pub fn new(dir: PathBuf, icons: HashMap<String, String>) -> Self {
        Self { dir, icons }
    }

    /// reads the JSON object of category to icon file name at `mappings`.
    /// icons are resolved relative to `dir`.
    pub fn load(mappings: &Path, dir: &Path) -> Result<Self, PoiApiError> {
        let contents = std::fs::read_to_string(mappings).map_err(|e| PoiApiError::ReadError {
            path: mappings.to_path_buf(),
            message: e.to_string(),
        })?;
        let icons: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| PoiApiError::ReadError {
                path: mappings.to_path_buf(),
                message: format!("failed to unmarshal marker mappings: {e}"),
            })?;
        log::info!(
            "loaded {} marker mappings from {}",
            icons.len(),
            mappings.display()
        );
        Ok(Self::new(dir.to_path_buf(), icons))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.icons.contains_key(category)
    }

    /// icon file for `category`, if it is mapped to a non-empty file name
    pub fn icon_path(&self, category: &str) -> Option<PathBuf> {
        self.icons
            .get(category)
            .filter(|icon| !icon.is_empty())
            .map(|icon| self.dir.join(icon))
    }

    pub fn shadow_path(&self) -> PathBuf {
        self.dir.join(SHADOW_FILE_NAME)
    }
}
