use std::sync::Arc;

use moka::future::Cache;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;

use super::{Photo, SearchPhotosResponse};
use crate::{app::ImageConfig, error::PoiApiError};

const USER_AGENT: &str = "https://github.com/rm-hull/geods-poi-api";

/// the part of a photo handed to clients.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub src: String,
    pub alt: Option<String>,
    pub attribution: PhotoAttribution,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PhotoAttribution {
    pub name: String,
    pub link: String,
}

impl From<&Photo> for ImageSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            src: photo.urls.small.clone(),
            alt: photo.alt_description.clone(),
            attribution: PhotoAttribution {
                name: photo.user.name.clone(),
                link: photo.user.links.html.clone(),
            },
        }
    }
}

/// searches for a landscape photo of a category. successful searches are
/// cached per category; concurrent misses on the same category share a
/// single upstream request and failures are not cached.
pub struct ImageLookup {
    client: reqwest::Client,
    api_url: String,
    access_key: Option<String>,
    cache: Cache<String, Arc<SearchPhotosResponse>>,
}

impl ImageLookup {
    pub fn new(config: &ImageConfig) -> Result<Self, PoiApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                PoiApiError::ConfigurationError(format!("failure building HTTP client: {e}"))
            })?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &ImageConfig) -> Self {
        if config.access_key.is_none() {
            log::warn!("no Unsplash access key configured, image lookups will fail");
        }
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();
        Self {
            client,
            api_url: config.api_url.clone(),
            access_key: config.access_key.clone(),
            cache,
        }
    }

    /// first search result for `category`, or `None` when the search found
    /// nothing.
    pub async fn first_photo(&self, category: &str) -> Result<Option<ImageSummary>, PoiApiError> {
        let response = self.search(category).await?;
        Ok(response.results.first().map(ImageSummary::from))
    }

    pub async fn search(&self, category: &str) -> Result<Arc<SearchPhotosResponse>, PoiApiError> {
        self.cache
            .try_get_with(category.to_string(), self.fetch(category))
            .await
            .map_err(|e| PoiApiError::ImageFetchError(format!("category '{category}': {e}")))
    }

    async fn fetch(&self, category: &str) -> Result<Arc<SearchPhotosResponse>, String> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or_else(|| String::from("no Unsplash access key configured"))?;
        log::info!("fetching image for category: {category}");
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("query", category),
                ("per_page", "1"),
                ("orientation", "landscape"),
                ("order_by", "relevant"),
            ])
            .header(AUTHORIZATION, format!("Client-ID {access_key}"))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| format!("error making request: {e}"))?
            .error_for_status()
            .map_err(|e| format!("bad response: {e}"))?;
        let body = response
            .json::<SearchPhotosResponse>()
            .await
            .map_err(|e| format!("error decoding response: {e}"))?;
        Ok(Arc::new(body))
    }
}
