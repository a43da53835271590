use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// body of a `GET /search/photos` response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchPhotosResponse {
    pub results: Vec<Photo>,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub urls: Urls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub height: u32,
    pub likes: u32,
    pub links: PhotoLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_at: Option<DateTime<Utc>>,
    pub width: u32,
    pub user: User,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Urls {
    pub full: String,
    pub raw: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhotoLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
    pub download: String,
    pub download_location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub links: UserLinks,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
    pub photos: String,
    pub likes: String,
    pub portfolio: String,
}
