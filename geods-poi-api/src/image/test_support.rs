//! a stand-in for the Unsplash search endpoint, served on a local port.
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Router,
};

pub const TEST_ACCESS_KEY: &str = "test-key";

pub const EMPTY_RESPONSE: &str = r#"{"results": [], "total": 0, "total_pages": 0}"#;

/// one result as returned by the search endpoint, trimmed of the fields
/// that are not modelled.
pub const SEARCH_RESPONSE: &str = r##"{
    "total": 133,
    "total_pages": 133,
    "results": [
        {
            "id": "eOLpJytrbsQ",
            "created_at": "2014-11-18T14:35:36Z",
            "updated_at": "2024-01-04T08:01:28Z",
            "width": 4000,
            "height": 3000,
            "color": "#A7A2A1",
            "blur_hash": "LaLXMa9Fx[D%~q%MtQM|kDRjtRIU",
            "likes": 286,
            "alt_description": "a cup of coffee on a wooden table",
            "description": null,
            "urls": {
                "raw": "https://images.unsplash.com/photo-1416339306562-f3d12fefd36f",
                "full": "https://images.unsplash.com/photo-1416339306562-f3d12fefd36f?q=85",
                "regular": "https://images.unsplash.com/photo-1416339306562-f3d12fefd36f?w=1080",
                "small": "https://images.unsplash.com/photo-1416339306562-f3d12fefd36f?w=400",
                "thumb": "https://images.unsplash.com/photo-1416339306562-f3d12fefd36f?w=200"
            },
            "links": {
                "self": "https://api.unsplash.com/photos/eOLpJytrbsQ",
                "html": "https://unsplash.com/photos/eOLpJytrbsQ",
                "download": "https://unsplash.com/photos/eOLpJytrbsQ/download",
                "download_location": "https://api.unsplash.com/photos/eOLpJytrbsQ/download"
            },
            "user": {
                "id": "Ul0QVz12Goo",
                "name": "Ugo Mendes",
                "links": {
                    "self": "https://api.unsplash.com/users/ugodesign",
                    "html": "https://unsplash.com/@ugodesign",
                    "photos": "https://api.unsplash.com/users/ugodesign/photos",
                    "likes": "https://api.unsplash.com/users/ugodesign/likes",
                    "portfolio": "https://api.unsplash.com/users/ugodesign/portfolio"
                }
            }
        }
    ]
}"##;

/// serves `body` with `status` at `/search/photos`. requests without the
/// expected authorization or query parameters are answered with 401 or 400.
/// returns the endpoint url and a counter of the requests received.
pub async fn fake_unsplash(status: StatusCode, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let handler = move |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let expected_auth = format!("Client-ID {TEST_ACCESS_KEY}");
            if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected_auth.as_str()) {
                return (StatusCode::UNAUTHORIZED, "{}");
            }
            let expected = [
                ("per_page", "1"),
                ("orientation", "landscape"),
                ("order_by", "relevant"),
            ];
            let valid = params.contains_key("query")
                && expected
                    .iter()
                    .all(|(k, v)| params.get(*k).map(String::as_str) == Some(*v));
            if !valid {
                return (StatusCode::BAD_REQUEST, "{}");
            }
            (status, body)
        }
    };
    let app = Router::new().route("/search/photos", get(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test invariant failed: cannot bind local port");
    let addr = listener
        .local_addr()
        .expect("test invariant failed: no local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/search/photos"), hits)
}
