use serde::Deserialize;

pub mod playlists;
pub mod videos;

/// Docs:
/// https://developers.google.com/youtube/v3/docs
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` the Data API accepts for list endpoints.
pub const MAX_RESULTS: usize = 50;

/* ---------- Shared envelope ---------- */

/// The list envelope returned by every `*.list` endpoint.
///
/// Notes
/// - `items` defaults to an empty vec when missing.
/// - `nextPageToken` is absent on the last page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}
