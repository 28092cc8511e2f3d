use std::collections::HashMap;

use color_eyre::eyre::Result;

/// Decoupled representation of a YouTube playlist from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeApiPlaylist {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub item_count: Option<u32>,
}

/// Decoupled representation of one entry of a YouTube playlist.
///
/// `video_id` is missing for entries whose video was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeApiPlaylistItem {
    pub item_id: Option<String>,
    pub title: String,
    pub video_id: Option<String>,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeApiPage<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

/// Port trait wrapping the YouTube Data API capabilities used by business logic.
///
/// Implementations live in `services::youtube::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait YoutubeClient: Send + Sync {
    async fn my_playlists_page(
        &self,
        page_token: Option<String>,
    ) -> Result<YoutubeApiPage<YoutubeApiPlaylist>>;

    async fn playlist(&self, playlist_id: &str) -> Result<Option<YoutubeApiPlaylist>>;

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<YoutubeApiPage<YoutubeApiPlaylistItem>>;

    /// Raw ISO 8601 durations keyed by video id. Unknown ids are absent.
    async fn video_durations(&self, video_ids: Vec<String>) -> Result<HashMap<String, String>>;
}
