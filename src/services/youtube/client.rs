use std::collections::HashMap;

use color_eyre::eyre::Result;
use reqwest::Client;
use url::Url;

use crate::ports::youtube::{
    YoutubeApiPage, YoutubeApiPlaylist, YoutubeApiPlaylistItem, YoutubeClient,
};
use crate::youtube_rs::playlists::{
    YoutubePlaylist, YoutubePlaylistItem, get_my_playlists_page, get_playlist,
    get_playlist_items_page,
};
use crate::youtube_rs::videos::get_videos;

/// YouTube Data API adapter authenticated with an OAuth access token.
///
/// Obtaining and refreshing the token happens outside this crate.
pub struct YoutubeHttpAdapter {
    client: Client,
    api_base: Url,
    access_token: String,
}

impl YoutubeHttpAdapter {
    pub fn new(api_base: Url, access_token: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            access_token,
        }
    }
}

/// Entries without an id or a title can't be imported; skip them.
fn to_api_playlist(playlist: YoutubePlaylist) -> Option<YoutubeApiPlaylist> {
    let id = playlist.id?;
    let snippet = playlist.snippet?;
    let title = snippet.title?;
    Some(YoutubeApiPlaylist {
        id,
        title,
        description: snippet.description.filter(|d| !d.is_empty()),
        item_count: playlist.content_details.and_then(|c| c.item_count),
    })
}

fn to_api_playlist_item(item: YoutubePlaylistItem) -> Option<YoutubeApiPlaylistItem> {
    let title = item.snippet?.title?;
    Some(YoutubeApiPlaylistItem {
        item_id: item.id,
        title,
        video_id: item.content_details.and_then(|c| c.video_id),
    })
}

#[async_trait::async_trait]
impl YoutubeClient for YoutubeHttpAdapter {
    async fn my_playlists_page(
        &self,
        page_token: Option<String>,
    ) -> Result<YoutubeApiPage<YoutubeApiPlaylist>> {
        let res = get_my_playlists_page(
            &self.client,
            &self.api_base,
            &self.access_token,
            page_token.as_deref(),
        )
        .await?;

        Ok(YoutubeApiPage {
            items: res.items.into_iter().filter_map(to_api_playlist).collect(),
            next_page_token: res.next_page_token,
        })
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Option<YoutubeApiPlaylist>> {
        let res = get_playlist(&self.client, &self.api_base, &self.access_token, playlist_id)
            .await?;

        // A playlist with no title still exists.
        Ok(res.items.into_iter().next().map(|playlist| {
            let snippet = playlist.snippet;
            YoutubeApiPlaylist {
                id: playlist.id.unwrap_or_else(|| playlist_id.to_string()),
                title: snippet
                    .as_ref()
                    .and_then(|s| s.title.clone())
                    .unwrap_or_default(),
                description: snippet.and_then(|s| s.description).filter(|d| !d.is_empty()),
                item_count: playlist.content_details.and_then(|c| c.item_count),
            }
        }))
    }

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<YoutubeApiPage<YoutubeApiPlaylistItem>> {
        let res = get_playlist_items_page(
            &self.client,
            &self.api_base,
            &self.access_token,
            playlist_id,
            page_token.as_deref(),
        )
        .await?;

        Ok(YoutubeApiPage {
            items: res
                .items
                .into_iter()
                .filter_map(to_api_playlist_item)
                .collect(),
            next_page_token: res.next_page_token,
        })
    }

    async fn video_durations(&self, video_ids: Vec<String>) -> Result<HashMap<String, String>> {
        if video_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let res = get_videos(&self.client, &self.api_base, &self.access_token, &video_ids).await?;

        Ok(res
            .items
            .into_iter()
            .filter_map(|video| Some((video.id?, video.content_details?.duration?)))
            .collect())
    }
}
