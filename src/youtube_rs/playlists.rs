use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{MAX_RESULTS, YoutubeListResponse};

/* ---------- Playlists ---------- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubePlaylist {
    pub id: Option<String>,
    pub snippet: Option<PlaylistSnippet>,
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    pub item_count: Option<u32>,
}

/// Fetch one page of the authenticated user's playlists.
///
/// Endpoint
/// - `GET /playlists?part=snippet,contentDetails&mine=true`
pub async fn get_my_playlists_page(
    client: &Client,
    api_base: &Url,
    access_token: &str,
    page_token: Option<&str>,
) -> Result<YoutubeListResponse<YoutubePlaylist>> {
    let mut url = api_base.join("playlists")?;
    url.query_pairs_mut()
        .append_pair("part", "snippet,contentDetails")
        .append_pair("mine", "true")
        .append_pair("maxResults", &MAX_RESULTS.to_string());
    if let Some(page_token) = page_token {
        url.query_pairs_mut().append_pair("pageToken", page_token);
    }

    client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<YoutubeListResponse<YoutubePlaylist>>()
        .await
        .wrap_err("Failed to deserialize YouTube playlists response")
}

/// Fetch a single playlist by id. Returns an empty list when it doesn't exist
/// or isn't visible to the token's owner.
///
/// Endpoint
/// - `GET /playlists?part=snippet&id={id}`
pub async fn get_playlist(
    client: &Client,
    api_base: &Url,
    access_token: &str,
    playlist_id: &str,
) -> Result<YoutubeListResponse<YoutubePlaylist>> {
    let mut url = api_base.join("playlists")?;
    url.query_pairs_mut()
        .append_pair("part", "snippet")
        .append_pair("id", playlist_id);

    client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<YoutubeListResponse<YoutubePlaylist>>()
        .await
        .wrap_err("Failed to deserialize YouTube playlist response")
}

/* ---------- Playlist items ---------- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubePlaylistItem {
    pub id: Option<String>,
    pub snippet: Option<PlaylistItemSnippet>,
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: Option<String>,
}

/// Fetch one page of a playlist's items.
///
/// Endpoint
/// - `GET /playlistItems?part=snippet,contentDetails&playlistId={id}`
pub async fn get_playlist_items_page(
    client: &Client,
    api_base: &Url,
    access_token: &str,
    playlist_id: &str,
    page_token: Option<&str>,
) -> Result<YoutubeListResponse<YoutubePlaylistItem>> {
    let mut url = api_base.join("playlistItems")?;
    url.query_pairs_mut()
        .append_pair("part", "snippet,contentDetails")
        .append_pair("playlistId", playlist_id)
        .append_pair("maxResults", &MAX_RESULTS.to_string());
    if let Some(page_token) = page_token {
        url.query_pairs_mut().append_pair("pageToken", page_token);
    }

    client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<YoutubeListResponse<YoutubePlaylistItem>>()
        .await
        .wrap_err("Failed to deserialize YouTube playlist items response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_playlist_items_page() {
        let body = r#"{
            "kind": "youtube#playlistItemListResponse",
            "nextPageToken": "CAUQAA",
            "items": [
                {
                    "id": "UExp-item-1",
                    "snippet": { "title": "Queen - Bohemian Rhapsody (Official Video)", "videoOwnerChannelTitle": "Queen Official" },
                    "contentDetails": { "videoId": "fJ9rUzIMcZQ" }
                },
                {
                    "id": "UExp-item-2",
                    "snippet": { "title": "Deleted video" },
                    "contentDetails": {}
                }
            ]
        }"#;

        let page: YoutubeListResponse<YoutubePlaylistItem> = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.items[0]
                .content_details
                .as_ref()
                .and_then(|c| c.video_id.as_deref()),
            Some("fJ9rUzIMcZQ")
        );
        assert!(page.items[1].content_details.as_ref().unwrap().video_id.is_none());
    }

    #[test]
    fn test_deserialize_empty_playlists_page() {
        let page: YoutubeListResponse<YoutubePlaylist> =
            serde_json::from_str(r#"{ "kind": "youtube#playlistListResponse" }"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
