use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::YoutubeListResponse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideo {
    pub id: Option<String>,
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO 8601, e.g. `PT4M13S`.
    pub duration: Option<String>,
}

/// Fetch content details for up to 50 videos at once.
///
/// Endpoint
/// - `GET /videos?part=contentDetails&id={id1,id2,...}`
pub async fn get_videos(
    client: &Client,
    api_base: &Url,
    access_token: &str,
    video_ids: &[String],
) -> Result<YoutubeListResponse<YoutubeVideo>> {
    let mut url = api_base.join("videos")?;
    url.query_pairs_mut()
        .append_pair("part", "contentDetails")
        .append_pair("id", &video_ids.join(","))
        .append_pair("maxResults", &video_ids.len().to_string());

    client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<YoutubeListResponse<YoutubeVideo>>()
        .await
        .wrap_err("Failed to deserialize YouTube videos response")
}
